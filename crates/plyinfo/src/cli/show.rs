use std::fmt::{self, Write};

use ply_header::{PlyFile, PlyProperty};
use tracing::debug;

use crate::cli::{ShowArgs, read_header};
use crate::config::{AppConfig, OutputFormat};

pub fn execute(args: ShowArgs) -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_default()?;
    let output = if args.json {
        OutputFormat::Json
    } else if args.table {
        OutputFormat::Table
    } else {
        cfg.default_output
    };
    debug!(path = %args.path.display(), %output, "showing header");

    let ply = read_header(&args.path)?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ply)?),
        OutputFormat::Table => print!("{}", render_table(&ply, cfg.show_comments)?),
    }
    Ok(())
}

/// Human-readable summary of a header, one row per property.
pub fn render_table(ply: &PlyFile, show_comments: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_table(&mut out, ply, show_comments)?;
    Ok(out)
}

fn write_table(out: &mut impl fmt::Write, ply: &PlyFile, show_comments: bool) -> fmt::Result {
    writeln!(out, "format {} {}", ply.format(), ply.version())?;
    if show_comments {
        for comment in ply.comments() {
            writeln!(out, "comment {comment}")?;
        }
        for info in ply.obj_info() {
            writeln!(out, "obj_info {info}")?;
        }
    }

    writeln!(out, "{:<24} {:>12} {:<24} {:<16}", "Element", "Count", "Property", "Type")?;
    writeln!(out, "{}", "-".repeat(79))?;
    for element in ply.elements() {
        if element.properties.is_empty() {
            writeln!(out, "{:<24} {:>12} {:<24} {:<16}", element.name, element.size, "-", "-")?;
        }
        for (i, property) in element.properties.iter().enumerate() {
            let (name, size) = if i == 0 {
                (element.name.as_str(), element.size.to_string())
            } else {
                ("", String::new())
            };
            writeln!(
                out,
                "{:<24} {:>12} {:<24} {:<16}",
                name,
                size,
                property.name,
                type_label(property)
            )?;
        }
    }
    writeln!(out, "\n{} element(s) declared.", ply.elements().len())
}

fn type_label(property: &PlyProperty) -> String {
    match property.size_type {
        Some(size_type) => format!("list {size_type} {}", property.data_type),
        None => property.data_type.to_string(),
    }
}
