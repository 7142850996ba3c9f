pub mod check;
pub mod config_cmd;
pub mod show;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use ply_header::PlyFile;

#[derive(Parser)]
#[command(name = "plyinfo", version, about = "Inspect and validate PLY file headers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the elements and properties a PLY header declares.
    Show(ShowArgs),

    /// Validate the headers of one or more PLY files.
    Check(CheckArgs),

    /// View / edit configuration.
    Config(ConfigArgs),
}

//  Subcommand argument structs

#[derive(Debug, clap::Args, Clone)]
pub struct ShowArgs {
    /// Path to a PLY file.
    pub path: PathBuf,

    /// Print JSON instead of the configured default output.
    #[arg(long)]
    pub json: bool,

    /// Print a table instead of the configured default output.
    #[arg(long, conflicts_with = "json")]
    pub table: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct CheckArgs {
    /// PLY files to validate.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Only report files that fail.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Display the current configuration.
    Show,
    /// Set a configuration value.
    Set { key: String, value: String },
}

/// Open `path` and parse its header. The file is closed again on return.
pub fn read_header(path: &Path) -> anyhow::Result<PlyFile> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    PlyFile::from_reader(&mut reader)
        .with_context(|| format!("{}: invalid PLY header", path.display()))
}
