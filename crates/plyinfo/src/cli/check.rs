use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::{CheckArgs, read_header};

pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let failed = check_paths(&args.paths, args.quiet, &mut std::io::stdout().lock())?;
    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed", args.paths.len());
    }
    Ok(())
}

/// Report each path on `out` and return how many were rejected.
pub fn check_paths(paths: &[PathBuf], quiet: bool, out: &mut impl Write) -> anyhow::Result<usize> {
    let mut failed = 0usize;
    for path in paths {
        match read_header(path) {
            Ok(ply) => {
                info!(path = %path.display(), elements = ply.elements().len(), "header ok");
                if !quiet {
                    writeln!(out, "ok      {}", path.display())?;
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "header rejected");
                failed += 1;
                writeln!(out, "FAILED  {e:#}")?;
            }
        }
    }
    Ok(failed)
}
