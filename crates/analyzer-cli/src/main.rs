//! Approach Statistics - Main Entry Point

use analyzer_cli::{init_logging, read_batch, run_batch, AnalyzerSettings};
use anyhow::{bail, Context};
use std::path::PathBuf;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let settings = AnalyzerSettings::load().context("failed to load settings")?;
    init_logging(settings.log_level()?)?;

    info!("=== Approach Statistics v{} ===", env!("CARGO_PKG_VERSION"));

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: approach-stats <batch.json>...");
    }

    let processor = settings.processor();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut failed_files = 0;

    for path in &paths {
        info!("Processing {}", path.display());
        let result = read_batch(path).and_then(|mut batch| run_batch(&processor, &mut batch, &mut out));
        match result {
            Ok(summary) => info!("{}: {} events processed", path.display(), summary.total()),
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed_files += 1;
            }
        }
    }

    if failed_files > 0 {
        bail!("{} of {} files failed", failed_files, paths.len());
    }
    Ok(())
}
