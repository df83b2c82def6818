use crate::config::Config;
use accesslog_core::Batch;
use accesslog_store::BatchRunner;
use anyhow::{Context, Result, bail};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn handle(path: &Path, config: &Config) -> Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read batch file {}", path.display()))?;
    let batch = Batch::from_bytes(&bytes)?;

    let report = BatchRunner::new(config.batch.on_error)
        .with_creation_policy(config.creation_policy())
        .run(&batch);

    let colored = std::io::stderr().is_terminal();
    for failure in &report.failures {
        let label = format!("line {}:", failure.line);
        if colored {
            eprintln!("{} {}", label.yellow(), failure.error);
        } else {
            eprintln!("{} {}", label, failure.error);
        }
    }

    if !report.is_success() {
        if report.skipped > 0 {
            bail!(
                "batch aborted after {} of {} lines ({} skipped)",
                report.applied + report.failures.len(),
                batch.len(),
                report.skipped
            );
        }
        bail!(
            "{} of {} batch lines failed",
            report.failures.len(),
            batch.len()
        );
    }
    Ok(())
}
