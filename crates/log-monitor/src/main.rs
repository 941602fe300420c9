mod bootstrap;

use anyhow::{bail, Result};
use monitor_core::settings::Settings;
use monitor_data::pipeline::{process_file, process_testcases};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(settings.effective_log_level())?;

    tracing::info!("Log Monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let format = settings.output_format();

    match &settings.testcases {
        Some(dir) => {
            tracing::info!("Running test cases under {}", dir.display());
            let batch = process_testcases(dir, format)?;
            for (input, error) in &batch.failed {
                eprintln!("{}: {}", input.display(), error);
            }
            if !batch.is_success() {
                bail!(
                    "{} of {} test cases failed",
                    batch.failed.len(),
                    batch.failed.len() + batch.completed.len()
                );
            }
        }
        None => {
            tracing::info!(
                "Processing {} -> {}",
                settings.input.display(),
                settings.output.display()
            );
            let summary = process_file(&settings.input, &settings.output, format)?;
            if summary.skipped > 0 {
                tracing::warn!(skipped = summary.skipped, "some command lines were malformed");
            }
        }
    }

    Ok(())
}
