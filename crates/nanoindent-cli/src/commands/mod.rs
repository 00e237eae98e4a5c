pub mod analyze;
pub mod plot;
pub mod report;

use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use nanoindent::engine::progress::ProgressReporter;
use nanoindent::workflows::indentation::Indentation;
use tracing::info;

/// Opens an indentation session for the configured inputs, wired to the terminal progress bar.
fn open_session(
    config: &AppConfig,
    progress: &CliProgressHandler,
) -> Result<Indentation<'static>> {
    info!(
        "Loading indenter timeseries from {:?}",
        &config.timeseries_path
    );
    let session = Indentation::new(&config.dump_path, &config.timeseries_path, config.analysis)?
        .with_reporter(ProgressReporter::with_callback(progress.get_callback()));
    Ok(session)
}
