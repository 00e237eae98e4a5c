use crate::cli::ReportArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use nanoindent::core::plot::PlotError;
use nanoindent::engine::error::EngineError;
use std::fs;
use tracing::{info, warn};

pub fn run(args: ReportArgs, progress: &CliProgressHandler) -> Result<()> {
    if args.output_dir.is_file() {
        return Err(CliError::Argument(format!(
            "Report output '{}' is a file, expected a directory.",
            args.output_dir.display()
        )));
    }

    let config = build_config(&args.input)?;
    let mut session = super::open_session(&config, progress)?;

    fs::create_dir_all(&args.output_dir)?;
    let prefix = args
        .title_prefix
        .as_deref()
        .or(config.report.title_prefix.as_deref())
        .unwrap_or_default();

    println!(
        "Writing {} plot(s) to {}...",
        config.report.plots.len(),
        args.output_dir.display()
    );

    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut failure = None;
    for kind in &config.report.plots {
        let path = args.output_dir.join(format!("{}.svg", kind.name()));
        let title = format!("{}{}", prefix, kind.default_title());
        info!("Rendering '{}' to {:?}", kind, &path);
        match session.plot(*kind, &path, Some(&title)) {
            Ok(()) => {
                written += 1;
                println!("  {} -> {}", kind, path.display());
            }
            Err(EngineError::Plot {
                source: PlotError::EmptySeries { label },
            }) => {
                warn!(kind = %kind, series = %label, "Plot has no finite points; skipping.");
                skipped += 1;
                println!("  {} skipped: series '{}' has no finite points", kind, label);
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    if config.report.plots.is_empty() {
        warn!("Report configuration lists no plots; only the table is written.");
    }

    // Written even when a plot failed, with every column computed so far.
    let table_path = args.output_dir.join(&config.report.table_file_name);
    session.write_csv(&table_path)?;
    if let Some(e) = failure {
        return Err(e.into());
    }

    println!(
        "✓ Report ({} plot(s), {} skipped, and table) written to: {}",
        written,
        skipped,
        args.output_dir.display()
    );
    Ok(())
}
