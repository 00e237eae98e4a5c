use crate::cli::AnalyzeArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use nanoindent::core::models::table::Column;
use tracing::info;

pub fn run(args: AnalyzeArgs, progress: &CliProgressHandler) -> Result<()> {
    let config = build_config(&args.input)?;
    let mut session = super::open_session(&config, progress)?;

    let columns = if args.columns.is_empty() {
        Column::all()
    } else {
        args.columns
    };
    info!("Computing {} column(s)...", columns.len());
    println!(
        "Analyzing {} timeseries rows from {}...",
        session.table().len(),
        config.dump_path.display()
    );

    session.ensure_all(&columns)?;
    session.write_csv(&args.output)?;

    let names: Vec<String> = session.table().columns().map(|c| c.name()).collect();
    info!("Table written with columns: {}", names.join(", "));
    println!(
        "✓ Indentation table ({} rows, {} derived columns) written to: {}",
        session.table().len(),
        names.len(),
        args.output.display()
    );
    Ok(())
}
