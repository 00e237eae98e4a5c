use crate::cli::PlotArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use tracing::info;

pub fn run(args: PlotArgs, progress: &CliProgressHandler) -> Result<()> {
    let config = build_config(&args.input)?;
    let mut session = super::open_session(&config, progress)?;

    info!("Rendering '{}' plot...", args.kind);
    session.plot(args.kind, &args.output, args.title.as_deref())?;

    println!(
        "✓ {} plot written to: {}",
        args.kind,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{read, write_inputs};
    use crate::error::CliError;
    use nanoindent::core::plot::PlotError;
    use nanoindent::engine::error::EngineError;
    use nanoindent::workflows::plots::PlotKind;

    #[test]
    fn writes_svg_with_custom_title() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("force.svg");
        let args = PlotArgs {
            kind: PlotKind::ForceDisplacement,
            input: write_inputs(&dir),
            output: output.clone(),
            title: Some("Run 7 loading curve".to_string()),
        };

        run(args, &CliProgressHandler::hidden()).unwrap();

        let svg = read(&output);
        assert!(svg.contains("Run 7 loading curve"));
        assert!(svg.contains("Force [nN]"));
    }

    #[test]
    fn non_svg_output_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = PlotArgs {
            kind: PlotKind::PoteStrain,
            input: write_inputs(&dir),
            output: dir.path().join("pote.png"),
            title: None,
        };

        let result = run(args, &CliProgressHandler::hidden());
        assert!(matches!(
            result,
            Err(CliError::Core(EngineError::Plot {
                source: PlotError::UnsupportedPlotFormat { .. }
            }))
        ));
    }
}
