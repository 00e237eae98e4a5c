use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, ReportSettings};
use crate::cli::InputArgs;
use crate::error::{CliError, Result};
use nanoindent::engine::config::AnalysisConfigBuilder;
use std::str::FromStr;

pub fn build_config(args: &InputArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let geometry_file = file_config.geometry.take().unwrap_or_default();
    let contact_file = file_config.contact.take().unwrap_or_default();
    let coordination_file = file_config.coordination.take().unwrap_or_default();
    let report_file = file_config.report.take().unwrap_or_default();

    let analysis = AnalysisConfigBuilder::new()
        .indenter_offset(
            args.indenter_offset
                .or(geometry_file.indenter_offset)
                .unwrap_or(defaults.indenter_offset),
        )
        .atomic_area(
            args.atomic_area
                .or(contact_file.atomic_area)
                .unwrap_or(defaults.atomic_area),
        )
        .plane_tolerance(
            args.plane_tolerance
                .or(contact_file.plane_tolerance)
                .unwrap_or(defaults.plane_tolerance),
        )
        .coordination_cutoff(
            args.cutoff
                .or(coordination_file.cutoff)
                .unwrap_or(defaults.coordination_cutoff),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let report = ReportSettings {
        plots: report_file.plots.unwrap_or(defaults.report_plots),
        title_prefix: report_file.title_prefix,
        table_file_name: report_file.table_file.unwrap_or(defaults.table_file_name),
    };

    Ok(AppConfig {
        dump_path: args.dump.clone(),
        timeseries_path: args.timeseries.clone(),
        analysis,
        report,
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "geometry.indenter-offset" => {
                config
                    .geometry
                    .get_or_insert_with(Default::default)
                    .indenter_offset = Some(parse_value(key, value_str, "float")?);
            }
            "contact.atomic-area" => {
                config
                    .contact
                    .get_or_insert_with(Default::default)
                    .atomic_area = Some(parse_value(key, value_str, "float")?);
            }
            "contact.plane-tolerance" => {
                config
                    .contact
                    .get_or_insert_with(Default::default)
                    .plane_tolerance = Some(parse_value(key, value_str, "float")?);
            }
            "coordination.cutoff" => {
                config
                    .coordination
                    .get_or_insert_with(Default::default)
                    .cutoff = Some(parse_value(key, value_str, "float")?);
            }
            "report.title-prefix" => {
                config
                    .report
                    .get_or_insert_with(Default::default)
                    .title_prefix = Some(value_str.to_string());
            }
            "report.plots" => {
                let plots = value_str
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| parse_value(key, s, "plot kind"))
                    .collect::<Result<Vec<_>>>()?;
                config.report.get_or_insert_with(Default::default).plots = Some(plots);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoindent::engine::config::AnalysisConfig;
    use nanoindent::workflows::plots::PlotKind;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_input_args() -> InputArgs {
        InputArgs {
            dump: PathBuf::from("run.dump"),
            timeseries: PathBuf::from("indent.txt"),
            config: None,
            cutoff: None,
            atomic_area: None,
            plane_tolerance: None,
            indenter_offset: None,
            set_values: vec![],
        }
    }

    #[test]
    fn defaults_apply_without_file_or_overrides() {
        let app = build_config(&base_input_args()).unwrap();
        assert_eq!(app.analysis, AnalysisConfig::default());
        assert_eq!(app.report.plots, PlotKind::ALL.to_vec());
        assert_eq!(app.report.table_file_name, "indentation.csv");
        assert!(app.report.title_prefix.is_none());
        assert_eq!(app.dump_path, PathBuf::from("run.dump"));
    }

    #[test]
    fn cli_flag_beats_set_value_beats_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nanoindent.toml");
        fs::write(
            &path,
            "[coordination]\ncutoff = 2.2\n[contact]\natomic-area = 10.0\nplane-tolerance = 0.4\n",
        )
        .unwrap();

        let mut args = base_input_args();
        args.config = Some(path);
        args.set_values = vec![
            "coordination.cutoff=2.4".to_string(),
            "contact.atomic-area=11.0".to_string(),
        ];
        args.cutoff = Some(2.5);

        let app = build_config(&args).unwrap();
        assert_eq!(app.analysis.coordination_cutoff, 2.5);
        assert_eq!(app.analysis.atomic_area, 11.0);
        assert_eq!(app.analysis.plane_tolerance, 0.4);
        assert_eq!(app.analysis.indenter_offset, 4.0725);
    }

    #[test]
    fn report_settings_come_from_file_and_set_values() {
        let mut args = base_input_args();
        args.set_values = vec![
            "report.plots=stress-strain, pote-strain".to_string(),
            "report.title-prefix=Run 3: ".to_string(),
        ];
        let app = build_config(&args).unwrap();
        assert_eq!(
            app.report.plots,
            vec![PlotKind::StressStrain, PlotKind::PoteStrain]
        );
        assert_eq!(app.report.title_prefix.as_deref(), Some("Run 3: "));
    }

    #[test]
    fn invalid_set_values_are_config_errors() {
        for bad in [
            "coordination.cutoff",
            "coordination.cutoff=wide",
            "solver.tolerance=1",
            "report.plots=histogram",
        ] {
            let mut args = base_input_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn non_positive_parameters_are_rejected() {
        let mut args = base_input_args();
        args.atomic_area = Some(0.0);
        let Err(CliError::Config(message)) = build_config(&args) else {
            panic!("expected a configuration error");
        };
        assert!(message.contains("atomic_area"));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let mut args = base_input_args();
        args.config = Some(PathBuf::from("/definitely/not/here.toml"));
        assert!(matches!(build_config(&args), Err(CliError::Io(_))));
    }
}
