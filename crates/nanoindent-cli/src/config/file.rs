use crate::error::{CliError, Result};
use nanoindent::workflows::plots::PlotKind;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileGeometryConfig {
    #[serde(rename = "indenter-offset")]
    pub indenter_offset: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileContactConfig {
    #[serde(rename = "atomic-area")]
    pub atomic_area: Option<f64>,
    #[serde(rename = "plane-tolerance")]
    pub plane_tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileCoordinationConfig {
    pub cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileReportConfig {
    pub plots: Option<Vec<PlotKind>>,
    #[serde(rename = "title-prefix")]
    pub title_prefix: Option<String>,
    #[serde(rename = "table-file")]
    pub table_file: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub geometry: Option<FileGeometryConfig>,
    pub contact: Option<FileContactConfig>,
    pub coordination: Option<FileCoordinationConfig>,
    pub report: Option<FileReportConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
