use nanoindent::engine::config::AnalysisConfig;
use nanoindent::workflows::plots::PlotKind;
use std::path::PathBuf;

pub struct AppConfig {
    pub dump_path: PathBuf,
    pub timeseries_path: PathBuf,
    pub analysis: AnalysisConfig,
    pub report: ReportSettings,
}

pub struct ReportSettings {
    pub plots: Vec<PlotKind>,
    pub title_prefix: Option<String>,
    pub table_file_name: String,
}
