use nanoindent::core::units::{
    DEFAULT_ATOMIC_AREA, DEFAULT_COORDINATION_CUTOFF, DEFAULT_INDENTER_OFFSET,
    DEFAULT_PLANE_TOLERANCE,
};
use nanoindent::workflows::plots::PlotKind;

pub struct DefaultsConfig {
    pub indenter_offset: f64,
    pub atomic_area: f64,
    pub plane_tolerance: f64,
    pub coordination_cutoff: f64,
    pub table_file_name: String,
    pub report_plots: Vec<PlotKind>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            indenter_offset: DEFAULT_INDENTER_OFFSET,
            atomic_area: DEFAULT_ATOMIC_AREA,
            plane_tolerance: DEFAULT_PLANE_TOLERANCE,
            coordination_cutoff: DEFAULT_COORDINATION_CUTOFF,
            table_file_name: "indentation.csv".to_string(),
            report_plots: PlotKind::ALL.to_vec(),
        }
    }
}
