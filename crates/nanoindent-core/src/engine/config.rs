use crate::core::units::{
    DEFAULT_ATOMIC_AREA, DEFAULT_COORDINATION_CUTOFF, DEFAULT_INDENTER_OFFSET,
    DEFAULT_PLANE_TOLERANCE,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value {value} for parameter '{name}': must be finite and positive")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Tunable physical parameters of the analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Gap between indenter plane and particle surface at first contact (Å).
    pub indenter_offset: f64,
    /// Projected area of one contact atom (Å²).
    pub atomic_area: f64,
    /// Half-thickness of the slab around the indenter plane for the elliptical area (Å).
    pub plane_tolerance: f64,
    /// Neighbour cutoff radius for coordination numbers (Å).
    pub coordination_cutoff: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            indenter_offset: DEFAULT_INDENTER_OFFSET,
            atomic_area: DEFAULT_ATOMIC_AREA,
            plane_tolerance: DEFAULT_PLANE_TOLERANCE,
            coordination_cutoff: DEFAULT_COORDINATION_CUTOFF,
        }
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    indenter_offset: Option<f64>,
    atomic_area: Option<f64>,
    plane_tolerance: Option<f64>,
    coordination_cutoff: Option<f64>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indenter_offset(mut self, offset: f64) -> Self {
        self.indenter_offset = Some(offset);
        self
    }
    pub fn atomic_area(mut self, area: f64) -> Self {
        self.atomic_area = Some(area);
        self
    }
    pub fn plane_tolerance(mut self, tolerance: f64) -> Self {
        self.plane_tolerance = Some(tolerance);
        self
    }
    pub fn coordination_cutoff(mut self, cutoff: f64) -> Self {
        self.coordination_cutoff = Some(cutoff);
        self
    }

    /// Builds the configuration, filling unset parameters with the silicon defaults.
    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();
        Ok(AnalysisConfig {
            indenter_offset: positive(
                "indenter_offset",
                self.indenter_offset.unwrap_or(defaults.indenter_offset),
            )?,
            atomic_area: positive(
                "atomic_area",
                self.atomic_area.unwrap_or(defaults.atomic_area),
            )?,
            plane_tolerance: positive(
                "plane_tolerance",
                self.plane_tolerance.unwrap_or(defaults.plane_tolerance),
            )?,
            coordination_cutoff: positive(
                "coordination_cutoff",
                self.coordination_cutoff
                    .unwrap_or(defaults.coordination_cutoff),
            )?,
        })
    }
}

/// Rejects zero, negative and non-finite parameter values.
pub fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
