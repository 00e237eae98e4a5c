use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::dump::DumpError;
use crate::core::io::timeseries::TimeseriesError;
use crate::core::models::table::TableError;
use crate::core::plot::PlotError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read trajectory: {source}")]
    Trajectory {
        #[from]
        source: DumpError,
    },

    #[error("Failed to read indenter timeseries: {source}")]
    Timeseries {
        #[from]
        source: TimeseriesError,
    },

    #[error("Table error: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Plot error: {source}")]
    Plot {
        #[from]
        source: PlotError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Trajectory frame at timestep {timestep} has no matching row in the timeseries")]
    TimestepNotFound { timestep: u64 },

    #[error("Trajectory contains no frames")]
    EmptyTrajectory,
}
