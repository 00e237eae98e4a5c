//! Provides input/output functionality for indentation simulation output.
//!
//! Trajectories are streamed frame by frame through the [`traits::TrajectoryFile`] interface,
//! with [`dump::LammpsDump`] as the text dump implementation. The indenter timeseries is read
//! into an [`IndentationTable`](crate::core::models::table::IndentationTable) by
//! [`timeseries::IndentFile`], and finished tables are exported as CSV by [`table`].

pub mod dump;
pub mod table;
pub mod timeseries;
pub mod traits;
