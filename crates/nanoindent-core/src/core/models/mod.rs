//! # Core Models Module
//!
//! Data structures shared by the I/O, analysis and workflow layers.
//!
//! - [`frame`] - One trajectory snapshot: timestep, box and particle coordinates
//! - [`simbox`] - Orthogonal simulation box with per-axis periodicity
//! - [`table`] - The indentation timeseries with base and derived columns

pub mod frame;
pub mod simbox;
pub mod table;
