//! # Core Module
//!
//! Fundamental building blocks for indentation post-processing.
//!
//! - **Data Models** ([`models`]) - Trajectory frames, simulation boxes and the column table
//! - **File I/O** ([`io`]) - LAMMPS dump trajectories, indenter timeseries and CSV export
//! - **Analysis** ([`analysis`]) - Per-frame geometry (contact atoms, elliptical area,
//!   coordination numbers) and the scalar mechanics formulas
//! - **Plotting** ([`plot`]) - Line charts rendered to SVG
//! - **Units** ([`units`]) - Conversion factors between LAMMPS metal units and reported units

pub mod analysis;
pub mod io;
pub mod models;
pub mod plot;
pub mod units;
