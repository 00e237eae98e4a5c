//! # nanoindent Core Library
//!
//! Post-processing of molecular-dynamics nanoindentation simulations. The library reads the
//! indenter timeseries written during the run together with the particle trajectory, derives
//! mechanical-response columns (displacement, strain, contact area, stress, coordination) and
//! renders the classic indentation curves.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Frame`, `IndentationTable`), file I/O
//!   for LAMMPS dumps and indenter timeseries, pure per-frame analysis functions, unit constants
//!   and chart rendering.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error handling, progress reporting and the
//!   per-frame trajectory tasks that walk every frame and join their scalar results back onto the
//!   timeseries by timestep.
//!
//! - **[`workflows`]: The Public API.** The [`workflows::indentation::Indentation`] session, whose
//!   methods add columns on demand, and the plot recipes built on top of it.

pub mod core;
pub mod engine;
pub mod workflows;
