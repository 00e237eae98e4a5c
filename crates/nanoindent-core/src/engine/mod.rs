//! # Engine Module
//!
//! The computational layer between the stateless [`core`](crate::core) building blocks and the
//! [`workflows`](crate::workflows) session API.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Physical parameters of the analysis and their validation
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - The umbrella error type every operation returns
//! - **Tasks** (`tasks`) - Streaming per-frame trajectory passes (contact atoms, elliptical
//!   contact area, coordination histograms) whose results are joined onto the timeseries rows
//!   by timestep

pub mod config;
pub mod error;
pub mod progress;
pub(crate) mod tasks;
