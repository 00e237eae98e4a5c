//! # Workflows Module
//!
//! The public entry points of the library.
//!
//! - **Indentation Session** ([`indentation`]) - [`Indentation`](indentation::Indentation)
//!   loads the indenter timeseries and adds derived columns on demand: displacement, strain,
//!   contact atoms and their percentage, contact and elliptical contact area, stress, and the
//!   coordination-number histogram.
//! - **Plots** ([`plots`]) - The indentation curves, each of which computes the columns it needs
//!   before rendering to SVG.

pub mod indentation;
pub mod plots;
