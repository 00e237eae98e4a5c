//! Pure analysis functions.
//!
//! [`contact`] and [`coordination`] operate on a single [`Frame`](crate::core::models::frame::Frame);
//! [`mechanics`] turns whole timeseries columns into displacement, strain, area and stress.

pub mod contact;
pub mod coordination;
pub mod mechanics;
