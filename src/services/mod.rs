//! Calculation engine.
//!
//! Leaf-first: [`positions`] and [`houses`] depend only on the ephemeris
//! seam; [`aspects`] reads position output; [`chart`] composes all stages
//! into one [`crate::models::ChartResult`]; [`points`] is an optional
//! post-pass deriving non-body chart points.

pub mod aspects;
pub mod chart;
pub mod houses;
pub mod points;
pub mod positions;

pub use chart::ChartEngine;
