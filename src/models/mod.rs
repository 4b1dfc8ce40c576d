//! Domain model for chart computation.

pub mod aspects;
pub mod bodies;
pub mod chart;
pub mod time;

pub use aspects::{AspectKind, AspectSpec, ASPECT_TABLE};
pub use bodies::{format_degree, Body, ZodiacSign, BODIES, SIGNS};
pub use chart::{Aspect, BodyPosition, ChartResult, Diagnostic, HouseCusp};
pub use time::JulianDate;
