//! # natal-core
//!
//! Natal chart computation engine.
//!
//! Given a UTC birth instant and geographic coordinates, this crate derives
//! the ecliptic positions of ten celestial bodies, the twelve astrological
//! houses (a documented Placidus-style approximation), and the angular
//! aspects between bodies. The result is a single immutable [`ChartResult`]
//! consumed by rendering, interpretation, and numerology layers, none of
//! which live here.
//!
//! ## Architecture
//!
//! - [`api`]: request/response DTOs for callers
//! - [`models`]: domain types — bodies, zodiac signs, aspect table, chart
//!   result, Julian-date time handling
//! - [`ephemeris`]: the ephemeris provider seam (trait) plus the built-in
//!   analytic provider
//! - [`services`]: the calculation engine — positions, houses, aspects, and
//!   the chart pipeline
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use natal_core::api::ChartRequest;
//! use natal_core::ephemeris::AnalyticEphemeris;
//! use natal_core::services::ChartEngine;
//!
//! let engine = ChartEngine::new(AnalyticEphemeris::new()).unwrap();
//! let request = ChartRequest {
//!     instant: Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap(),
//!     latitude: 0.0,
//!     longitude: 0.0,
//! };
//! let chart = engine.compute(&request).unwrap();
//! assert_eq!(chart.bodies.len(), 10);
//! assert_eq!(chart.houses.len(), 12);
//! ```
//!
//! ## Determinism
//!
//! Chart computation is a pure function of its inputs: no wall-clock reads,
//! no randomness, no shared mutable state. Identical requests produce
//! byte-identical serialized results.

pub mod angles;
pub mod api;
pub mod ephemeris;
pub mod error;
pub mod models;
pub mod services;

pub use api::ChartRequest;
pub use error::{ChartError, Result};
pub use models::{Aspect, BodyPosition, ChartResult, Diagnostic, HouseCusp};
