//! Season statistics for a football team, derived from per-match event logs.
//!
//! Match tables are loaded from a directory ([`store`]), classified and
//! aggregated into per-player metric records ([`stats::aggregate`]), and
//! reduced into chart-ready series per player ([`stats::series`]).
//! [`SeasonAnalyst`] ties these together behind one entry point.

mod analyst;
mod error;
pub mod matching;
pub mod model;
pub mod stats;
pub mod store;

pub use analyst::SeasonAnalyst;
pub use error::{Result, StatsError};
pub use model::*;
pub use stats::aggregate::{AggregationConfig, DEFAULT_THRESHOLD};
pub use stats::cache::{SeriesCache, SeriesKey, SeriesKind};
pub use stats::extract::PlayerExtractor;
pub use stats::heatmap::HeatmapParams;
pub use store::artifact::ARTIFACT_SUFFIX;
