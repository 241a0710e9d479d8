//! Aggregation and ordering over fetched tracks and audio features.
//!
//! - [`summarize`] - per-feature means for the bar chart
//! - [`join_audio_features`] - attach features to tracks by ID
//! - [`sort_by_feature`] - stable descending order by one feature
//!
//! Everything here is pure: inputs are borrowed, outputs are new values.

mod features;
mod join;
mod sort;
mod summary;

pub use features::Feature;
pub use join::join_audio_features;
pub use sort::sort_by_feature;
pub use summary::{SummaryStatistics, summarize};

/// Errors from the statistics pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("Insufficient data: at least one audio-feature record is required")]
    InsufficientData,

    #[error("{0} has no recommendation slider")]
    NoSlider(Feature),
}
