//! Per-feature averages over a set of audio features.

use super::{Feature, StatsError};
use crate::spotify::AudioFeatures;

/// Arithmetic mean of every [`Feature`] across one audio-feature set.
///
/// Always computed from the whole set; there is no incremental update.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    /// Number of records the means were computed over
    pub count: usize,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub instrumentalness: f64,
    pub tempo: f64,
    pub loudness: f64,
}

impl SummaryStatistics {
    /// Mean of one feature
    pub fn mean(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Valence => self.valence,
            Feature::Acousticness => self.acousticness,
            Feature::Liveness => self.liveness,
            Feature::Speechiness => self.speechiness,
            Feature::Instrumentalness => self.instrumentalness,
            Feature::Tempo => self.tempo,
            Feature::Loudness => self.loudness,
        }
    }

    /// Mean as a rounded 0-100 percentage.
    ///
    /// `None` for tempo and loudness, which have no unit scale.
    pub fn percentage(&self, feature: Feature) -> Option<u8> {
        if !feature.is_unit_interval() {
            return None;
        }
        Some(to_percentage(self.mean(feature)))
    }

    /// Caption and percentage for each bar-chart feature
    pub fn bars(&self) -> Vec<(&'static str, u8)> {
        Feature::UNIT
            .iter()
            .map(|&f| (f.caption(), to_percentage(self.mean(f))))
            .collect()
    }
}

/// Compute per-feature means.
///
/// Fails with [`StatsError::InsufficientData`] on an empty slice.
pub fn summarize(features: &[AudioFeatures]) -> Result<SummaryStatistics, StatsError> {
    if features.is_empty() {
        return Err(StatsError::InsufficientData);
    }

    let mean = |feature: Feature| {
        let sum: f64 = features.iter().map(|f| feature.value(f)).sum();
        sum / features.len() as f64
    };

    Ok(SummaryStatistics {
        count: features.len(),
        danceability: mean(Feature::Danceability),
        energy: mean(Feature::Energy),
        valence: mean(Feature::Valence),
        acousticness: mean(Feature::Acousticness),
        liveness: mean(Feature::Liveness),
        speechiness: mean(Feature::Speechiness),
        instrumentalness: mean(Feature::Instrumentalness),
        tempo: mean(Feature::Tempo),
        loudness: mean(Feature::Loudness),
    })
}

fn to_percentage(mean: f64) -> u8 {
    if mean.is_nan() {
        return 0;
    }
    (mean * 100.0).round().clamp(0.0, 100.0) as u8
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_utils::mock_features;
    use proptest::prelude::*;

    proptest! {
        /// The mean lies within [min, max] of the inputs
        #[test]
        fn mean_within_bounds(values in prop::collection::vec(0.0f64..=1.0, 1..100)) {
            let features: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, v)| mock_features(&format!("t{}", i), *v))
                .collect();

            let stats = summarize(&features).unwrap();

            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(stats.danceability >= min - 1e-9);
            prop_assert!(stats.danceability <= max + 1e-9);
        }

        /// The mean equals sum / count
        #[test]
        fn mean_is_arithmetic_mean(values in prop::collection::vec(-60.0f64..200.0, 1..100)) {
            let features: Vec<_> = values
                .iter()
                .map(|v| AudioFeatures { tempo: *v, ..mock_features("t", 0.5) })
                .collect();

            let stats = summarize(&features).unwrap();

            let expected = values.iter().sum::<f64>() / values.len() as f64;
            prop_assert!((stats.tempo - expected).abs() < 1e-6);
            prop_assert_eq!(stats.count, values.len());
        }

        /// Percentages always stay inside 0..=100
        #[test]
        fn percentage_in_range(values in prop::collection::vec(0.0f64..=1.0, 1..50)) {
            let features: Vec<_> = values
                .iter()
                .map(|v| mock_features("t", *v))
                .collect();
            let stats = summarize(&features).unwrap();
            for feature in Feature::UNIT {
                let pct = stats.percentage(feature).unwrap();
                prop_assert!(pct <= 100);
            }
        }
    }
}
