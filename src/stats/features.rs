//! The fixed set of audio features the dashboard aggregates and sorts by.

use std::fmt;
use std::str::FromStr;

use crate::spotify::AudioFeatures;

/// A numeric audio feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Liveness,
    Speechiness,
    Instrumentalness,
    Tempo,
    Loudness,
}

impl Feature {
    /// Every feature, in display order
    pub const ALL: [Feature; 9] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Acousticness,
        Feature::Liveness,
        Feature::Speechiness,
        Feature::Instrumentalness,
        Feature::Tempo,
        Feature::Loudness,
    ];

    /// Features scored in [0, 1], shown as percentage bars
    pub const UNIT: [Feature; 7] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Acousticness,
        Feature::Liveness,
        Feature::Speechiness,
        Feature::Instrumentalness,
    ];

    /// Read this feature from a record
    pub fn value(self, features: &AudioFeatures) -> f64 {
        match self {
            Feature::Danceability => features.danceability,
            Feature::Energy => features.energy,
            Feature::Valence => features.valence,
            Feature::Acousticness => features.acousticness,
            Feature::Liveness => features.liveness,
            Feature::Speechiness => features.speechiness,
            Feature::Instrumentalness => features.instrumentalness,
            Feature::Tempo => features.tempo,
            Feature::Loudness => features.loudness,
        }
    }

    /// Whether the feature lives in [0, 1]
    pub fn is_unit_interval(self) -> bool {
        !matches!(self, Feature::Tempo | Feature::Loudness)
    }

    /// Lowercase key used on the command line and in config
    pub fn key(self) -> &'static str {
        match self {
            Feature::Danceability => "danceability",
            Feature::Energy => "energy",
            Feature::Valence => "valence",
            Feature::Acousticness => "acousticness",
            Feature::Liveness => "liveness",
            Feature::Speechiness => "speechiness",
            Feature::Instrumentalness => "instrumentalness",
            Feature::Tempo => "tempo",
            Feature::Loudness => "loudness",
        }
    }

    /// Human-readable label
    pub fn caption(self) -> &'static str {
        match self {
            Feature::Danceability => "Danceability",
            Feature::Energy => "Energy",
            Feature::Valence => "Valence",
            Feature::Acousticness => "Acousticness",
            Feature::Liveness => "Liveliness",
            Feature::Speechiness => "Speechiness",
            Feature::Instrumentalness => "Instrumentalness",
            Feature::Tempo => "Tempo",
            Feature::Loudness => "Loudness",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Feature::ALL
            .into_iter()
            .find(|f| f.key() == lower)
            .ok_or_else(|| {
                let known: Vec<_> = Feature::ALL.iter().map(|f| f.key()).collect();
                format!("unknown feature '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
