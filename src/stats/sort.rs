//! Order enriched tracks by a feature.

use std::cmp::Ordering;

use super::Feature;
use crate::spotify::EnrichedTrack;

/// Stable descending sort by `feature`, returning a new vector.
///
/// Total order: numbers high to low, then NaN, then tracks without audio
/// features. Ties keep their input order.
pub fn sort_by_feature(tracks: &[EnrichedTrack], feature: Feature) -> Vec<EnrichedTrack> {
    let mut sorted = tracks.to_vec();
    sorted.sort_by(|a, b| compare_desc(a, b, feature));
    sorted
}

fn compare_desc(a: &EnrichedTrack, b: &EnrichedTrack, feature: Feature) -> Ordering {
    let key = |t: &EnrichedTrack| t.audio_features.as_ref().map(|f| feature.value(f));

    match (key(a), key(b)) {
        (Some(x), Some(y)) => match (x.is_nan(), y.is_nan()) {
            (false, false) => y.total_cmp(&x),
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::AudioFeatures;
    use crate::test_utils::{enriched, mock_features, mock_track};

    fn ids(tracks: &[EnrichedTrack]) -> Vec<&str> {
        tracks.iter().map(|t| t.track.id.as_str()).collect()
    }

    #[test]
    fn test_sorts_descending() {
        let tracks = vec![
            enriched("low", Some(0.1)),
            enriched("high", Some(0.9)),
            enriched("mid", Some(0.5)),
        ];

        let sorted = sort_by_feature(&tracks, Feature::Danceability);

        assert_eq!(ids(&sorted), vec!["high", "mid", "low"]);
        // Input untouched
        assert_eq!(ids(&tracks), vec!["low", "high", "mid"]);
    }

    #[test]
    fn test_missing_features_sort_last_in_input_order() {
        let tracks = vec![
            enriched("none-1", None),
            enriched("a", Some(0.2)),
            enriched("none-2", None),
            enriched("b", Some(0.8)),
        ];

        let sorted = sort_by_feature(&tracks, Feature::Danceability);

        assert_eq!(ids(&sorted), vec!["b", "a", "none-1", "none-2"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let tracks = vec![
            enriched("first", Some(0.5)),
            enriched("second", Some(0.5)),
            enriched("third", Some(0.5)),
        ];

        let sorted = sort_by_feature(&tracks, Feature::Danceability);

        assert_eq!(ids(&sorted), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_nan_sorts_after_numbers() {
        let nan_track = EnrichedTrack {
            track: mock_track("nan"),
            audio_features: Some(AudioFeatures {
                tempo: f64::NAN,
                ..mock_features("nan", 0.5)
            }),
        };
        let fast = EnrichedTrack {
            track: mock_track("fast"),
            audio_features: Some(AudioFeatures {
                tempo: 170.0,
                ..mock_features("fast", 0.5)
            }),
        };
        let tracks = vec![enriched("none", None), nan_track, fast];

        let sorted = sort_by_feature(&tracks, Feature::Tempo);

        assert_eq!(ids(&sorted), vec!["fast", "nan", "none"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_by_feature(&[], Feature::Energy).is_empty());
    }
}
