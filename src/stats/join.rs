//! Attach audio features to tracks by ID.

use std::collections::HashMap;

use crate::spotify::{AudioFeatures, EnrichedTrack, Track};

/// Pair each track with the audio features sharing its ID.
///
/// Output has the same length and order as `tracks`. Tracks without a
/// match get `None`. When `features` repeats an ID, the first record wins.
pub fn join_audio_features(tracks: &[Track], features: &[AudioFeatures]) -> Vec<EnrichedTrack> {
    let mut by_id: HashMap<&str, &AudioFeatures> = HashMap::with_capacity(features.len());
    for f in features {
        by_id.entry(f.id.as_str()).or_insert(f);
    }

    tracks
        .iter()
        .map(|track| EnrichedTrack {
            track: track.clone(),
            audio_features: by_id.get(track.id.as_str()).map(|&f| f.clone()),
        })
        .collect()
}
