//! Test utilities and fixtures for playlist-lens tests.
//!
//! Factories return values with sensible defaults; customise them with
//! struct update syntax:
//!
//! ```ignore
//! let loud = AudioFeatures {
//!     loudness: -2.0,
//!     ..mock_features("t1", 0.5)
//! };
//! ```

use crate::spotify::{AudioFeatures, EnrichedTrack, Page, Playlist, Track};

/// Creates a mock Track with the given ID.
pub fn mock_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        title: format!("Track {}", id),
        artist: "Test Artist".to_string(),
        album_art_url: Some(format!("https://img.example.com/{}.jpg", id)),
        uri: format!("spotify:track:{}", id),
    }
}

/// Creates mock tracks for each ID, in order.
pub fn mock_tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| mock_track(id)).collect()
}

/// Creates mock AudioFeatures with the given danceability.
///
/// Other unit features sit at 0.5, tempo at 120 BPM, loudness at -6 dB.
pub fn mock_features(id: &str, danceability: f64) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        danceability,
        energy: 0.5,
        valence: 0.5,
        acousticness: 0.5,
        liveness: 0.5,
        speechiness: 0.5,
        instrumentalness: 0.5,
        tempo: 120.0,
        loudness: -6.0,
        time_signature: 4,
    }
}

/// Creates an EnrichedTrack, with features only when `danceability` is set.
pub fn enriched(id: &str, danceability: Option<f64>) -> EnrichedTrack {
    EnrichedTrack {
        track: mock_track(id),
        audio_features: danceability.map(|d| mock_features(id, d)),
    }
}

/// Creates a page with the given tracks and continuation URL.
pub fn mock_page(ids: &[&str], next: Option<&str>) -> Page<Track> {
    Page {
        items: mock_tracks(ids),
        next: next.map(String::from),
        total: ids.len() as u32,
    }
}

/// Creates a playlist whose first page holds `ids`.
pub fn mock_playlist(id: &str, ids: &[&str], next: Option<&str>) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: format!("Playlist {}", id),
        owner: Some("Test Owner".to_string()),
        followers: 3,
        image_url: None,
        tracks: mock_page(ids, next),
    }
}
