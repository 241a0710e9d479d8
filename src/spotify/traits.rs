//! Trait definition for the Web API client.
//!
//! The session controller only talks to [`SpotifyApi`], so tests can
//! substitute the mock in [`mocks`] for the real HTTP client.

use async_trait::async_trait;

use super::client::SpotifyClient;
use super::domain::{ApiError, AudioFeatures, FeatureTargets, Page, Playlist, TimeRange, Track};

/// Read-only operations the dashboard needs from the Web API.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Playlist header plus first page of tracks.
    async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist, ApiError>;

    /// Follow a playlist continuation URL.
    async fn get_playlist_page(&self, next_url: &str) -> Result<Page<Track>, ApiError>;

    /// Audio features for a set of track IDs.
    async fn get_audio_features(&self, ids: &[String]) -> Result<Vec<AudioFeatures>, ApiError>;

    /// The user's top tracks for a time range.
    async fn get_top_tracks(&self, range: TimeRange, limit: u32) -> Result<Page<Track>, ApiError>;

    /// Free-text track search.
    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, ApiError>;

    /// Recommendations from a seed track and slider targets.
    async fn get_recommendations(
        &self,
        seed_track_id: &str,
        targets: &FeatureTargets,
    ) -> Result<Vec<Track>, ApiError>;
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist, ApiError> {
        self.get_playlist(playlist_id).await
    }

    async fn get_playlist_page(&self, next_url: &str) -> Result<Page<Track>, ApiError> {
        self.get_playlist_page(next_url).await
    }

    async fn get_audio_features(&self, ids: &[String]) -> Result<Vec<AudioFeatures>, ApiError> {
        self.get_audio_features(ids).await
    }

    async fn get_top_tracks(&self, range: TimeRange, limit: u32) -> Result<Page<Track>, ApiError> {
        self.get_top_tracks(range, limit).await
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, ApiError> {
        self.search_tracks(query, limit).await
    }

    async fn get_recommendations(
        &self,
        seed_track_id: &str,
        targets: &FeatureTargets,
    ) -> Result<Vec<Track>, ApiError> {
        self.get_recommendations(seed_track_id, targets).await
    }
}
