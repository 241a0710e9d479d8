//! Web API HTTP client
//!
//! Thin wrapper around `reqwest` that adds bearer auth, a per-request
//! timeout and status-code mapping. Parsing is delegated to the DTOs and
//! conversion to the adapter.
//!
//! ## API Quirks
//!
//! ### Continuation URLs
//! Paging objects carry an absolute `next` URL that already includes
//! offset and limit. We request it as-is instead of rebuilding the query.
//!
//! ### Batched audio features
//! `/audio-features` accepts at most 100 comma-separated IDs per request.
//! Larger ID lists are split and the batches fetched concurrently.

use std::time::Duration;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;

use super::adapter::{self, ArtChoice};
use super::dto;
use crate::spotify::domain::{
    ApiError, AudioFeatures, FeatureTargets, Page, Playlist, TimeRange, Track,
};

/// Maximum IDs per `/audio-features` request
pub const AUDIO_FEATURES_BATCH: usize = 100;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.spotify.com/v1";

/// User agent string
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Web API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
    timeout: Duration,
}

impl SpotifyClient {
    /// Create a new client
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            timeout,
        })
    }

    /// Fetch a playlist header and its first page of tracks
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<Playlist, ApiError> {
        let url = format!(
            "{}/playlists/{}",
            self.base_url,
            urlencoding::encode(playlist_id)
        );
        let response: dto::PlaylistResponse = self.get_json(&url).await?;
        Ok(adapter::to_playlist(response))
    }

    /// Follow a playlist continuation URL
    pub async fn get_playlist_page(&self, next_url: &str) -> Result<Page<Track>, ApiError> {
        let response: dto::Paging<dto::PlaylistItem> = self.get_json(next_url).await?;
        Ok(adapter::to_playlist_page(response))
    }

    /// Fetch audio features for the given track IDs
    ///
    /// IDs the API doesn't know are silently absent from the result.
    pub async fn get_audio_features(&self, ids: &[String]) -> Result<Vec<AudioFeatures>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let batches = ids.chunks(AUDIO_FEATURES_BATCH).map(|chunk| async move {
            let url = format!(
                "{}/audio-features?ids={}",
                self.base_url,
                urlencoding::encode(&chunk.join(","))
            );
            let response: dto::AudioFeaturesResponse = self.get_json(&url).await?;
            Ok::<_, ApiError>(adapter::to_audio_features(response))
        });

        let results = try_join_all(batches).await?;
        Ok(results.into_iter().flatten().collect())
    }

    /// Fetch the user's top tracks for a time range
    pub async fn get_top_tracks(
        &self,
        range: TimeRange,
        limit: u32,
    ) -> Result<Page<Track>, ApiError> {
        let url = format!(
            "{}/me/top/tracks?time_range={}&limit={}",
            self.base_url,
            range.as_param(),
            limit
        );
        let response: dto::Paging<dto::TrackObject> = self.get_json(&url).await?;
        Ok(adapter::to_track_page(response, ArtChoice::First))
    }

    /// Free-text track search
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>, ApiError> {
        let url = format!(
            "{}/search?q={}&type=track&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        let response: dto::SearchResponse = self.get_json(&url).await?;
        Ok(adapter::to_track_page(response.tracks, ArtChoice::Smallest).items)
    }

    /// Recommendations seeded by one track, steered by slider targets
    pub async fn get_recommendations(
        &self,
        seed_track_id: &str,
        targets: &FeatureTargets,
    ) -> Result<Vec<Track>, ApiError> {
        let mut url = format!(
            "{}/recommendations?seed_tracks={}",
            self.base_url,
            urlencoding::encode(seed_track_id)
        );
        for (name, value) in targets.as_params() {
            url.push_str(&format!("&{}={}", name, value));
        }

        let response: dto::RecommendationsResponse = self.get_json(&url).await?;
        Ok(adapter::to_tracks(response.tracks, ArtChoice::First))
    }

    /// Send an authenticated GET and parse the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);

        let request = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send();

        let response = tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| ApiError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = tokio::time::timeout(self.timeout, response.text())
                .await
                .map_err(|_| ApiError::Timeout(self.timeout.as_secs()))?
                .unwrap_or_default();
            return Err(status_error(status, url, &body));
        }

        let body = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| ApiError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

/// Map a non-success status (and optional error body) to an [`ApiError`]
fn status_error(status: reqwest::StatusCode, url: &str, body: &str) -> ApiError {
    match status {
        reqwest::StatusCode::NOT_FOUND => ApiError::NotFound(url.to_string()),
        reqwest::StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        reqwest::StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
        _ => {
            let message = serde_json::from_str::<dto::ErrorResponse>(body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    let reason = status.canonical_reason().unwrap_or("Unknown");
                    let excerpt: String = body.chars().take(200).collect();
                    if excerpt.is_empty() {
                        reason.to_string()
                    } else {
                        format!("{} - {}", reason, excerpt)
                    }
                });
            ApiError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn client(base_url: &str) -> SpotifyClient {
        SpotifyClient::new("token", base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client(DEFAULT_BASE_URL);
        assert_eq!(client.base_url, "https://api.spotify.com/v1");
        assert_eq!(client.access_token, "token");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client("http://localhost:8080/v1/");
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("playlist-lens/"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "http://x/playlists/p", ""),
            ApiError::NotFound("http://x/playlists/p".to_string())
        );
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, "u", ""),
            ApiError::Unauthorized
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "u", ""),
            ApiError::RateLimited
        );
    }

    #[test]
    fn test_status_uses_error_body_message() {
        let body = r#"{"error": {"status": 400, "message": "invalid id"}}"#;
        let err = status_error(StatusCode::BAD_REQUEST, "u", body);
        assert_eq!(
            err,
            ApiError::Api {
                status: 400,
                message: "invalid id".to_string()
            }
        );
    }

    #[test]
    fn test_status_without_json_body() {
        let err = status_error(StatusCode::BAD_GATEWAY, "u", "");
        assert_eq!(
            err,
            ApiError::Api {
                status: 502,
                message: "Bad Gateway".to_string()
            }
        );
    }

    /// Serve one connection: send `head` and `body_start`, then stall
    fn stalling_server(head: &'static str, body_start: &'static str) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(body_start.as_bytes());
                let _ = stream.flush();
                std::thread::sleep(Duration::from_secs(4));
            }
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_stalled_error_body_times_out() {
        let base = stalling_server(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n",
            "{",
        );
        let client = SpotifyClient::new("token", base, Duration::from_secs(1)).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(3), client.get_playlist("x")).await;

        assert_eq!(result.expect("client timeout should fire first").unwrap_err(), ApiError::Timeout(1));
    }

    #[tokio::test]
    async fn test_stalled_success_body_times_out() {
        let base = stalling_server(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n",
            "{",
        );
        let client = SpotifyClient::new("token", base, Duration::from_secs(1)).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(3), client.get_playlist("x")).await;

        assert_eq!(result.expect("client timeout should fire first").unwrap_err(), ApiError::Timeout(1));
    }

    #[tokio::test]
    async fn test_empty_id_list_makes_no_request() {
        // Unroutable base URL: any request would fail
        let client = client("http://127.0.0.1:9");
        let features = client.get_audio_features(&[]).await.unwrap();
        assert!(features.is_empty());
    }
}
