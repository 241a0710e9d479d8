//! Web API Data Transfer Objects
//!
//! These types match what the Web API returns for the endpoints we call.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! Only the fields we read are declared; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Generic paging object (`items` + `next` continuation URL)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Absolute URL of the next page, `null` on the last page
    pub next: Option<String>,
    #[serde(default)]
    pub total: u32,
}

/// `GET /playlists/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub owner: Option<Owner>,
    pub followers: Option<Followers>,
    pub tracks: Paging<PlaylistItem>,
}

/// Playlist owner
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Owner {
    pub id: String,
    pub display_name: Option<String>,
}

/// Follower count wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u32,
}

/// Playlist entry; `track` is `null` for removed or unavailable items
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: Option<TrackObject>,
}

/// Full track object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackObject {
    /// `null` for local files
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    pub album: Option<AlbumObject>,
    pub duration_ms: Option<u64>,
}

/// Simplified artist
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistObject {
    pub id: Option<String>,
    pub name: String,
}

/// Simplified album
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumObject {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Image reference; dimensions are `null` for user-uploaded images
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// `GET /audio-features?ids=...`
///
/// Unknown IDs come back as `null` entries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeaturesObject>>,
}

/// Audio features for one track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeaturesObject {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub instrumentalness: f64,
    pub tempo: f64,
    pub loudness: f64,
    #[serde(default)]
    pub time_signature: u32,
}

/// `GET /search?type=track`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: Paging<TrackObject>,
}

/// `GET /recommendations`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<TrackObject>,
}

/// Error envelope: `{"error": {"status": 404, "message": "..."}}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_playlist_with_null_track() {
        let json = r#"{
            "id": "pl-1",
            "name": "Road Trip",
            "images": [{"url": "https://img/pl.jpg", "height": 640, "width": 640}],
            "owner": {"id": "u1", "display_name": "Sam"},
            "followers": {"href": null, "total": 12},
            "tracks": {
                "href": "https://api/playlists/pl-1/tracks",
                "items": [
                    {
                        "added_at": "2021-01-01T00:00:00Z",
                        "track": {
                            "id": "t1",
                            "name": "First",
                            "uri": "spotify:track:t1",
                            "artists": [{"id": "a1", "name": "Artist One"}],
                            "album": {"id": "al1", "name": "Album", "images": []},
                            "duration_ms": 200000
                        }
                    },
                    {"added_at": null, "track": null}
                ],
                "next": "https://api/playlists/pl-1/tracks?offset=100",
                "total": 150
            }
        }"#;

        let playlist: PlaylistResponse =
            serde_json::from_str(json).expect("Should parse playlist");

        assert_eq!(playlist.name, "Road Trip");
        assert_eq!(playlist.followers.unwrap().total, 12);
        assert_eq!(playlist.tracks.items.len(), 2);
        assert!(playlist.tracks.items[1].track.is_none());
        assert_eq!(playlist.tracks.total, 150);
        assert!(playlist.tracks.next.is_some());
    }

    #[test]
    fn test_parse_last_page() {
        let json = r#"{"items": [], "next": null, "total": 0, "offset": 100, "limit": 100}"#;
        let page: Paging<PlaylistItem> = serde_json::from_str(json).expect("Should parse page");
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_parse_audio_features_with_null_entry() {
        let json = r#"{
            "audio_features": [
                {
                    "id": "t1",
                    "danceability": 0.5,
                    "energy": 0.8,
                    "key": 5,
                    "loudness": -6.2,
                    "mode": 1,
                    "speechiness": 0.04,
                    "acousticness": 0.1,
                    "instrumentalness": 0.0,
                    "liveness": 0.12,
                    "valence": 0.6,
                    "tempo": 120.0,
                    "type": "audio_features",
                    "duration_ms": 200000,
                    "time_signature": 4
                },
                null
            ]
        }"#;

        let response: AudioFeaturesResponse =
            serde_json::from_str(json).expect("Should parse audio features");

        assert_eq!(response.audio_features.len(), 2);
        let first = response.audio_features[0].as_ref().unwrap();
        assert_eq!(first.id, "t1");
        assert_eq!(first.tempo, 120.0);
        assert_eq!(first.time_signature, 4);
        assert!(response.audio_features[1].is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "tracks": {
                "items": [{
                    "id": "t9",
                    "name": "Found",
                    "uri": "spotify:track:t9",
                    "artists": [{"id": "a9", "name": "Searcher"}],
                    "album": {
                        "id": "al9",
                        "name": "Results",
                        "images": [
                            {"url": "big", "height": 640, "width": 640},
                            {"url": "small", "height": 64, "width": 64}
                        ]
                    }
                }],
                "next": null,
                "total": 1
            }
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse search");
        assert_eq!(response.tracks.items[0].name, "Found");
        assert_eq!(response.tracks.items[0].album.as_ref().unwrap().images.len(), 2);
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{"error": {"status": 401, "message": "The access token expired"}}"#;
        let error: ErrorResponse = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error.status, 401);
        assert_eq!(error.error.message, "The access token expired");
    }
}
