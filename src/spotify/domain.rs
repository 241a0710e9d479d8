//! Internal domain models for tracks, playlists and audio features.
//!
//! These types are OUR types - they don't change when the Web API changes.
//! All API responses get converted into these types via the adapter.

use std::fmt;
use std::str::FromStr;

/// A track as shown in lists and used for joins
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    /// Track ID (unique within a result set)
    pub id: String,
    /// Display title
    pub title: String,
    /// First credited artist
    pub artist: String,
    /// Album art URL (if the album has any images)
    pub album_art_url: Option<String>,
    /// Track URI (`spotify:track:...`)
    pub uri: String,
}

/// Audio analysis scores for a single track
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioFeatures {
    /// Matches [`Track::id`]
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub instrumentalness: f64,
    /// Beats per minute
    pub tempo: f64,
    /// Overall loudness in dB (typically -60..0)
    pub loudness: f64,
    pub time_signature: u32,
}

/// A track with its audio features attached once the join succeeds.
///
/// `audio_features` being `None` is a normal state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrack {
    pub track: Track,
    pub audio_features: Option<AudioFeatures>,
}

/// One page of a paginated result set
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation URL; `None` once the set is complete
    pub next: Option<String>,
    /// Total number of items across all pages
    pub total: u32,
}

impl<T> Page<T> {
    /// A single, complete page
    pub fn last(items: Vec<T>) -> Self {
        let total = items.len() as u32;
        Self {
            items,
            next: None,
            total,
        }
    }
}

/// Playlist header plus its first page of tracks
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
    pub followers: u32,
    pub image_url: Option<String>,
    pub tracks: Page<Track>,
}

/// Listening-history window for top tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    /// Roughly the last 4 weeks
    #[default]
    Short,
    /// Roughly the last 6 months
    Medium,
    /// Several years of history
    Long,
}

impl TimeRange {
    /// Value of the `time_range` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" | "short_term" => Ok(TimeRange::Short),
            "medium" | "medium_term" => Ok(TimeRange::Medium),
            "long" | "long_term" => Ok(TimeRange::Long),
            other => Err(format!(
                "unknown time range '{}' (expected short, medium or long)",
                other
            )),
        }
    }
}

/// Slider positions (0-100) for recommendation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureTargets {
    pub acousticness: u8,
    pub danceability: u8,
    pub energy: u8,
    pub instrumentalness: u8,
    pub liveness: u8,
    pub speechiness: u8,
    pub valence: u8,
}

impl Default for FeatureTargets {
    fn default() -> Self {
        Self {
            acousticness: 50,
            danceability: 50,
            energy: 50,
            instrumentalness: 50,
            liveness: 50,
            speechiness: 50,
            valence: 50,
        }
    }
}

impl FeatureTargets {
    /// Query parameter name and 0-1 target for each slider.
    ///
    /// Slider values above 100 are clamped.
    pub fn as_params(&self) -> [(&'static str, f64); 7] {
        let unit = |v: u8| f64::from(v.min(100)) / 100.0;
        [
            ("target_acousticness", unit(self.acousticness)),
            ("target_danceability", unit(self.danceability)),
            ("target_energy", unit(self.energy)),
            ("target_instrumentalness", unit(self.instrumentalness)),
            ("target_liveness", unit(self.liveness)),
            ("target_speechiness", unit(self.speechiness)),
            ("target_valence", unit(self.valence)),
        ]
    }
}

/// Errors that can occur while talking to the Web API
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access token rejected - request a new one")]
    Unauthorized,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_params() {
        assert_eq!(TimeRange::Short.as_param(), "short_term");
        assert_eq!(TimeRange::Medium.as_param(), "medium_term");
        assert_eq!(TimeRange::Long.as_param(), "long_term");
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!("short".parse::<TimeRange>(), Ok(TimeRange::Short));
        assert_eq!("MEDIUM".parse::<TimeRange>(), Ok(TimeRange::Medium));
        assert_eq!("long_term".parse::<TimeRange>(), Ok(TimeRange::Long));
        assert!("forever".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_targets_scale_to_unit_interval() {
        let targets = FeatureTargets {
            energy: 80,
            valence: 0,
            acousticness: 250,
            ..Default::default()
        };
        let params = targets.as_params();

        let get = |name: &str| params.iter().find(|(n, _)| *n == name).unwrap().1;
        assert_eq!(get("target_energy"), 0.8);
        assert_eq!(get("target_valence"), 0.0);
        assert_eq!(get("target_danceability"), 0.5);
        assert_eq!(get("target_acousticness"), 1.0);
    }

    #[test]
    fn test_single_page_is_complete() {
        let page = Page::last(vec![1, 2, 3]);
        assert!(page.next.is_none());
        assert_eq!(page.total, 3);
    }
}
