//! Dashboard view state and its pure update functions.
//!
//! All fetched data lives in one [`ViewState`]. Background fetches never
//! touch it directly: they send [`Message`]s that the owner feeds to
//! [`ViewState::apply`]. Each message carries the [`Generation`] of the
//! request that produced it, and messages from a superseded request are
//! dropped, so a slow response for an old playlist can never leak into
//! the new one.

use crate::spotify::{
    ApiError, AudioFeatures, EnrichedTrack, FeatureTargets, Playlist, TimeRange, Track,
};
use crate::stats::{self, Feature, StatsError, SummaryStatistics};

/// Request token; bumped every time a screen starts a new load
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    fn bump(&mut self) -> Generation {
        self.0 += 1;
        *self
    }
}

/// An event tagged with the request that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Stamped<E> {
    pub generation: Generation,
    pub event: E,
}

/// Progress of a track + audio-feature load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// Playlist metadata (playlist screen only)
    Header(PlaylistHeader),
    /// Another page of tracks
    Tracks(Vec<Track>),
    /// Audio features for some of the tracks
    AudioFeatures(Vec<AudioFeatures>),
    /// A request failed; data gathered so far stays
    Failed(ApiError),
    /// No more events will follow for this generation
    Finished,
}

/// Results for the playlist generator
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorEvent {
    SearchResults(Vec<Track>),
    SearchFailed(ApiError),
    Recommendations(Vec<Track>),
    RecommendFailed(ApiError),
}

/// Everything a background fetch can report
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Playlist(Stamped<LoadEvent>),
    TopTracks(Stamped<LoadEvent>),
    Search(Stamped<GeneratorEvent>),
    Recommend(Stamped<GeneratorEvent>),
}

/// Playlist metadata shown above the track list
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistHeader {
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
    pub followers: u32,
    pub image_url: Option<String>,
    pub total_tracks: u32,
}

impl From<&Playlist> for PlaylistHeader {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            owner: playlist.owner.clone(),
            followers: playlist.followers,
            image_url: playlist.image_url.clone(),
            total_tracks: playlist.tracks.total,
        }
    }
}

/// Tracks and audio features accumulated for one load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSet {
    pub tracks: Vec<Track>,
    pub audio_features: Vec<AudioFeatures>,
    /// Failures seen during the load, oldest first
    pub errors: Vec<ApiError>,
    pub loading: bool,
}

impl TrackSet {
    fn apply(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Header(_) => {}
            LoadEvent::Tracks(tracks) => self.tracks.extend(tracks),
            LoadEvent::AudioFeatures(features) => self.audio_features.extend(features),
            LoadEvent::Failed(error) => self.errors.push(error),
            LoadEvent::Finished => self.loading = false,
        }
    }

    /// Averages over every audio-feature record received so far
    pub fn summary(&self) -> Result<SummaryStatistics, StatsError> {
        stats::summarize(&self.audio_features)
    }

    /// Tracks joined with their features.
    ///
    /// `None` until both tracks and audio features have arrived.
    pub fn enriched(&self) -> Option<Vec<EnrichedTrack>> {
        if self.tracks.is_empty() || self.audio_features.is_empty() {
            return None;
        }
        Some(stats::join_audio_features(
            &self.tracks,
            &self.audio_features,
        ))
    }
}

/// Playlist screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistView {
    generation: Generation,
    pub playlist_id: Option<String>,
    pub header: Option<PlaylistHeader>,
    pub data: TrackSet,
    /// `None` keeps playlist order
    pub sort: Option<Feature>,
}

impl PlaylistView {
    /// Start loading `playlist_id`, discarding whatever was shown.
    ///
    /// The sort selection survives.
    pub fn request(&mut self, playlist_id: &str) -> Generation {
        self.playlist_id = Some(playlist_id.to_string());
        self.header = None;
        self.data = TrackSet {
            loading: true,
            ..Default::default()
        };
        self.generation.bump()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Apply an event; returns `false` if it belonged to an older request
    pub fn apply(&mut self, stamped: Stamped<LoadEvent>) -> bool {
        if stamped.generation != self.generation {
            return false;
        }
        match stamped.event {
            LoadEvent::Header(header) => self.header = Some(header),
            event => self.data.apply(event),
        }
        true
    }

    pub fn set_sort(&mut self, sort: Option<Feature>) {
        self.sort = sort;
    }

    /// Enriched tracks in display order
    pub fn sorted(&self) -> Option<Vec<EnrichedTrack>> {
        let enriched = self.data.enriched()?;
        Some(match self.sort {
            Some(feature) => stats::sort_by_feature(&enriched, feature),
            None => enriched,
        })
    }
}

/// Top-tracks screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopTracksView {
    generation: Generation,
    pub range: TimeRange,
    pub data: TrackSet,
}

impl TopTracksView {
    /// Switch to `range` and start a fresh load
    pub fn request(&mut self, range: TimeRange) -> Generation {
        self.range = range;
        self.data = TrackSet {
            loading: true,
            ..Default::default()
        };
        self.generation.bump()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn apply(&mut self, stamped: Stamped<LoadEvent>) -> bool {
        if stamped.generation != self.generation {
            return false;
        }
        self.data.apply(stamped.event);
        true
    }
}

/// Playlist generator: search, seed choice, sliders, results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorView {
    search_generation: Generation,
    recommend_generation: Generation,
    pub query: String,
    pub results: Vec<Track>,
    pub seed: Option<Track>,
    pub targets: FeatureTargets,
    pub recommendations: Option<Vec<Track>>,
    pub error: Option<ApiError>,
}

impl GeneratorView {
    /// Update the query; returns the generation for the matching search
    pub fn set_query(&mut self, query: &str) -> Generation {
        self.query = query.to_string();
        self.search_generation.bump()
    }

    /// Pick the seed track, clearing the search box and its results.
    ///
    /// Any search still in flight is invalidated.
    pub fn choose_seed(&mut self, track: Track) {
        self.seed = Some(track);
        self.query.clear();
        self.results.clear();
        self.search_generation.bump();
    }

    /// Move one slider. Values above 100 are clamped.
    ///
    /// Fails for tempo and loudness, which have no slider.
    pub fn set_target(&mut self, feature: Feature, value: u8) -> Result<(), StatsError> {
        let value = value.min(100);
        let slot = match feature {
            Feature::Acousticness => &mut self.targets.acousticness,
            Feature::Danceability => &mut self.targets.danceability,
            Feature::Energy => &mut self.targets.energy,
            Feature::Instrumentalness => &mut self.targets.instrumentalness,
            Feature::Liveness => &mut self.targets.liveness,
            Feature::Speechiness => &mut self.targets.speechiness,
            Feature::Valence => &mut self.targets.valence,
            Feature::Tempo | Feature::Loudness => return Err(StatsError::NoSlider(feature)),
        };
        *slot = value;
        Ok(())
    }

    /// Start a recommendation request for the current seed and sliders.
    ///
    /// `None` when no seed has been chosen.
    pub fn request_recommendations(&mut self) -> Option<(Generation, String, FeatureTargets)> {
        let seed_id = self.seed.as_ref()?.id.clone();
        self.error = None;
        Some((self.recommend_generation.bump(), seed_id, self.targets))
    }

    pub fn apply_search(&mut self, stamped: Stamped<GeneratorEvent>) -> bool {
        if stamped.generation != self.search_generation {
            return false;
        }
        match stamped.event {
            GeneratorEvent::SearchResults(results) => {
                self.results = results;
                self.error = None;
            }
            GeneratorEvent::SearchFailed(error) => self.error = Some(error),
            other => {
                tracing::debug!("Ignoring non-search event on search channel: {:?}", other);
                return false;
            }
        }
        true
    }

    pub fn apply_recommend(&mut self, stamped: Stamped<GeneratorEvent>) -> bool {
        if stamped.generation != self.recommend_generation {
            return false;
        }
        match stamped.event {
            GeneratorEvent::Recommendations(tracks) => self.recommendations = Some(tracks),
            GeneratorEvent::RecommendFailed(error) => self.error = Some(error),
            other => {
                tracing::debug!("Ignoring non-recommend event: {:?}", other);
                return false;
            }
        }
        true
    }
}

/// The whole dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub playlist: PlaylistView,
    pub top_tracks: TopTracksView,
    pub generator: GeneratorView,
}

impl ViewState {
    /// Route a message to its screen. Returns `false` for stale messages.
    pub fn apply(&mut self, message: Message) -> bool {
        let applied = match message {
            Message::Playlist(stamped) => self.playlist.apply(stamped),
            Message::TopTracks(stamped) => self.top_tracks.apply(stamped),
            Message::Search(stamped) => self.generator.apply_search(stamped),
            Message::Recommend(stamped) => self.generator.apply_recommend(stamped),
        };
        if !applied {
            tracing::debug!("Dropped stale message");
        }
        applied
    }
}
