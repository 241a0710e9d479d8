//! Background fetch orchestration for the dashboard screens.
//!
//! Each trigger (open a playlist, pick a time range, type a search,
//! press generate) spawns one tokio task. The task streams stamped
//! [`Message`]s back over an unbounded channel; the [`Controller`] owns the
//! [`ViewState`] and applies them in arrival order.
//!
//! Starting a new load on a screen cancels the previous task for that
//! screen. Anything the old task manages to send anyway carries a stale
//! generation and is dropped by the view.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::accumulator::accumulate_pages;
use super::view::{
    GeneratorEvent, Generation, LoadEvent, Message, PlaylistHeader, Stamped, ViewState,
};
use crate::spotify::{ApiError, FeatureTargets, SpotifyApi, TimeRange, Track};
use crate::stats::{Feature, StatsError};

/// Request sizes for the non-paginated screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSettings {
    pub top_tracks_limit: u32,
    pub search_limit: u32,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            top_tracks_limit: 20,
            search_limit: 10,
        }
    }
}

enum Envelope {
    Message(Message),
    /// A spawned task has exited
    Done,
}

/// Sends events for one generation of one screen
struct Emitter<E> {
    tx: mpsc::UnboundedSender<Envelope>,
    generation: Generation,
    wrap: fn(Stamped<E>) -> Message,
}

impl<E> Clone for Emitter<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            generation: self.generation,
            wrap: self.wrap,
        }
    }
}

impl<E> Emitter<E> {
    fn send(&self, event: E) {
        let message = (self.wrap)(Stamped {
            generation: self.generation,
            event,
        });
        // Receiver gone means the controller was dropped; nothing to do
        let _ = self.tx.send(Envelope::Message(message));
    }
}

/// Cancellation handles for the task currently running on each screen
#[derive(Default)]
struct Inflight {
    playlist: Option<CancellationToken>,
    top_tracks: Option<CancellationToken>,
    search: Option<CancellationToken>,
    recommend: Option<CancellationToken>,
}

impl Inflight {
    /// Cancel whatever occupies `slot` and install a fresh token
    fn replace(slot: &mut Option<CancellationToken>) -> CancellationToken {
        if let Some(old) = slot.take() {
            old.cancel();
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        token
    }

    fn cancel_all(&mut self) {
        for token in [
            self.playlist.take(),
            self.top_tracks.take(),
            self.search.take(),
            self.recommend.take(),
        ]
        .into_iter()
        .flatten()
        {
            token.cancel();
        }
    }
}

/// Owns the view state and the tasks that feed it
pub struct Controller<A: SpotifyApi + ?Sized + 'static> {
    api: Arc<A>,
    settings: LoadSettings,
    state: ViewState,
    tx: mpsc::UnboundedSender<Envelope>,
    rx: mpsc::UnboundedReceiver<Envelope>,
    pending: usize,
    inflight: Inflight,
}

impl<A: SpotifyApi + ?Sized + 'static> Controller<A> {
    pub fn new(api: Arc<A>, settings: LoadSettings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            settings,
            state: ViewState::default(),
            tx,
            rx,
            pending: 0,
            inflight: Inflight::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Whether every spawned task has reported back
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }

    /// Load a playlist and all of its pages, replacing the current one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open_playlist(&mut self, playlist_id: &str) -> Generation {
        let generation = self.state.playlist.request(playlist_id);
        let cancel = Inflight::replace(&mut self.inflight.playlist);
        let emit = self.emitter(generation, Message::Playlist);
        tracing::debug!("Opening playlist {} ({:?})", playlist_id, generation);

        let api = Arc::clone(&self.api);
        let playlist_id = playlist_id.to_string();
        self.spawn(load_playlist(api, playlist_id, emit, cancel));
        generation
    }

    /// Change the playlist sort; `None` restores playlist order
    pub fn set_sort(&mut self, sort: Option<Feature>) {
        self.state.playlist.set_sort(sort);
    }

    /// Load top tracks for `range`, replacing the current list
    pub fn select_time_range(&mut self, range: TimeRange) -> Generation {
        let generation = self.state.top_tracks.request(range);
        let cancel = Inflight::replace(&mut self.inflight.top_tracks);
        let emit = self.emitter(generation, Message::TopTracks);

        let api = Arc::clone(&self.api);
        let limit = self.settings.top_tracks_limit;
        self.spawn(load_top_tracks(api, range, limit, emit, cancel));
        generation
    }

    /// Update the search box and search for its contents.
    ///
    /// A blank query clears the results without a request.
    pub fn search(&mut self, query: &str) -> Generation {
        let generation = self.state.generator.set_query(query);
        let cancel = Inflight::replace(&mut self.inflight.search);

        if query.trim().is_empty() {
            self.state.generator.apply_search(Stamped {
                generation,
                event: GeneratorEvent::SearchResults(Vec::new()),
            });
            return generation;
        }

        let emit = self.emitter(generation, Message::Search);
        let api = Arc::clone(&self.api);
        let query = query.to_string();
        let limit = self.settings.search_limit;
        self.spawn(run_search(api, query, limit, emit, cancel));
        generation
    }

    /// Use `track` as the recommendation seed
    pub fn choose_seed(&mut self, track: Track) {
        if let Some(token) = self.inflight.search.take() {
            token.cancel();
        }
        self.state.generator.choose_seed(track);
    }

    /// Move a recommendation slider (0-100)
    pub fn set_target(&mut self, feature: Feature, value: u8) -> Result<(), StatsError> {
        self.state.generator.set_target(feature, value)
    }

    /// Request recommendations; `None` if no seed is chosen yet
    pub fn generate(&mut self) -> Option<Generation> {
        let (generation, seed_id, targets) = self.state.generator.request_recommendations()?;
        let cancel = Inflight::replace(&mut self.inflight.recommend);
        let emit = self.emitter(generation, Message::Recommend);

        let api = Arc::clone(&self.api);
        self.spawn(run_recommendations(api, seed_id, targets, emit, cancel));
        Some(generation)
    }

    /// Apply messages until every spawned task has finished
    pub async fn run_until_idle(&mut self) {
        while self.pending > 0 {
            match self.rx.recv().await {
                Some(envelope) => self.dispatch(envelope),
                None => break,
            }
        }
        while let Ok(envelope) = self.rx.try_recv() {
            self.dispatch(envelope);
        }
    }

    fn dispatch(&mut self, envelope: Envelope) {
        match envelope {
            Envelope::Message(message) => {
                self.state.apply(message);
            }
            Envelope::Done => self.pending = self.pending.saturating_sub(1),
        }
    }

    fn emitter<E>(&self, generation: Generation, wrap: fn(Stamped<E>) -> Message) -> Emitter<E> {
        Emitter {
            tx: self.tx.clone(),
            generation,
            wrap,
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.pending += 1;
        let done = self.tx.clone();
        tokio::spawn(async move {
            task.await;
            let _ = done.send(Envelope::Done);
        });
    }
}

impl<A: SpotifyApi + ?Sized + 'static> Drop for Controller<A> {
    fn drop(&mut self) {
        self.inflight.cancel_all();
    }
}

/// Run `request` unless `cancel` fires first
async fn or_cancel<T>(
    cancel: &CancellationToken,
    request: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        result = request => result,
    }
}

async fn load_playlist<A: SpotifyApi + ?Sized>(
    api: Arc<A>,
    playlist_id: String,
    emit: Emitter<LoadEvent>,
    cancel: CancellationToken,
) {
    let playlist = match or_cancel(&cancel, api.get_playlist(&playlist_id)).await {
        Ok(playlist) => playlist,
        Err(ApiError::Cancelled) => return,
        Err(e) => {
            tracing::warn!("Failed to load playlist {}: {}", playlist_id, e);
            emit.send(LoadEvent::Failed(e));
            emit.send(LoadEvent::Finished);
            return;
        }
    };

    emit.send(LoadEvent::Header(PlaylistHeader::from(&playlist)));

    let pages_api = Arc::clone(&api);
    let page_emit = emit.clone();
    let page_cancel = cancel.clone();

    let result = accumulate_pages(
        playlist.tracks,
        move |url: String| {
            let api = Arc::clone(&pages_api);
            async move { api.get_playlist_page(&url).await }
        },
        move |tracks: Vec<Track>| {
            let api = Arc::clone(&api);
            let emit = page_emit.clone();
            let cancel = page_cancel.clone();
            async move { emit_with_features(&*api, tracks, &emit, &cancel).await }
        },
        &cancel,
    )
    .await;

    match result.error {
        None => tracing::info!(
            "Loaded playlist {} ({} tracks, {} pages)",
            playlist_id,
            result.items.len(),
            result.pages
        ),
        Some(ApiError::Cancelled) => return,
        Some(e) => emit.send(LoadEvent::Failed(e)),
    }
    emit.send(LoadEvent::Finished);
}

async fn load_top_tracks<A: SpotifyApi + ?Sized>(
    api: Arc<A>,
    range: TimeRange,
    limit: u32,
    emit: Emitter<LoadEvent>,
    cancel: CancellationToken,
) {
    match or_cancel(&cancel, api.get_top_tracks(range, limit)).await {
        Ok(page) => {
            tracing::info!("Loaded {} top tracks ({})", page.items.len(), range);
            emit_with_features(&*api, page.items, &emit, &cancel).await;
        }
        Err(ApiError::Cancelled) => return,
        Err(e) => {
            tracing::warn!("Failed to load top tracks ({}): {}", range, e);
            emit.send(LoadEvent::Failed(e));
        }
    }
    emit.send(LoadEvent::Finished);
}

/// Send `tracks`, then fetch and send their audio features
async fn emit_with_features<A: SpotifyApi + ?Sized>(
    api: &A,
    tracks: Vec<Track>,
    emit: &Emitter<LoadEvent>,
    cancel: &CancellationToken,
) {
    let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    emit.send(LoadEvent::Tracks(tracks));
    if ids.is_empty() {
        return;
    }

    match or_cancel(cancel, api.get_audio_features(&ids)).await {
        Ok(features) => emit.send(LoadEvent::AudioFeatures(features)),
        Err(ApiError::Cancelled) => {}
        Err(e) => {
            tracing::warn!("Audio features unavailable for {} tracks: {}", ids.len(), e);
            emit.send(LoadEvent::Failed(e));
        }
    }
}

async fn run_search<A: SpotifyApi + ?Sized>(
    api: Arc<A>,
    query: String,
    limit: u32,
    emit: Emitter<GeneratorEvent>,
    cancel: CancellationToken,
) {
    match or_cancel(&cancel, api.search_tracks(&query, limit)).await {
        Ok(tracks) => {
            tracing::debug!("Search '{}' returned {} tracks", query, tracks.len());
            emit.send(GeneratorEvent::SearchResults(tracks));
        }
        Err(ApiError::Cancelled) => {}
        Err(e) => {
            tracing::warn!("Search '{}' failed: {}", query, e);
            emit.send(GeneratorEvent::SearchFailed(e));
        }
    }
}

async fn run_recommendations<A: SpotifyApi + ?Sized>(
    api: Arc<A>,
    seed_id: String,
    targets: FeatureTargets,
    emit: Emitter<GeneratorEvent>,
    cancel: CancellationToken,
) {
    match or_cancel(&cancel, api.get_recommendations(&seed_id, &targets)).await {
        Ok(tracks) => {
            tracing::info!("Generated {} recommendations from {}", tracks.len(), seed_id);
            emit.send(GeneratorEvent::Recommendations(tracks));
        }
        Err(ApiError::Cancelled) => {}
        Err(e) => {
            tracing::warn!("Recommendations for {} failed: {}", seed_id, e);
            emit.send(GeneratorEvent::RecommendFailed(e));
        }
    }
}
