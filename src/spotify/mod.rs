//! Web API integration - playlists, top tracks, search, recommendations
//! and audio features.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - Internal types the rest of the crate uses
//! - **API DTOs** (`dto.rs`) - Exact API response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`client.rs`) - HTTP client with auth and timeouts
//! - **Traits** (`traits.rs`) - The [`SpotifyApi`] seam used by the session layer
//!
//! Authentication is out of scope: the client is handed a ready OAuth
//! access token.
//!
//! API docs: https://developer.spotify.com/documentation/web-api

pub mod domain;
pub mod dto;
mod adapter;
mod client;
pub mod traits;

pub use client::{AUDIO_FEATURES_BATCH, DEFAULT_BASE_URL, SpotifyClient};
pub use domain::{
    ApiError, AudioFeatures, EnrichedTrack, FeatureTargets, Page, Playlist, TimeRange, Track,
};
pub use traits::SpotifyApi;
