//! Adapter layer: Convert Web API DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If the API changes its response format, only this file and dto.rs
//! need to change.

use super::dto;
use crate::spotify::domain::{AudioFeatures, Page, Playlist, Track};

/// Which album image to pick for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtChoice {
    /// First listed image (the API lists the largest first)
    First,
    /// Smallest image by height, used for compact search results
    Smallest,
}

/// Convert a playlist response, skipping unavailable items
pub fn to_playlist(response: dto::PlaylistResponse) -> Playlist {
    let image_url = response
        .images
        .as_deref()
        .and_then(|images| images.first())
        .map(|image| image.url.clone());

    Playlist {
        id: response.id,
        name: response.name,
        owner: response.owner.and_then(|o| o.display_name),
        followers: response.followers.map(|f| f.total).unwrap_or(0),
        image_url,
        tracks: to_playlist_page(response.tracks),
    }
}

/// Convert a page of playlist items
///
/// Items whose track is `null`, has no ID (local files) or has no artist
/// are dropped.
pub fn to_playlist_page(page: dto::Paging<dto::PlaylistItem>) -> Page<Track> {
    let mut items = Vec::with_capacity(page.items.len());
    for item in page.items {
        let Some(track) = item.track else {
            continue;
        };
        if let Some(track) = to_track(track, ArtChoice::First) {
            items.push(track);
        }
    }

    Page {
        items,
        next: page.next,
        total: page.total,
    }
}

/// Convert a page of bare track objects (top tracks, search results)
pub fn to_track_page(page: dto::Paging<dto::TrackObject>, art: ArtChoice) -> Page<Track> {
    Page {
        items: to_tracks(page.items, art),
        next: page.next,
        total: page.total,
    }
}

/// Convert a list of track objects, dropping ones without an ID or artist
pub fn to_tracks(tracks: Vec<dto::TrackObject>, art: ArtChoice) -> Vec<Track> {
    tracks
        .into_iter()
        .filter_map(|track| to_track(track, art))
        .collect()
}

/// Convert a single track object
///
/// Returns `None` for local files (no ID) and for tracks with no artist
/// credit, so one bad item doesn't cost the rest of the page.
fn to_track(track: dto::TrackObject, art: ArtChoice) -> Option<Track> {
    let Some(id) = track.id else {
        tracing::debug!("Skipping track without ID: {}", track.name);
        return None;
    };

    let Some(artist) = track.artists.into_iter().next().map(|a| a.name) else {
        tracing::warn!("Skipping track {} ({}) with no artists", id, track.name);
        return None;
    };

    let album_art_url = track
        .album
        .as_ref()
        .and_then(|album| pick_image(&album.images, art))
        .map(|image| image.url.clone());

    Some(Track {
        id,
        title: track.name,
        artist,
        album_art_url,
        uri: track.uri,
    })
}

/// Pick an album image according to `art`
fn pick_image(images: &[dto::Image], art: ArtChoice) -> Option<&dto::Image> {
    match art {
        ArtChoice::First => images.first(),
        // Unknown heights count as largest
        ArtChoice::Smallest => images
            .iter()
            .min_by_key(|image| image.height.unwrap_or(u32::MAX)),
    }
}

/// Convert an audio-features response, skipping `null` entries
pub fn to_audio_features(response: dto::AudioFeaturesResponse) -> Vec<AudioFeatures> {
    response
        .audio_features
        .into_iter()
        .flatten()
        .map(|f| AudioFeatures {
            id: f.id,
            danceability: f.danceability,
            energy: f.energy,
            valence: f.valence,
            acousticness: f.acousticness,
            liveness: f.liveness,
            speechiness: f.speechiness,
            instrumentalness: f.instrumentalness,
            tempo: f.tempo,
            loudness: f.loudness,
            time_signature: f.time_signature,
        })
        .collect()
}
