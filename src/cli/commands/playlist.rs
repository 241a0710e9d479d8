//! Playlist averages and track listing.

use std::sync::Arc;

use tokio::runtime::Runtime;

use super::render::{self, Report};
use crate::config::DisplayConfig;
use crate::error::Error;
use crate::session::{Controller, LoadSettings};
use crate::spotify::{ApiError, SpotifyApi};
use crate::stats::Feature;

/// Load a playlist with every page and print its averages and tracks
pub fn cmd_playlist<A: SpotifyApi + ?Sized + 'static>(
    rt: &Runtime,
    api: Arc<A>,
    settings: LoadSettings,
    playlist_id: &str,
    sort: Option<Feature>,
    display: &DisplayConfig,
) -> anyhow::Result<()> {
    let report = rt.block_on(playlist_report(
        api,
        settings,
        playlist_id,
        sort,
        display.bar_width(),
    ))?;
    report.print();
    Ok(())
}

async fn playlist_report<A: SpotifyApi + ?Sized + 'static>(
    api: Arc<A>,
    settings: LoadSettings,
    playlist_id: &str,
    sort: Option<Feature>,
    bar_width: usize,
) -> anyhow::Result<Report> {
    let mut ctl = Controller::new(api, settings);
    ctl.set_sort(sort);
    ctl.open_playlist(playlist_id);
    ctl.run_until_idle().await;

    let view = &ctl.state().playlist;
    let Some(header) = &view.header else {
        let cause = view
            .data
            .errors
            .first()
            .cloned()
            .unwrap_or(ApiError::Cancelled);
        return Err(Error::from(cause)
            .context(format!("loading playlist {}", playlist_id))
            .into());
    };

    let mut report = Report::default();
    report.extend(render::header_lines(header));
    report.push("");
    report.extend(render::averages(&view.data, bar_width));
    report.push("");

    match (view.sorted(), view.sort) {
        (Some(tracks), Some(feature)) => {
            report.push(format!("Tracks by {} (highest first):", feature));
            report.extend(
                tracks
                    .iter()
                    .enumerate()
                    .map(|(i, t)| render::enriched_line(i + 1, t, Some(feature))),
            );
        }
        _ => {
            report.push("Tracks:");
            report.extend(
                view.data
                    .tracks
                    .iter()
                    .enumerate()
                    .map(|(i, t)| render::track_line(i + 1, t)),
            );
        }
    }

    report.warnings = render::error_lines(&view.data.errors);
    Ok(report)
}
