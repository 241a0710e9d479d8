//! Track search and recommendation generation.

use std::sync::Arc;

use tokio::runtime::Runtime;

use super::TargetArgs;
use super::render::{self, Report};
use crate::error::Error;
use crate::session::{Controller, LoadSettings};
use crate::spotify::{SpotifyApi, Track};

/// Search tracks and print the results with their IDs
pub fn cmd_search<A: SpotifyApi + ?Sized + 'static>(
    rt: &Runtime,
    api: Arc<A>,
    settings: LoadSettings,
    query: &str,
) -> anyhow::Result<()> {
    let report = rt.block_on(search_report(api, settings, query))?;
    report.print();
    Ok(())
}

/// Generate recommendations from a seed (by ID or by search) and the sliders
pub fn cmd_recommend<A: SpotifyApi + ?Sized + 'static>(
    rt: &Runtime,
    api: Arc<A>,
    settings: LoadSettings,
    seed_id: Option<&str>,
    query: Option<&str>,
    targets: &TargetArgs,
) -> anyhow::Result<()> {
    let report = rt.block_on(recommend_report(api, settings, seed_id, query, targets))?;
    report.print();
    Ok(())
}

fn result_line(position: usize, track: &Track) -> String {
    format!("{}  [{}]", render::track_line(position, track), track.id)
}

async fn search_report<A: SpotifyApi + ?Sized + 'static>(
    api: Arc<A>,
    settings: LoadSettings,
    query: &str,
) -> anyhow::Result<Report> {
    let mut ctl = Controller::new(api, settings);
    ctl.search(query);
    ctl.run_until_idle().await;

    let generator = &ctl.state().generator;
    if let Some(error) = &generator.error {
        return Err(Error::from(error.clone())
            .context(format!("searching for '{}'", query))
            .into());
    }

    let mut report = Report::default();
    if generator.results.is_empty() {
        report.push(format!("No tracks match '{}'.", query.trim()));
    } else {
        report.extend(
            generator
                .results
                .iter()
                .enumerate()
                .map(|(i, t)| result_line(i + 1, t)),
        );
    }
    Ok(report)
}

async fn recommend_report<A: SpotifyApi + ?Sized + 'static>(
    api: Arc<A>,
    settings: LoadSettings,
    seed_id: Option<&str>,
    query: Option<&str>,
    targets: &TargetArgs,
) -> anyhow::Result<Report> {
    let mut ctl = Controller::new(api, settings);

    let seed = match (seed_id, query) {
        (Some(id), _) => Track {
            id: id.to_string(),
            ..Default::default()
        },
        (None, Some(query)) => {
            ctl.search(query);
            ctl.run_until_idle().await;
            let generator = &ctl.state().generator;
            if let Some(error) = &generator.error {
                return Err(Error::from(error.clone())
                    .context(format!("searching for a seed matching '{}'", query))
                    .into());
            }
            match generator.results.first() {
                Some(track) => track.clone(),
                None => anyhow::bail!("No tracks match '{}'", query.trim()),
            }
        }
        (None, None) => anyhow::bail!("A seed track ID or search query is required"),
    };

    let mut report = Report::default();
    if seed.title.is_empty() {
        report.push(format!("Seed: {}", seed.id));
    } else {
        report.push(format!("Seed: {} - {}  [{}]", seed.title, seed.artist, seed.id));
    }

    ctl.choose_seed(seed);
    for (feature, value) in targets.sliders() {
        ctl.set_target(feature, value)?;
    }
    if ctl.generate().is_none() {
        anyhow::bail!("No seed track selected");
    }
    ctl.run_until_idle().await;

    let generator = &ctl.state().generator;
    if let Some(error) = &generator.error {
        return Err(Error::from(error.clone())
            .context("generating recommendations")
            .into());
    }

    let targets = generator.targets;
    report.push(format!(
        "Targets: energy {} danceability {} valence {} acousticness {} liveness {} speechiness {} instrumentalness {}",
        targets.energy,
        targets.danceability,
        targets.valence,
        targets.acousticness,
        targets.liveness,
        targets.speechiness,
        targets.instrumentalness,
    ));
    report.push("");

    match generator.recommendations.as_deref() {
        Some([]) | None => report.push("No recommendations returned."),
        Some(tracks) => report.extend(
            tracks
                .iter()
                .enumerate()
                .map(|(i, t)| result_line(i + 1, t)),
        ),
    }
    Ok(report)
}
