//! Plain-text rendering of view state for the terminal.

use crate::session::view::{PlaylistHeader, TrackSet};
use crate::spotify::{ApiError, EnrichedTrack, Track};
use crate::stats::{Feature, StatsError, SummaryStatistics};

const CAPTION_WIDTH: usize = 16;
const MAX_BAR_WIDTH: usize = 100;

/// Output of one command: lines for stdout and warnings for stderr
#[derive(Debug, Default)]
pub struct Report {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

impl Report {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
        for warning in &self.warnings {
            eprintln!("{}", warning);
        }
    }
}

/// A `[#####-----]` bar for a 0-100 value
pub fn bar(percent: u8, width: usize) -> String {
    let percent = usize::from(percent.min(100));
    let width = width.min(MAX_BAR_WIDTH);
    let filled = (percent * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One bar per unit feature, then raw tempo and loudness
pub fn summary_lines(summary: &SummaryStatistics, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .bars()
        .into_iter()
        .map(|(caption, percent)| {
            format!(
                "{:<w$} {} {:>3}/100",
                caption,
                bar(percent, width),
                percent,
                w = CAPTION_WIDTH
            )
        })
        .collect();

    lines.push(format!(
        "{:<w$} {:.1} BPM",
        Feature::Tempo.caption(),
        summary.tempo,
        w = CAPTION_WIDTH
    ));
    lines.push(format!(
        "{:<w$} {:.1} dB",
        Feature::Loudness.caption(),
        summary.loudness,
        w = CAPTION_WIDTH
    ));
    lines.push(format!("({} tracks analysed)", summary.count));
    lines
}

/// Averages for a track set, or a note when there is nothing to average
pub fn averages(data: &TrackSet, width: usize) -> Vec<String> {
    match data.summary() {
        Ok(summary) => summary_lines(&summary, width),
        Err(StatsError::InsufficientData) => vec!["No audio features available.".to_string()],
        Err(e) => vec![e.to_string()],
    }
}

pub fn header_lines(header: &PlaylistHeader) -> Vec<String> {
    let mut lines = vec![header.name.clone()];
    if let Some(owner) = &header.owner {
        lines.push(format!("by {}", owner));
    }
    lines.push(format!(
        "{} tracks, {} followers",
        header.total_tracks, header.followers
    ));
    lines
}

pub fn track_line(position: usize, track: &Track) -> String {
    format!("{:>3}. {} - {}", position, track.title, track.artist)
}

/// A track line with the sort feature's value appended
pub fn enriched_line(position: usize, enriched: &EnrichedTrack, sort: Option<Feature>) -> String {
    let line = track_line(position, &enriched.track);
    let Some(feature) = sort else {
        return line;
    };
    match &enriched.audio_features {
        Some(features) => {
            let value = feature.value(features);
            if feature.is_unit_interval() {
                format!("{}  ({} {:.2})", line, feature, value)
            } else {
                format!("{}  ({} {:.1})", line, feature, value)
            }
        }
        None => format!("{}  (no audio features)", line),
    }
}

pub fn error_lines(errors: &[ApiError]) -> Vec<String> {
    errors.iter().map(|e| format!("warning: {}", e)).collect()
}
