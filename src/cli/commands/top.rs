//! Top tracks for a listening-history window.

use std::sync::Arc;

use tokio::runtime::Runtime;

use super::render::{self, Report};
use crate::config::DisplayConfig;
use crate::error::Error;
use crate::session::{Controller, LoadSettings};
use crate::spotify::{SpotifyApi, TimeRange};

/// Print averages and the first `show` top tracks for `range`
pub fn cmd_top<A: SpotifyApi + ?Sized + 'static>(
    rt: &Runtime,
    api: Arc<A>,
    settings: LoadSettings,
    range: TimeRange,
    show: usize,
    display: &DisplayConfig,
) -> anyhow::Result<()> {
    let report = rt.block_on(top_report(api, settings, range, show, display.bar_width()))?;
    report.print();
    Ok(())
}

async fn top_report<A: SpotifyApi + ?Sized + 'static>(
    api: Arc<A>,
    settings: LoadSettings,
    range: TimeRange,
    show: usize,
    bar_width: usize,
) -> anyhow::Result<Report> {
    let mut ctl = Controller::new(api, settings);
    ctl.select_time_range(range);
    ctl.run_until_idle().await;

    let data = &ctl.state().top_tracks.data;
    if data.tracks.is_empty() {
        if let Some(cause) = data.errors.first() {
            return Err(Error::from(cause.clone())
                .context(format!("loading top tracks ({})", range))
                .into());
        }
    }

    let mut report = Report::default();
    report.push(format!("Top tracks ({})", range));
    report.push("");
    report.extend(render::averages(data, bar_width));
    report.push("");

    if data.tracks.is_empty() {
        report.push("No top tracks for this range.");
    } else {
        report.extend(
            data.tracks
                .iter()
                .take(show)
                .enumerate()
                .map(|(i, t)| render::track_line(i + 1, t)),
        );
        if data.tracks.len() > show {
            report.push(format!("  ... and {} more", data.tracks.len() - show));
        }
    }

    report.warnings = render::error_lines(&data.errors);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::ApiError;
    use crate::spotify::traits::mocks::MockSpotify;
    use crate::test_utils::{mock_features, mock_page};

    #[tokio::test]
    async fn test_report_truncates_to_show() {
        let mock = MockSpotify::new()
            .with_top_tracks(TimeRange::Medium, mock_page(&["a", "b", "c"], None))
            .with_features(vec![mock_features("a", 0.5), mock_features("b", 0.9)]);

        let report = top_report(Arc::new(mock), LoadSettings::default(), TimeRange::Medium, 2, 10)
            .await
            .unwrap();

        assert_eq!(report.lines[0], "Top tracks (medium_term)");
        assert!(report.lines.iter().any(|l| l.ends_with(" 70/100")));
        assert!(report.lines.contains(&"  1. Track a - Test Artist".to_string()));
        assert!(report.lines.contains(&"  2. Track b - Test Artist".to_string()));
        assert_eq!(report.lines.last().unwrap(), "  ... and 1 more");
    }

    #[tokio::test]
    async fn test_empty_range() {
        let mock = MockSpotify::new().with_top_tracks(TimeRange::Long, mock_page(&[], None));

        let report = top_report(Arc::new(mock), LoadSettings::default(), TimeRange::Long, 10, 10)
            .await
            .unwrap();

        assert!(report.lines.contains(&"No top tracks for this range.".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_token_is_an_error() {
        let mock = MockSpotify::new().with_error("short_term", ApiError::Unauthorized);

        let result =
            top_report(Arc::new(mock), LoadSettings::default(), TimeRange::Short, 10, 10).await;

        assert!(result.unwrap_err().to_string().contains("Access token rejected"));
    }
}
