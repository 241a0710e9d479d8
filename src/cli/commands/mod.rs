//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `playlist`: playlist averages and sorted track list
//! - `top`: the user's top tracks for a time range
//! - `generate`: track search and recommendations
//! - `settings`: config file inspection
//!
//! `render` turns view state into terminal lines for all of them.

mod generate;
mod playlist;
mod render;
mod settings;
mod top;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::error::{Error, ResultExt};
use crate::spotify::{SpotifyClient, TimeRange};
use crate::stats::Feature;

pub use generate::{cmd_recommend, cmd_search};
pub use playlist::cmd_playlist;
pub use settings::cmd_config;
pub use top::cmd_top;

/// Playlist Lens CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OAuth access token (overrides the config file)
    #[arg(long, global = true, env = "SPOTIFY_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show audio-feature averages and tracks of a playlist
    Playlist {
        /// Playlist ID
        id: String,
        /// Sort tracks by this feature (highest first)
        #[arg(short, long)]
        sort: Option<Feature>,
    },
    /// Show your top tracks for a time range
    Top {
        /// short, medium or long
        #[arg(short, long, default_value_t = TimeRange::Short)]
        range: TimeRange,
        /// How many tracks to request (1-50)
        #[arg(short, long)]
        limit: Option<u32>,
        /// How many tracks to list
        #[arg(long)]
        show: Option<usize>,
    },
    /// Search tracks by title, artist or album
    Search {
        /// Free-text query
        query: String,
        /// Maximum number of results (1-50)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Generate recommendations from a seed track and feature targets
    Recommend {
        /// Seed track ID
        #[arg(long, conflicts_with = "query", required_unless_present = "query")]
        seed: Option<String>,
        /// Search for the seed track and use the first result
        #[arg(long)]
        query: Option<String>,
        #[command(flatten)]
        targets: TargetArgs,
    },
    /// Inspect or edit the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Recommendation slider positions
#[derive(Args, Debug, Clone, Copy)]
pub struct TargetArgs {
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub energy: u8,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub danceability: u8,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub valence: u8,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub acousticness: u8,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub liveness: u8,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub speechiness: u8,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub instrumentalness: u8,
}

impl TargetArgs {
    /// Each slider paired with the feature it targets
    pub fn sliders(&self) -> [(Feature, u8); 7] {
        [
            (Feature::Energy, self.energy),
            (Feature::Danceability, self.danceability),
            (Feature::Valence, self.valence),
            (Feature::Acousticness, self.acousticness),
            (Feature::Liveness, self.liveness),
            (Feature::Speechiness, self.speechiness),
            (Feature::Instrumentalness, self.instrumentalness),
        ]
    }
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (token masked)
    Show,
    /// Print the config file location
    Path,
    /// Store an access token in the config file
    SetToken {
        /// OAuth access token
        token: String,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load();

    if let Commands::Config { action } = &cli.command {
        return cmd_config(&config, action);
    }

    let rt = Runtime::new()?;
    let api = connect(&config, cli.token.as_deref())?;
    let settings = config.api.load_settings();

    match &cli.command {
        Commands::Playlist { id, sort } => {
            let sort = sort.or_else(|| default_sort(&config));
            cmd_playlist(&rt, api, settings, id, sort, &config.display)
        }
        Commands::Top { range, limit, show } => {
            let mut settings = settings;
            if let Some(limit) = limit {
                settings.top_tracks_limit = (*limit).clamp(1, 50);
            }
            let show = show.unwrap_or(config.display.top_tracks_shown);
            cmd_top(&rt, api, settings, *range, show, &config.display)
        }
        Commands::Search { query, limit } => {
            let mut settings = settings;
            if let Some(limit) = limit {
                settings.search_limit = (*limit).clamp(1, 50);
            }
            cmd_search(&rt, api, settings, query)
        }
        Commands::Recommend {
            seed,
            query,
            targets,
        } => cmd_recommend(
            &rt,
            api,
            settings,
            seed.as_deref(),
            query.as_deref(),
            targets,
        ),
        Commands::Config { .. } => Ok(()),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Build the API client from the flag/env token or the config file
fn connect(config: &Config, token: Option<&str>) -> anyhow::Result<Arc<SpotifyClient>> {
    let token = resolve_token(config, token).ok_or(Error::MissingToken)?;
    let client = SpotifyClient::new(token, config.api.base_url.clone(), config.api.timeout())
        .with_context("building HTTP client")?;
    Ok(Arc::new(client))
}

/// Flag or environment token first, then the config file; blank tokens don't count
fn resolve_token(config: &Config, token: Option<&str>) -> Option<String> {
    token
        .or(config.credentials.access_token.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn default_sort(config: &Config) -> Option<Feature> {
    let name = config.display.default_sort.as_deref()?;
    match name.parse() {
        Ok(feature) => Some(feature),
        Err(e) => {
            tracing::warn!("Ignoring display.default_sort: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: Option<&str>) -> Config {
        let mut config = Config::default();
        config.credentials.access_token = token.map(str::to_string);
        config
    }

    #[test]
    fn test_flag_token_wins_over_config() {
        let config = config_with_token(Some("from-file"));
        assert_eq!(
            resolve_token(&config, Some("from-flag")),
            Some("from-flag".to_string())
        );
        assert_eq!(resolve_token(&config, None), Some("from-file".to_string()));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = config_with_token(Some("   "));
        assert_eq!(resolve_token(&config, None), None);
        assert!(connect(&config, None).is_err());
    }

    #[test]
    fn test_default_sort_from_config() {
        let mut config = Config::default();
        config.display.default_sort = Some("Energy".to_string());
        assert_eq!(default_sort(&config), Some(Feature::Energy));

        config.display.default_sort = Some("bpm-ish".to_string());
        assert_eq!(default_sort(&config), None);
    }

    #[test]
    fn test_parse_playlist_with_sort() {
        let cli = Cli::try_parse_from(["playlist-lens", "playlist", "abc", "--sort", "valence"])
            .unwrap();
        match cli.command {
            Commands::Playlist { id, sort } => {
                assert_eq!(id, "abc");
                assert_eq!(sort, Some(Feature::Valence));
            }
            _ => panic!("expected playlist command"),
        }
    }

    #[test]
    fn test_parse_top_defaults_to_short_range() {
        let cli = Cli::try_parse_from(["playlist-lens", "top"]).unwrap();
        match cli.command {
            Commands::Top { range, limit, show } => {
                assert_eq!(range, TimeRange::Short);
                assert_eq!(limit, None);
                assert_eq!(show, None);
            }
            _ => panic!("expected top command"),
        }
    }

    #[test]
    fn test_recommend_sliders_are_bounded() {
        let cli = Cli::try_parse_from([
            "playlist-lens",
            "recommend",
            "--seed",
            "t1",
            "--energy",
            "90",
        ])
        .unwrap();
        let Commands::Recommend { seed, targets, .. } = cli.command else {
            panic!("expected recommend command");
        };
        assert_eq!(seed.as_deref(), Some("t1"));
        assert_eq!(targets.energy, 90);
        assert_eq!(targets.valence, 50);

        let too_high =
            Cli::try_parse_from(["playlist-lens", "recommend", "--seed", "t1", "--energy", "101"]);
        assert!(too_high.is_err());
    }

    #[test]
    fn test_recommend_needs_a_seed() {
        assert!(Cli::try_parse_from(["playlist-lens", "recommend"]).is_err());
        assert!(
            Cli::try_parse_from(["playlist-lens", "recommend", "--seed", "a", "--query", "b"])
                .is_err()
        );
    }
}
