//! Playlist Lens - audio-feature dashboards for a music streaming Web API.
//!
//! Loads playlists, top tracks, search results and recommendations,
//! averages their audio features and prints them as text bars.

pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod spotify;
pub mod stats;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("playlist_lens=info".parse()?))
        .init();

    cli::run_command(&args)
}
