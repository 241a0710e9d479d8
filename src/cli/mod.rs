//! Command-line interface for playlist-lens.
//!
//! Each command drives a session controller to completion and prints the
//! resulting view as text.

mod commands;

pub use commands::{Cli, Commands, run_command};
