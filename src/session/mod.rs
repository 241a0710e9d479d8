//! Dashboard session: fetch orchestration and view state.
//!
//! - [`accumulator`] - follows pagination cursors, keeping partial results
//! - [`view`] - the single view-state struct and its pure update functions
//! - [`controller`] - spawns fetch tasks, cancels superseded ones, applies
//!   their messages

pub mod accumulator;
pub mod controller;
pub mod view;

pub use accumulator::{Accumulated, accumulate_pages};
pub use controller::{Controller, LoadSettings};
pub use view::{Generation, ViewState};
