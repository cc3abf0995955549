//! Episode control over a machine and a game adapter.

pub mod controller;

pub use controller::{EpisodeController, EpisodeStatus};
