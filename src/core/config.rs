//! Environment configuration.
//!
//! The embedding application fills an `EnvConfig` from whatever source it
//! likes (command line, file, Python kwargs). The crate only consumes it.

use serde::{Deserialize, Serialize};

/// What the controller does with a `step()` on an already-terminal episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalStepPolicy {
    /// Advance anyway and log a warning. The caller is expected to reset.
    #[default]
    Permit,
    /// Fail with `EnvError::EpisodeOver`.
    Reject,
}

/// Configuration for an `EpisodeController`.
///
/// ## Example
///
/// ```
/// use arcade_env::core::{EnvConfig, TerminalStepPolicy};
///
/// let config = EnvConfig::new()
///     .with_frame_skip(3)
///     .with_max_episode_frames(18_000)
///     .with_seed(7)
///     .with_terminal_step(TerminalStepPolicy::Reject);
///
/// assert_eq!(config.frames_per_step(), 4);
/// assert!(config.is_headless());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Extra machine advances sharing one action within `act()`.
    pub frame_skip: u32,

    /// Episode frame cap. `None` leaves termination to the game alone.
    pub max_episode_frames: Option<u64>,

    /// Seed for agent-side randomness.
    pub seed: u64,

    /// Poll a renderer after each step. False means headless.
    pub display: bool,

    /// Behavior of `step()` after the episode has ended.
    pub terminal_step: TerminalStepPolicy,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            frame_skip: 0,
            max_episode_frames: None,
            seed: 0,
            display: false,
            terminal_step: TerminalStepPolicy::Permit,
        }
    }
}

impl EnvConfig {
    /// Create a headless config with no frame skip and no frame cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame skip.
    #[must_use]
    pub fn with_frame_skip(mut self, frame_skip: u32) -> Self {
        self.frame_skip = frame_skip;
        self
    }

    /// Set the episode frame cap.
    #[must_use]
    pub fn with_max_episode_frames(mut self, frames: u64) -> Self {
        self.max_episode_frames = Some(frames);
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable display polling.
    #[must_use]
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Set the terminal step policy.
    #[must_use]
    pub fn with_terminal_step(mut self, policy: TerminalStepPolicy) -> Self {
        self.terminal_step = policy;
        self
    }

    /// Machine frames consumed by one `act()` call.
    #[must_use]
    pub fn frames_per_step(&self) -> u64 {
        u64::from(self.frame_skip) + 1
    }

    /// True when no renderer will be polled.
    #[must_use]
    pub fn is_headless(&self) -> bool {
        !self.display
    }
}
