//! Episode records produced by the agent loop.
//!
//! A trajectory is the action sequence of one episode, with the reward each
//! step returned. Recording is optional; summaries are always produced.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Action, Reward};

/// Actions taken in one episode, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Episode index within the run.
    pub episode: u64,

    /// Action applied at each step.
    pub actions: Vector<Action>,

    /// Summed reward returned by each step.
    pub rewards: Vector<Reward>,
}

impl Trajectory {
    /// Create an empty trajectory.
    pub fn new(episode: u64) -> Self {
        Self {
            episode,
            ..Self::default()
        }
    }

    /// Record one step.
    pub fn push(&mut self, action: Action, reward: Reward) {
        self.actions.push_back(action);
        self.rewards.push_back(reward);
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the trajectory is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Sum of all recorded rewards.
    pub fn total_reward(&self) -> Reward {
        self.rewards.iter().sum()
    }

    /// Iterate over `(action, reward)` pairs.
    pub fn steps(&self) -> impl Iterator<Item = (Action, Reward)> + '_ {
        self.actions.iter().copied().zip(self.rewards.iter().copied())
    }
}

/// Outcome of one episode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode index within the run.
    pub episode: u64,

    /// Cumulative reward.
    pub score: Reward,

    /// Frames stepped in the episode.
    pub frames: u64,

    /// Controller steps taken.
    pub steps: u64,

    /// True if the game reached its own end; false if a frame limit cut it short.
    pub game_over: bool,
}

/// Outcome of a whole run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub episodes: Vec<EpisodeSummary>,

    /// Recorded trajectories, one per episode, when recording is on.
    pub trajectories: Vec<Trajectory>,

    pub stats: super::stats::RunStats,
}

impl RunSummary {
    /// Mean episode score, or `None` for an empty run.
    pub fn mean_score(&self) -> Option<f64> {
        if self.episodes.is_empty() {
            return None;
        }
        let total: Reward = self.episodes.iter().map(|e| e.score).sum();
        Some(total as f64 / self.episodes.len() as f64)
    }

    /// Highest episode score.
    pub fn best_score(&self) -> Option<Reward> {
        self.episodes.iter().map(|e| e.score).max()
    }
}
