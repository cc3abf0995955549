//! The agent loop: run an agent against a controller for a budget of
//! episodes or frames.
//!
//! Each episode:
//!
//! 1. Reset the controller unless it is freshly reset
//! 2. Ask the agent for a first action, falling back to the title's default
//! 3. Step with the configured frame skip until the episode ends or the
//!    frame budget runs out, asking the agent for each further action
//! 4. Hand the agent an `EpisodeSummary`
//!
//! A renderer, if attached, is polled after every step only when the
//! controller is configured with `display = true`.

use std::time::Instant;

use tracing::{debug, info};

use crate::core::{Action, Result};
use crate::env::{EpisodeController, EpisodeStatus};
use crate::machine::Machine;
use crate::render::{Palette, Renderer};

use super::agent::{Agent, AgentView};
use super::stats::ThroughputMeter;
use super::trajectory::{EpisodeSummary, RunSummary, Trajectory};

/// Frames between throughput log lines by default.
pub const DEFAULT_THROUGHPUT_INTERVAL: u64 = 1000;

/// Budgets and recording options for an `AgentLoop`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Stop after this many episodes.
    pub max_episodes: Option<usize>,

    /// Stop once this many frames have been stepped across all episodes.
    pub max_total_frames: Option<u64>,

    /// Keep a `Trajectory` per episode.
    pub record_trajectory: bool,

    /// Frames between throughput log lines. 0 disables them.
    pub throughput_log_interval: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_episodes: None,
            max_total_frames: None,
            record_trajectory: false,
            throughput_log_interval: DEFAULT_THROUGHPUT_INTERVAL,
        }
    }
}

impl RunnerConfig {
    /// Create a new runner config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the episode budget.
    pub fn with_max_episodes(mut self, episodes: usize) -> Self {
        self.max_episodes = Some(episodes);
        self
    }

    /// Set the total frame budget.
    pub fn with_max_total_frames(mut self, frames: u64) -> Self {
        self.max_total_frames = Some(frames);
        self
    }

    /// Turn trajectory recording on or off.
    pub fn with_record_trajectory(mut self, record: bool) -> Self {
        self.record_trajectory = record;
        self
    }

    /// Set the throughput log interval.
    pub fn with_throughput_log_interval(mut self, frames: u64) -> Self {
        self.throughput_log_interval = frames;
        self
    }

    /// True if neither budget is set; such a loop runs until stopped externally.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.max_episodes.is_none() && self.max_total_frames.is_none()
    }
}

/// Runs agents against a controller and tracks run-wide budgets.
pub struct AgentLoop {
    config: RunnerConfig,
    renderer: Option<Box<dyn Renderer>>,
    palette: Palette,
    summary: RunSummary,
    meter: ThroughputMeter,
}

impl AgentLoop {
    /// Create a headless loop.
    pub fn new(config: RunnerConfig) -> Self {
        let meter = ThroughputMeter::new(config.throughput_log_interval);
        Self {
            config,
            renderer: None,
            palette: Palette::grayscale(),
            summary: RunSummary::default(),
            meter,
        }
    }

    /// Attach a renderer.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Use `palette` when polling the renderer.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Has either budget been used up?
    #[must_use]
    pub fn has_terminated(&self) -> bool {
        let episodes_done = self
            .config
            .max_episodes
            .map_or(false, |max| self.summary.episodes.len() >= max);
        let frames_done = self
            .config
            .max_total_frames
            .map_or(false, |max| self.summary.stats.frames >= max);
        episodes_done || frames_done
    }

    /// Results so far.
    #[must_use]
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Consume the loop and return its results.
    pub fn into_summary(self) -> RunSummary {
        self.summary
    }

    /// Play episodes until a budget is used up.
    ///
    /// With no budget set this never returns unless an error does.
    pub fn run<M, A>(&mut self, env: &mut EpisodeController<M>, agent: &mut A) -> Result<&RunSummary>
    where
        M: Machine,
        A: Agent + ?Sized,
    {
        info!(agent = agent.name(), "agent loop started");
        while !self.has_terminated() {
            self.play_episode(env, agent)?;
        }
        info!(
            episodes = self.summary.episodes.len(),
            frames = self.summary.stats.frames,
            fps = self.summary.stats.frames_per_second(),
            "agent loop finished"
        );
        Ok(&self.summary)
    }

    /// Play one episode, stopping early if the frame budget runs out.
    pub fn play_episode<M, A>(&mut self, env: &mut EpisodeController<M>, agent: &mut A) -> Result<EpisodeSummary>
    where
        M: Machine,
        A: Agent + ?Sized,
    {
        if env.status() != EpisodeStatus::Ready {
            env.reset()?;
        }
        let started = Instant::now();
        let episode = env.episode_index();
        let legal = env.available_actions()?.clone();

        let default_action = env.adapter().map_or(Action::Noop, |a| a.default_action());
        let mut action = agent.episode_start(episode).unwrap_or(default_action);
        let mut trajectory = self.config.record_trajectory.then(|| Trajectory::new(episode));
        let mut steps = 0;

        loop {
            if self.frame_budget_spent() {
                debug!(episode, "frame budget spent mid-episode");
                break;
            }

            // The last step of a run shrinks to fit what is left of the budget.
            let frame_skip = match self.remaining_frames() {
                Some(left) => env.config().frame_skip.min(u32::try_from(left - 1).unwrap_or(u32::MAX)),
                None => env.config().frame_skip,
            };
            let before = env.episode_frame();
            let reward = env.step(action, frame_skip)?;
            let frames = env.episode_frame() - before;
            steps += 1;
            self.summary.stats.steps += 1;
            self.summary.stats.frames += frames;

            if let Some(t) = trajectory.as_mut() {
                t.push(action, reward);
            }
            if env.config().display {
                if let Some(renderer) = self.renderer.as_mut() {
                    let snapshot = env.snapshot();
                    renderer.display(snapshot.pixels(), snapshot.width(), snapshot.height(), &self.palette);
                }
            }
            if let Some(fps) = self.meter.tick(self.summary.stats.frames) {
                info!(frames = self.summary.stats.frames, fps, "throughput");
            }

            if env.is_terminal() {
                break;
            }

            let view = AgentView {
                episode,
                episode_frame: env.episode_frame(),
                score: env.episode_score(),
                last_reward: reward,
                legal: &legal,
                snapshot: env.snapshot(),
            };
            action = agent.act(&view);
        }

        let summary = EpisodeSummary {
            episode,
            score: env.episode_score(),
            frames: env.episode_frame(),
            steps,
            game_over: env.adapter().map_or(false, |a| a.is_terminal()),
        };
        info!(
            episode,
            score = summary.score,
            frames = summary.frames,
            "episode ended"
        );

        agent.episode_end(&summary);
        self.summary.stats.episodes += 1;
        self.summary.stats.time_us += started.elapsed().as_micros() as u64;
        self.summary.episodes.push(summary.clone());
        if let Some(t) = trajectory {
            self.summary.trajectories.push(t);
        }
        Ok(summary)
    }

    fn frame_budget_spent(&self) -> bool {
        self.remaining_frames() == Some(0)
    }

    fn remaining_frames(&self) -> Option<u64> {
        self.config
            .max_total_frames
            .map(|max| max.saturating_sub(self.summary.stats.frames))
    }
}
