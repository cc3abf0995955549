//! Agent harness: policies, the episode loop and its records.
//!
//! - `Agent`: chooses an action per step, with episode hooks
//! - `AgentLoop`: runs an agent under episode and frame budgets
//! - `Trajectory` / `EpisodeSummary` / `RunSummary`: what a run produced
//! - `RunStats`: throughput counters

pub mod agent;
pub mod runner;
pub mod stats;
pub mod trajectory;

pub use agent::{Agent, AgentView, ConstantAgent, RandomAgent};
pub use runner::{AgentLoop, RunnerConfig, DEFAULT_THROUGHPUT_INTERVAL};
pub use stats::{RunStats, ThroughputMeter};
pub use trajectory::{EpisodeSummary, RunSummary, Trajectory};
