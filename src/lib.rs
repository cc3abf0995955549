//! # arcade-env
//!
//! Reinforcement-learning environment layer for emulated 8-bit console games.
//!
//! ## Design Principles
//!
//! 1. **One Contract, Many Titles**: Every game is reached through the same
//!    `GameAdapter` capability set. Title-specific behavior lives in static
//!    descriptors, never in the controller.
//!
//! 2. **Declarative Decoding**: Score and game-over are described as RAM
//!    offsets plus a decode rule, so adapters are testable against a plain
//!    byte table without an emulator.
//!
//! 3. **Headless First**: Rendering is pulled, optional, and never required
//!    for the loop to progress.
//!
//! ## Architecture
//!
//! - **Machine Collaborator**: The emulator is external. `Machine` is the
//!   narrow interface the episode loop needs; `ScriptedMachine` stands in
//!   for it in tests and benchmarks.
//!
//! - **Episode Controller**: Owns the machine, the adapter and one snapshot
//!   buffer, and drives reset, frame-skipped stepping and termination.
//!
//! - **Derived State Only**: Adapter save/load covers score, reward and
//!   title counters. Machine state is the caller's to persist.
//!
//! ## Modules
//!
//! - `core`: Actions, configuration, errors, RNG, adapter state stream
//! - `machine`: Machine traits, ROM images, snapshots, scripted machine
//! - `adapter`: Adapter contract, RAM decoding, descriptors, registry
//! - `games`: Supported titles
//! - `env`: Episode controller
//! - `agent`: Agents, the agent loop, trajectories and statistics
//! - `render`: Renderer collaborator and palettes

pub mod core;
pub mod machine;
pub mod adapter;
pub mod games;
pub mod env;
pub mod agent;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionInputs, ActionSet,
    AdapterState, StateReader, StateValue, StateWriter,
    EnvConfig, TerminalStepPolicy,
    EnvError, Result, Reward,
    EnvRng, EnvRngState,
};

pub use crate::machine::{Machine, MachineSnapshot, MemoryReader, Rom, ScriptedMachine};

pub use crate::adapter::{
    AdapterRegistry, GameAdapter, GameDescriptor, RamAdapter,
    Condition, ScoreLayout, StartProcedure, TerminalRule,
};

pub use crate::env::{EpisodeController, EpisodeStatus};

pub use crate::agent::{
    Agent, AgentLoop, AgentView, ConstantAgent, RandomAgent,
    EpisodeSummary, RunStats, RunSummary, RunnerConfig, Trajectory,
};

pub use crate::render::{Palette, Renderer};
