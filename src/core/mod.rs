//! Core types: actions, configuration, errors, RNG, persisted adapter state.
//!
//! Nothing here knows about a particular game or machine.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{Action, ActionInputs, ActionSet};
pub use config::{EnvConfig, TerminalStepPolicy};
pub use error::{EnvError, Result};
pub use rng::{EnvRng, EnvRngState};
pub use state::{AdapterState, StateReader, StateValue, StateWriter};

/// Scalar reward. Scores on these machines are integral.
pub type Reward = i64;
