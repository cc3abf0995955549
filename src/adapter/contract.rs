//! The contract every game adapter implements.
//!
//! An adapter turns raw machine memory into the values a learning agent
//! needs: score, per-step reward and game-over. It only ever reads the
//! machine; advancing it is the controller's job.
//!
//! ## Implementation Notes
//!
//! - `step`: called exactly once per machine frame. Calling it more or fewer
//!   times per frame is a contract violation with adapter-defined effects.
//! - `reward`: the delta attributable to the most recent `step` only.
//! - `available_actions`: computed once at construction, never empty, and
//!   identical across calls for the adapter's lifetime.
//! - `save_state`/`load_state`: derived fields only, in an order each
//!   adapter documents. A reader that disagrees with the writer's order is
//!   not detected.

use std::fmt;

use crate::core::{Action, ActionSet, Result, Reward, StateReader, StateWriter};
use crate::machine::MemoryReader;

/// Reset-switch frames applied after power-on when a title declares nothing else.
pub const DEFAULT_RESET_STEPS: u32 = 4;

/// Frames of the default action run after the reset switch when a title declares nothing else.
pub const DEFAULT_WARMUP_FRAMES: u32 = 60;

/// How the controller brings a title to the point where the agent takes over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartProcedure {
    /// Frames with the console reset switch held.
    pub resets: u32,
    /// Frames of the adapter's default action after the resets.
    pub warmup_frames: u32,
}

impl StartProcedure {
    #[must_use]
    pub const fn new(resets: u32, warmup_frames: u32) -> Self {
        Self { resets, warmup_frames }
    }

    /// Total machine frames the procedure consumes.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.resets as u64 + self.warmup_frames as u64
    }
}

impl Default for StartProcedure {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_STEPS, DEFAULT_WARMUP_FRAMES)
    }
}

/// Per-title translation of machine memory into RL signals.
pub trait GameAdapter: fmt::Debug + Send {
    /// Stable title identifier, as resolved by the registry.
    fn rom(&self) -> &str;

    /// Zero all derived state, as if freshly constructed.
    fn reset(&mut self);

    /// Recompute derived state from the frame the machine just completed.
    fn step(&mut self, memory: &dyn MemoryReader);

    /// Has the game ended?
    fn is_terminal(&self) -> bool;

    /// Reward attributable to the most recent `step`.
    fn reward(&self) -> Reward;

    /// Score observed at the most recent `step`.
    fn score(&self) -> Reward;

    /// Remaining lives, for titles that expose them.
    fn lives(&self) -> Option<u32> {
        None
    }

    /// Legal subset of the generic enumeration.
    fn available_actions(&self) -> &ActionSet;

    /// Is `action` meaningful for this title?
    fn is_legal(&self, action: Action) -> bool {
        self.available_actions().contains(action)
    }

    /// Append derived fields to `out` in the documented order.
    fn save_state(&self, out: &mut StateWriter);

    /// Read derived fields back in the order `save_state` wrote them.
    fn load_state(&mut self, input: &mut StateReader<'_>) -> Result<()>;

    /// Independent copy carrying the same derived state and concrete type.
    fn clone_adapter(&self) -> Box<dyn GameAdapter>;

    /// Resets and warm-up to apply before agent control begins.
    fn start_procedure(&self) -> StartProcedure {
        StartProcedure::default()
    }

    /// Action used for warm-up and as the first action when none is given.
    fn default_action(&self) -> Action {
        Action::Noop
    }
}

impl Clone for Box<dyn GameAdapter> {
    fn clone(&self) -> Self {
        self.clone_adapter()
    }
}
