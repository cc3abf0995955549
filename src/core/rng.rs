//! Deterministic agent-side randomness.
//!
//! The machine and adapters are fully deterministic; the only randomness in
//! an episode loop belongs to the agent. `EnvRng` keeps it reproducible:
//!
//! - **Seeded**: same seed, same sequence
//! - **Per-episode streams**: `for_episode(n)` gives episode `n` its own
//!   sequence, independent of how many draws earlier episodes made
//! - **Capturable**: O(1) state save and restore
//!
//! ```
//! use arcade_env::core::{ActionSet, EnvRng};
//!
//! let legal = ActionSet::all();
//! let mut a = EnvRng::new(42).for_episode(3);
//! let mut b = EnvRng::new(42).for_episode(3);
//! assert_eq!(a.choose_action(&legal), b.choose_action(&legal));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionSet};

const EPISODE_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct EnvRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl EnvRng {
    /// Create a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent stream for one episode.
    #[must_use]
    pub fn for_episode(&self, episode: u64) -> Self {
        Self::new(self.seed.wrapping_add(episode.wrapping_add(1).wrapping_mul(EPISODE_STRIDE)))
    }

    /// Uniform index in `range`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniformly pick a member of `actions`, or `None` if it is empty.
    pub fn choose_action(&mut self, actions: &ActionSet) -> Option<Action> {
        if actions.is_empty() {
            return None;
        }
        actions.get(self.gen_range_usize(0..actions.len()))
    }

    /// Capture the current position.
    #[must_use]
    pub fn state(&self) -> EnvRngState {
        EnvRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore a captured position.
    #[must_use]
    pub fn from_state(state: &EnvRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable generator position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvRngState {
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}
