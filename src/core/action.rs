//! The generic action enumeration and per-adapter legal subsets.
//!
//! Every supported title shares one fixed enumeration of 18 joystick ×
//! fire-button combinations. Adapters narrow it to an `ActionSet` of the
//! actions that mean something in their game.
//!
//! The discriminants follow the classic console joystick ordering, so a raw
//! action identifier `i` always names the same input on every title.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{EnvError, Result};

/// One discrete input for a single step.
///
/// ## Example
///
/// ```
/// use arcade_env::core::Action;
///
/// let a = Action::try_from(11_i64).unwrap();
/// assert_eq!(a, Action::RightFire);
/// assert!(a.inputs().fire);
/// assert!(Action::try_from(18_i64).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Noop = 0,
    Fire = 1,
    Up = 2,
    Right = 3,
    Left = 4,
    Down = 5,
    UpRight = 6,
    UpLeft = 7,
    DownRight = 8,
    DownLeft = 9,
    UpFire = 10,
    RightFire = 11,
    LeftFire = 12,
    DownFire = 13,
    UpRightFire = 14,
    UpLeftFire = 15,
    DownRightFire = 16,
    DownLeftFire = 17,
}

impl Action {
    /// Size of the generic enumeration.
    pub const COUNT: usize = 18;

    /// Every action, in identifier order.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Noop,
        Action::Fire,
        Action::Up,
        Action::Right,
        Action::Left,
        Action::Down,
        Action::UpRight,
        Action::UpLeft,
        Action::DownRight,
        Action::DownLeft,
        Action::UpFire,
        Action::RightFire,
        Action::LeftFire,
        Action::DownFire,
        Action::UpRightFire,
        Action::UpLeftFire,
        Action::DownRightFire,
        Action::DownLeftFire,
    ];

    /// Raw identifier of this action.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Canonical upper-case name, e.g. `"DOWNLEFTFIRE"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Action::Noop => "NOOP",
            Action::Fire => "FIRE",
            Action::Up => "UP",
            Action::Right => "RIGHT",
            Action::Left => "LEFT",
            Action::Down => "DOWN",
            Action::UpRight => "UPRIGHT",
            Action::UpLeft => "UPLEFT",
            Action::DownRight => "DOWNRIGHT",
            Action::DownLeft => "DOWNLEFT",
            Action::UpFire => "UPFIRE",
            Action::RightFire => "RIGHTFIRE",
            Action::LeftFire => "LEFTFIRE",
            Action::DownFire => "DOWNFIRE",
            Action::UpRightFire => "UPRIGHTFIRE",
            Action::UpLeftFire => "UPLEFTFIRE",
            Action::DownRightFire => "DOWNRIGHTFIRE",
            Action::DownLeftFire => "DOWNLEFTFIRE",
        }
    }

    /// Joystick directions and fire button held by this action.
    #[must_use]
    pub const fn inputs(self) -> ActionInputs {
        // (up, down, left, right, fire)
        let (up, down, left, right, fire) = match self {
            Action::Noop => (false, false, false, false, false),
            Action::Fire => (false, false, false, false, true),
            Action::Up => (true, false, false, false, false),
            Action::Right => (false, false, false, true, false),
            Action::Left => (false, false, true, false, false),
            Action::Down => (false, true, false, false, false),
            Action::UpRight => (true, false, false, true, false),
            Action::UpLeft => (true, false, true, false, false),
            Action::DownRight => (false, true, false, true, false),
            Action::DownLeft => (false, true, true, false, false),
            Action::UpFire => (true, false, false, false, true),
            Action::RightFire => (false, false, false, true, true),
            Action::LeftFire => (false, false, true, false, true),
            Action::DownFire => (false, true, false, false, true),
            Action::UpRightFire => (true, false, false, true, true),
            Action::UpLeftFire => (true, false, true, false, true),
            Action::DownRightFire => (false, true, false, true, true),
            Action::DownLeftFire => (false, true, true, false, true),
        };
        ActionInputs { up, down, left, right, fire }
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(id: i64) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Action::ALL.get(i).copied())
            .ok_or(EnvError::InvalidAction(id))
    }
}

impl FromStr for Action {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.name() == upper)
            .ok_or_else(|| EnvError::UnknownActionName(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical controller state for one action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionInputs {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Ordered set of distinct actions drawn from the generic enumeration.
///
/// Members are always kept in identifier order, so two sets built from the
/// same predicate compare equal regardless of how they were assembled.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionSet {
    actions: SmallVec<[Action; Action::COUNT]>,
}

impl ActionSet {
    /// The full generic enumeration.
    #[must_use]
    pub fn all() -> Self {
        Self::from_predicate(|_| true)
    }

    /// Every action for which `legal` returns true.
    pub fn from_predicate(legal: impl Fn(Action) -> bool) -> Self {
        Self {
            actions: Action::ALL.iter().copied().filter(|&a| legal(a)).collect(),
        }
    }

    /// Build from an arbitrary list, dropping duplicates.
    pub fn from_actions(actions: &[Action]) -> Self {
        Self::from_predicate(|a| actions.contains(&a))
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, action: Action) -> bool {
        self.actions.binary_search(&action).is_ok()
    }

    /// Number of actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action at position `index` in identifier order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Action> {
        self.actions.get(index).copied()
    }

    /// Iterate in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }

    /// View as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}
