//! Pong.
//!
//! The score is the point difference between the player (0x8E) and the
//! computer (0x8D); the game ends when either side reaches 21.

use crate::adapter::{Condition, GameAdapter, GameDescriptor, RamAdapter, ScoreLayout, StartProcedure, TerminalRule};
use crate::core::Action;

/// Registry identifier.
pub const ROM: &str = "pong";

const OURS: u16 = 0x8E;
const THEIRS: u16 = 0x8D;

const GAME_OVER: &[Condition] = &[Condition::equals(THEIRS, 21), Condition::equals(OURS, 21)];

pub static DESCRIPTOR: GameDescriptor = GameDescriptor {
    rom: ROM,
    score: ScoreLayout::Difference { ours: OURS, theirs: THEIRS },
    terminal: TerminalRule::Any(GAME_OVER),
    armed_when: None,
    lives: None,
    legal_actions: &[
        Action::Noop,
        Action::Fire,
        Action::Right,
        Action::Left,
        Action::RightFire,
        Action::LeftFire,
    ],
    start: StartProcedure::new(4, 60),
    default_action: Action::Noop,
};

/// Fresh Pong adapter.
#[must_use]
pub fn adapter() -> Box<dyn GameAdapter> {
    Box::new(RamAdapter::new(&DESCRIPTOR))
}
