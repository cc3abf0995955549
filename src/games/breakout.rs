//! Breakout.
//!
//! Packed-decimal score at 0xCD (units and tens) and 0xCC (hundreds). The
//! lives byte at 0xB9 reads zero before the first serve, so game over only
//! counts once the five-ball count has been seen.

use crate::adapter::{Condition, GameAdapter, GameDescriptor, RamAdapter, ScoreLayout, StartProcedure, TerminalRule};
use crate::core::Action;

/// Registry identifier.
pub const ROM: &str = "breakout";

const LIVES: u16 = 0xB9;

const GAME_OVER: &[Condition] = &[Condition::equals(LIVES, 0)];

pub static DESCRIPTOR: GameDescriptor = GameDescriptor {
    rom: ROM,
    score: ScoreLayout::PackedDecimal(&[0xCD, 0xCC]),
    terminal: TerminalRule::All(GAME_OVER),
    armed_when: Some(Condition::equals(LIVES, 5)),
    lives: Some(LIVES),
    legal_actions: &[Action::Noop, Action::Fire, Action::Right, Action::Left],
    start: StartProcedure::new(4, 60),
    default_action: Action::Noop,
};

/// Fresh Breakout adapter.
#[must_use]
pub fn adapter() -> Box<dyn GameAdapter> {
    Box::new(RamAdapter::new(&DESCRIPTOR))
}
