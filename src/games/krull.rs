//! Krull.
//!
//! Six-digit packed-decimal score at 0x9E/0x9D/0x9C, least significant
//! first. The game is over when the lives byte at 0x9F reads zero while
//! the mode byte at 0xA2 reads 0x03 and the flag byte at 0x80 reads 0x80.

use crate::adapter::{Condition, GameAdapter, GameDescriptor, RamAdapter, ScoreLayout, StartProcedure, TerminalRule};
use crate::core::Action;

/// Registry identifier.
pub const ROM: &str = "krull";

const LIVES: u16 = 0x9F;

const GAME_OVER: &[Condition] = &[
    Condition::equals(LIVES, 0),
    Condition::equals(0xA2, 0x03),
    Condition::equals(0x80, 0x80),
];

pub static DESCRIPTOR: GameDescriptor = GameDescriptor {
    rom: ROM,
    score: ScoreLayout::PackedDecimal(&[0x9E, 0x9D, 0x9C]),
    terminal: TerminalRule::All(GAME_OVER),
    armed_when: None,
    lives: Some(LIVES),
    legal_actions: &[
        Action::Noop,
        Action::Fire,
        Action::Up,
        Action::Right,
        Action::Left,
        Action::Down,
        Action::UpFire,
        Action::RightFire,
        Action::LeftFire,
        Action::DownFire,
    ],
    start: StartProcedure::new(4, 60),
    default_action: Action::Noop,
};

/// Fresh Krull adapter.
#[must_use]
pub fn adapter() -> Box<dyn GameAdapter> {
    Box::new(RamAdapter::new(&DESCRIPTOR))
}
