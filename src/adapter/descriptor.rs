//! Declarative per-title descriptors and the adapter that runs them.
//!
//! Most titles differ only in where they keep their score, which bytes
//! signal game over, and which joystick inputs they react to. A
//! `GameDescriptor` states exactly that, and `RamAdapter` implements the
//! full `GameAdapter` contract on top of it.
//!
//! ## Persisted field order
//!
//! `RamAdapter::save_state` writes, in order:
//!
//! 1. `reward: int`
//! 2. `score: int`
//! 3. `terminal: bool`
//! 4. `armed: bool`, only if the descriptor declares `armed_when`
//! 5. `lives: int`, only if the descriptor declares `lives`

use crate::core::{Action, ActionSet, EnvError, Result, Reward, StateReader, StateWriter};
use crate::machine::MemoryReader;

use super::contract::{GameAdapter, StartProcedure};
use super::decode::{Condition, ScoreLayout, TerminalRule};

/// Everything a title's adapter needs to know about its memory layout.
#[derive(Clone, Copy, Debug)]
pub struct GameDescriptor {
    /// Registry identifier.
    pub rom: &'static str,

    /// Score location and encoding.
    pub score: ScoreLayout,

    /// Game-over predicate.
    pub terminal: TerminalRule,

    /// Terminal conditions are ignored until this has held at least once.
    ///
    /// Covers titles whose game-over bytes also match before play starts.
    pub armed_when: Option<Condition>,

    /// Address of the lives counter, if the title has one.
    pub lives: Option<u16>,

    /// Legal subset of the generic enumeration. Must not be empty.
    pub legal_actions: &'static [Action],

    /// Resets and warm-up before agent control.
    pub start: StartProcedure,

    /// Warm-up and first action.
    pub default_action: Action,
}

impl GameDescriptor {
    /// Number of fields `RamAdapter` persists for this title.
    #[must_use]
    pub fn state_fields(&self) -> usize {
        3 + usize::from(self.armed_when.is_some()) + usize::from(self.lives.is_some())
    }
}

/// `GameAdapter` driven by a static `GameDescriptor`.
#[derive(Clone, Debug)]
pub struct RamAdapter {
    descriptor: &'static GameDescriptor,
    actions: ActionSet,
    score: Reward,
    reward: Reward,
    terminal: bool,
    armed: bool,
    lives: i64,
}

impl RamAdapter {
    /// Build an adapter for `descriptor`.
    ///
    /// Panics if the descriptor declares no legal actions.
    #[must_use]
    pub fn new(descriptor: &'static GameDescriptor) -> Self {
        let actions = ActionSet::from_actions(descriptor.legal_actions);
        assert!(
            !actions.is_empty(),
            "{}: legal action set must not be empty",
            descriptor.rom
        );

        let mut adapter = Self {
            descriptor,
            actions,
            score: 0,
            reward: 0,
            terminal: false,
            armed: false,
            lives: 0,
        };
        adapter.reset();
        adapter
    }

    /// The descriptor this adapter runs.
    #[must_use]
    pub fn descriptor(&self) -> &'static GameDescriptor {
        self.descriptor
    }
}

impl GameAdapter for RamAdapter {
    fn rom(&self) -> &str {
        self.descriptor.rom
    }

    fn reset(&mut self) {
        self.score = 0;
        self.reward = 0;
        self.terminal = false;
        self.armed = self.descriptor.armed_when.is_none();
        self.lives = 0;
    }

    fn step(&mut self, memory: &dyn MemoryReader) {
        let score = self.descriptor.score.decode(memory);
        self.reward = score - self.score;
        self.score = score;

        if !self.armed {
            self.armed = self
                .descriptor
                .armed_when
                .map_or(true, |condition| condition.holds(memory));
        }
        self.terminal = self.armed && self.descriptor.terminal.evaluate(memory);

        if let Some(address) = self.descriptor.lives {
            self.lives = i64::from(memory.peek(address));
        }
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn reward(&self) -> Reward {
        self.reward
    }

    fn score(&self) -> Reward {
        self.score
    }

    fn lives(&self) -> Option<u32> {
        self.descriptor.lives.and_then(|_| u32::try_from(self.lives).ok())
    }

    fn available_actions(&self) -> &ActionSet {
        &self.actions
    }

    fn save_state(&self, out: &mut StateWriter) {
        out.put_int(self.reward);
        out.put_int(self.score);
        out.put_bool(self.terminal);
        if self.descriptor.armed_when.is_some() {
            out.put_bool(self.armed);
        }
        if self.descriptor.lives.is_some() {
            out.put_int(self.lives);
        }
    }

    fn load_state(&mut self, input: &mut StateReader<'_>) -> Result<()> {
        self.reward = input.get_int()?;
        self.score = input.get_int()?;
        self.terminal = input.get_bool()?;
        if self.descriptor.armed_when.is_some() {
            self.armed = input.get_bool()?;
        }
        if self.descriptor.lives.is_some() {
            let lives = input.get_int()?;
            if lives < 0 {
                return Err(EnvError::StateStream(format!("negative lives count {}", lives)));
            }
            self.lives = lives;
        }
        Ok(())
    }

    fn clone_adapter(&self) -> Box<dyn GameAdapter> {
        Box::new(self.clone())
    }

    fn start_procedure(&self) -> StartProcedure {
        self.descriptor.start
    }

    fn default_action(&self) -> Action {
        self.descriptor.default_action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{ram_index, RAM_SIZE};

    const OUT_OF_LIVES: &[Condition] = &[Condition::equals(0x82, 0)];

    static LATCHED: GameDescriptor = GameDescriptor {
        rom: "latched",
        score: ScoreLayout::PackedDecimal(&[0x81]),
        terminal: TerminalRule::All(OUT_OF_LIVES),
        armed_when: Some(Condition::equals(0x82, 3)),
        lives: Some(0x82),
        legal_actions: &[Action::Fire, Action::Noop],
        start: StartProcedure::new(0, 0),
        default_action: Action::Fire,
    };

    static EMPTY: GameDescriptor = GameDescriptor {
        rom: "empty",
        score: ScoreLayout::PackedDecimal(&[]),
        terminal: TerminalRule::Never,
        armed_when: None,
        lives: None,
        legal_actions: &[],
        start: StartProcedure::new(0, 0),
        default_action: Action::Noop,
    };

    fn ram(lives: u8, score: u8) -> Vec<u8> {
        let mut ram = vec![0u8; RAM_SIZE];
        ram[ram_index(0x82)] = lives;
        ram[ram_index(0x81)] = score;
        ram
    }

    #[test]
    fn test_terminal_waits_for_arm_condition() {
        let mut adapter = RamAdapter::new(&LATCHED);

        // Lives read zero before the game starts: not terminal yet.
        adapter.step(&ram(0, 0));
        assert!(!adapter.is_terminal());

        adapter.step(&ram(3, 0));
        assert!(!adapter.is_terminal());
        assert_eq!(adapter.lives(), Some(3));

        adapter.step(&ram(0, 0));
        assert!(adapter.is_terminal());
    }

    #[test]
    fn test_reset_disarms() {
        let mut adapter = RamAdapter::new(&LATCHED);
        adapter.step(&ram(3, 0x10));
        adapter.reset();

        adapter.step(&ram(0, 0));
        assert!(!adapter.is_terminal());
        assert_eq!(adapter.score(), 0);
    }

    #[test]
    fn test_reward_is_delta() {
        let mut adapter = RamAdapter::new(&LATCHED);
        adapter.step(&ram(3, 0x25));
        assert_eq!(adapter.reward(), 25);
        adapter.step(&ram(3, 0x40));
        assert_eq!(adapter.reward(), 15);
        adapter.step(&ram(3, 0x40));
        assert_eq!(adapter.reward(), 0);
    }

    #[test]
    fn test_state_field_count() {
        assert_eq!(LATCHED.state_fields(), 5);
        assert_eq!(EMPTY.state_fields(), 3);

        let adapter = RamAdapter::new(&LATCHED);
        let mut w = StateWriter::new();
        adapter.save_state(&mut w);
        assert_eq!(w.finish().len(), 5);
    }

    #[test]
    fn test_descriptor_declarations_exposed() {
        let adapter = RamAdapter::new(&LATCHED);
        assert_eq!(adapter.default_action(), Action::Fire);
        assert_eq!(adapter.start_procedure(), StartProcedure::new(0, 0));
        assert_eq!(adapter.available_actions().as_slice(), &[Action::Noop, Action::Fire]);
        assert!(adapter.is_legal(Action::Fire));
        assert!(!adapter.is_legal(Action::Up));
    }

    #[test]
    fn test_negative_lives_rejected_on_load() {
        let mut w = StateWriter::new();
        w.put_int(0);
        w.put_int(0);
        w.put_bool(false);
        w.put_bool(true);
        w.put_int(-1);
        let state = w.finish();

        let mut adapter = RamAdapter::new(&LATCHED);
        adapter.step(&ram(3, 0));
        let err = adapter.load_state(&mut StateReader::new(&state)).unwrap_err();
        assert!(matches!(err, EnvError::StateStream(_)));
        assert_eq!(adapter.lives(), Some(3));
    }

    #[test]
    #[should_panic(expected = "legal action set must not be empty")]
    fn test_empty_legal_set_panics() {
        let _ = RamAdapter::new(&EMPTY);
    }
}
