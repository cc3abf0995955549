//! The episode controller: one machine, one adapter, one episode at a time.
//!
//! The controller owns everything one episode loop touches and drives it
//! through a small state machine:
//!
//! ```text
//! Uninitialized --load--> Ready --step--> Running --(terminal)--> Terminal
//!                           ^                                        |
//!                           +------------------reset-----------------+
//! ```
//!
//! ## Step
//!
//! `step(action, k)` advances the machine `k + 1` frames with the same
//! action on the first joystick and `Noop` on the second. After every
//! sub-frame it captures a snapshot, lets the adapter recompute its state
//! and adds the adapter's reward to the call's total. The snapshot always
//! reflects the last completed sub-frame.
//!
//! ## Termination
//!
//! An episode ends when the adapter reports game over or when the episode
//! frame counter reaches the configured cap, whichever comes first.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::adapter::{AdapterRegistry, GameAdapter};
use crate::core::{
    Action, ActionSet, AdapterState, EnvConfig, EnvError, Result, Reward, StateReader, StateWriter,
    TerminalStepPolicy,
};
use crate::machine::{Machine, MachineSnapshot, Rom};

/// Lifecycle state of an `EpisodeController`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EpisodeStatus {
    /// No game loaded.
    #[default]
    Uninitialized,
    /// Reset done, no step taken yet.
    Ready,
    /// At least one step taken, episode not over.
    Running,
    /// The episode has ended. Call `reset()`.
    Terminal,
}

/// Drives episodes of one title on one machine.
///
/// ## Example
///
/// ```
/// use arcade_env::core::{Action, EnvConfig};
/// use arcade_env::env::{EpisodeController, EpisodeStatus};
/// use arcade_env::machine::{Rom, ScriptedMachine};
///
/// let mut env = EpisodeController::new(ScriptedMachine::new(160, 210), EnvConfig::default());
/// env.load(Rom::from_bytes("pong", vec![0xEA; 2048])).unwrap();
/// assert_eq!(env.status(), EpisodeStatus::Ready);
///
/// env.step(Action::Fire, 3).unwrap();
/// assert_eq!(env.episode_frame(), 4);
/// assert_eq!(env.status(), EpisodeStatus::Running);
/// ```
#[derive(Debug)]
pub struct EpisodeController<M: Machine> {
    machine: M,
    registry: AdapterRegistry,
    adapter: Option<Box<dyn GameAdapter>>,
    snapshot: MachineSnapshot,
    config: EnvConfig,
    status: EpisodeStatus,

    episode_frame: u64,
    total_frames: u64,
    episode_score: Reward,
    episode_index: u64,
}

impl<M: Machine> EpisodeController<M> {
    /// Create a controller resolving titles against the built-in registry.
    pub fn new(machine: M, config: EnvConfig) -> Self {
        Self::with_registry(machine, config, AdapterRegistry::builtin())
    }

    /// Create a controller with a custom registry.
    pub fn with_registry(machine: M, config: EnvConfig, registry: AdapterRegistry) -> Self {
        Self {
            machine,
            registry,
            adapter: None,
            snapshot: MachineSnapshot::default(),
            config,
            status: EpisodeStatus::Uninitialized,
            episode_frame: 0,
            total_frames: 0,
            episode_score: 0,
            episode_index: 0,
        }
    }

    // === Loading ===

    /// Bind `rom` to the machine, resolve its adapter and reset.
    ///
    /// On failure the controller keeps whatever it had loaded before.
    pub fn load(&mut self, rom: Rom) -> Result<()> {
        let adapter = self.registry.create(rom.identifier())?;
        debug!(rom = %rom.identifier(), "resolved game adapter");

        self.machine.insert_cartridge(&rom)?;
        info!(rom = %rom.identifier(), bytes = rom.image().len(), "loaded ROM");

        self.adapter = Some(adapter);
        self.episode_index = 0;
        self.start_episode()
    }

    /// Read a ROM file and `load` it.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load(Rom::open(path)?)
    }

    // === Episode control ===

    /// Start a new episode.
    pub fn reset(&mut self) -> Result<()> {
        if self.adapter.is_none() {
            return Err(EnvError::NotLoaded);
        }
        self.episode_index += 1;
        self.start_episode()
    }

    fn start_episode(&mut self) -> Result<()> {
        let adapter = self.adapter.as_mut().ok_or(EnvError::NotLoaded)?;
        let start = adapter.start_procedure();
        let warmup_action = adapter.default_action();

        self.machine.reset_to_power_on();
        for _ in 0..start.resets {
            self.machine.hold_reset_switch();
        }
        for _ in 0..start.warmup_frames {
            self.machine.advance_frame(warmup_action, Action::Noop);
        }
        self.total_frames += start.frames();

        self.episode_frame = 0;
        self.episode_score = 0;
        self.snapshot.capture_from(&self.machine, 0);
        adapter.reset();

        debug!(
            episode = self.episode_index,
            rom = %adapter.rom(),
            "episode reset"
        );
        self.status = EpisodeStatus::Ready;
        self.refresh_status();
        Ok(())
    }

    /// Apply `action` for `frame_skip + 1` frames and return the summed reward.
    pub fn step(&mut self, action: Action, frame_skip: u32) -> Result<Reward> {
        if self.adapter.is_none() {
            return Err(EnvError::NotLoaded);
        }
        if self.is_terminal() {
            match self.config.terminal_step {
                TerminalStepPolicy::Reject => return Err(EnvError::EpisodeOver),
                TerminalStepPolicy::Permit => warn!(
                    episode = self.episode_index,
                    frame = self.episode_frame,
                    "step on a terminal episode"
                ),
            }
        }

        let adapter = self.adapter.as_mut().ok_or(EnvError::NotLoaded)?;
        let mut reward = 0;
        for _ in 0..=frame_skip {
            self.machine.advance_frame(action, Action::Noop);
            self.episode_frame += 1;
            self.total_frames += 1;
            self.snapshot.capture_from(&self.machine, self.episode_frame);
            adapter.step(&self.machine);
            reward += adapter.reward();
        }
        self.episode_score += reward;

        self.status = EpisodeStatus::Running;
        self.refresh_status();
        Ok(reward)
    }

    /// `step` with a raw action identifier.
    pub fn step_id(&mut self, action: i64, frame_skip: u32) -> Result<Reward> {
        let action = Action::try_from(action)?;
        self.step(action, frame_skip)
    }

    /// `step` with the configured frame skip.
    pub fn act(&mut self, action: Action) -> Result<Reward> {
        self.step(action, self.config.frame_skip)
    }

    /// Has the episode ended, by game over or by the frame cap?
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        let game_over = self.adapter.as_ref().map_or(false, |a| a.is_terminal());
        let capped = self
            .config
            .max_episode_frames
            .map_or(false, |cap| self.episode_frame >= cap);
        game_over || capped
    }

    /// Change the episode frame cap. `None` removes it.
    ///
    /// The status follows immediately: lowering the cap to or below the
    /// current frame ends the episode, raising it past the frame resumes it.
    pub fn set_max_episode_frames(&mut self, cap: Option<u64>) {
        self.config.max_episode_frames = cap;
        self.refresh_status();
    }

    /// Bring `status` in line with `is_terminal()`.
    fn refresh_status(&mut self) {
        self.status = match self.status {
            EpisodeStatus::Uninitialized => EpisodeStatus::Uninitialized,
            _ if self.is_terminal() => EpisodeStatus::Terminal,
            EpisodeStatus::Terminal if self.episode_frame == 0 => EpisodeStatus::Ready,
            EpisodeStatus::Terminal => EpisodeStatus::Running,
            live => live,
        };
    }

    // === Adapter state ===

    /// Save the adapter's derived fields.
    pub fn save_adapter_state(&self) -> Result<AdapterState> {
        let adapter = self.adapter.as_ref().ok_or(EnvError::NotLoaded)?;
        let mut out = StateWriter::new();
        adapter.save_state(&mut out);
        Ok(out.finish())
    }

    /// Restore derived fields saved by `save_adapter_state`.
    ///
    /// Machine state is not covered; restore it separately.
    pub fn load_adapter_state(&mut self, state: &AdapterState) -> Result<()> {
        let adapter = self.adapter.as_mut().ok_or(EnvError::NotLoaded)?;
        adapter.load_state(&mut StateReader::new(state))?;
        self.refresh_status();
        Ok(())
    }

    /// `load_adapter_state` after checking the caller's expected field count.
    pub fn load_adapter_state_checked(&mut self, state: &AdapterState, expected_fields: usize) -> Result<()> {
        state.check_len(expected_fields)?;
        self.load_adapter_state(state)
    }

    // === Accessors ===

    #[must_use]
    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// Frames stepped since the last reset.
    #[must_use]
    pub fn episode_frame(&self) -> u64 {
        self.episode_frame
    }

    /// Machine frames advanced since construction, start procedures included.
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Sum of rewards returned since the last reset.
    #[must_use]
    pub fn episode_score(&self) -> Reward {
        self.episode_score
    }

    /// Zero-based index of the current episode since `load`.
    #[must_use]
    pub fn episode_index(&self) -> u64 {
        self.episode_index
    }

    /// The last completed frame.
    #[must_use]
    pub fn snapshot(&self) -> &MachineSnapshot {
        &self.snapshot
    }

    /// Pixel buffer of the last completed frame.
    #[must_use]
    pub fn screen(&self) -> &[u8] {
        self.snapshot.pixels()
    }

    /// RAM of the last completed frame.
    #[must_use]
    pub fn ram(&self) -> &[u8] {
        self.snapshot.ram()
    }

    /// Legal actions of the loaded title.
    pub fn available_actions(&self) -> Result<&ActionSet> {
        self.adapter
            .as_deref()
            .map(|a| a.available_actions())
            .ok_or(EnvError::NotLoaded)
    }

    /// The active adapter, if a game is loaded.
    #[must_use]
    pub fn adapter(&self) -> Option<&dyn GameAdapter> {
        self.adapter.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    #[must_use]
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Direct machine access, for saving or restoring emulator state.
    pub fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{ram_index, ScriptedMachine};

    fn pong_env(config: EnvConfig) -> EpisodeController<ScriptedMachine> {
        // After the start procedure, the computer scores every ten frames.
        let machine = ScriptedMachine::new(4, 4).with_script(|f| {
            if f.frame > 64 && f.frame % 10 == 0 {
                f.ram[ram_index(0x8D)] += 1;
            }
        });
        let mut env = EpisodeController::new(machine, config);
        env.load(Rom::from_bytes("pong", vec![0xEA])).unwrap();
        env
    }

    #[test]
    fn test_operations_before_load() {
        let mut env = EpisodeController::new(ScriptedMachine::new(1, 1), EnvConfig::default());
        assert_eq!(env.status(), EpisodeStatus::Uninitialized);
        assert!(matches!(env.reset(), Err(EnvError::NotLoaded)));
        assert!(matches!(env.step(Action::Noop, 0), Err(EnvError::NotLoaded)));
        assert!(matches!(env.save_adapter_state(), Err(EnvError::NotLoaded)));
        assert!(env.available_actions().is_err());
        assert!(!env.is_terminal());
    }

    #[test]
    fn test_start_procedure_runs_on_load() {
        let env = pong_env(EnvConfig::default());
        assert_eq!(env.machine().power_on_count(), 1);
        assert_eq!(env.machine().reset_presses(), 4);
        assert_eq!(env.machine().frames_since_power_on(), 64);
        assert_eq!(env.total_frames(), 64);
        assert_eq!(env.episode_frame(), 0);
        assert_eq!(env.snapshot().frame(), 0);
    }

    #[test]
    fn test_secondary_input_is_noop() {
        let mut env = pong_env(EnvConfig::default());
        env.step(Action::LeftFire, 0).unwrap();
        assert_eq!(env.machine().last_input(), Some((Action::LeftFire, Action::Noop)));
    }

    #[test]
    fn test_episode_score_accumulates() {
        let mut env = pong_env(EnvConfig::default());
        let mut total = 0;
        for _ in 0..10 {
            total += env.step(Action::Noop, 0).unwrap();
        }
        assert_eq!(total, -1);
        assert_eq!(env.episode_score(), -1);

        env.reset().unwrap();
        assert_eq!(env.episode_score(), 0);
        assert_eq!(env.episode_index(), 1);
    }

    #[test]
    fn test_act_uses_configured_frame_skip() {
        let mut env = pong_env(EnvConfig::new().with_frame_skip(2));
        env.act(Action::Noop).unwrap();
        assert_eq!(env.episode_frame(), 3);
    }

    #[test]
    fn test_step_id_rejects_out_of_range() {
        let mut env = pong_env(EnvConfig::default());
        assert!(matches!(env.step_id(18, 0), Err(EnvError::InvalidAction(18))));
        assert!(matches!(env.step_id(-3, 0), Err(EnvError::InvalidAction(-3))));
        assert_eq!(env.episode_frame(), 0);

        env.step_id(1, 0).unwrap();
        assert_eq!(env.machine().last_input(), Some((Action::Fire, Action::Noop)));
    }

    #[test]
    fn test_reject_policy() {
        let config = EnvConfig::new()
            .with_max_episode_frames(2)
            .with_terminal_step(TerminalStepPolicy::Reject);
        let mut env = pong_env(config);
        env.step(Action::Noop, 1).unwrap();
        assert_eq!(env.status(), EpisodeStatus::Terminal);
        assert!(matches!(env.step(Action::Noop, 0), Err(EnvError::EpisodeOver)));
        assert_eq!(env.episode_frame(), 2);
    }

    #[test]
    fn test_permit_policy_keeps_stepping() {
        let mut env = pong_env(EnvConfig::new().with_max_episode_frames(1));
        env.step(Action::Noop, 0).unwrap();
        assert!(env.is_terminal());
        env.step(Action::Noop, 0).unwrap();
        assert_eq!(env.episode_frame(), 2);
        assert_eq!(env.status(), EpisodeStatus::Terminal);
    }

    #[test]
    fn test_zero_cap_is_terminal_from_reset() {
        let config = EnvConfig::new()
            .with_max_episode_frames(0)
            .with_terminal_step(TerminalStepPolicy::Reject);
        let mut env = pong_env(config);
        assert!(env.is_terminal());
        assert_eq!(env.status(), EpisodeStatus::Terminal);
        assert!(matches!(env.step(Action::Noop, 0), Err(EnvError::EpisodeOver)));
        assert_eq!(env.episode_frame(), 0);

        env.reset().unwrap();
        assert_eq!(env.status(), EpisodeStatus::Terminal);
    }

    #[test]
    fn test_lowering_cap_ends_episode() {
        let mut env = pong_env(EnvConfig::new().with_terminal_step(TerminalStepPolicy::Reject));
        env.step(Action::Noop, 4).unwrap();
        assert_eq!(env.status(), EpisodeStatus::Running);

        env.set_max_episode_frames(Some(3));
        assert!(env.is_terminal());
        assert_eq!(env.status(), EpisodeStatus::Terminal);
        assert!(matches!(env.step(Action::Noop, 0), Err(EnvError::EpisodeOver)));
        assert_eq!(env.episode_frame(), 5);

        env.set_max_episode_frames(None);
        assert_eq!(env.status(), EpisodeStatus::Running);
        env.step(Action::Noop, 0).unwrap();
        assert_eq!(env.episode_frame(), 6);
    }

    #[test]
    fn test_raising_cap_before_first_step_is_ready() {
        let mut env = pong_env(EnvConfig::new().with_max_episode_frames(0));
        assert_eq!(env.status(), EpisodeStatus::Terminal);
        env.set_max_episode_frames(Some(10));
        assert_eq!(env.status(), EpisodeStatus::Ready);
    }

    #[test]
    fn test_failed_load_keeps_previous_game() {
        let mut env = pong_env(EnvConfig::default());
        let err = env.load(Rom::from_bytes("zork", vec![0xEA])).unwrap_err();
        assert!(matches!(err, EnvError::UnknownGameAdapter(_)));
        assert_eq!(env.adapter().map(|a| a.rom().to_string()), Some("pong".to_string()));
        assert_eq!(env.status(), EpisodeStatus::Ready);
    }
}
