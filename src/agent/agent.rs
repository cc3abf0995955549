//! Agents choose one action per step.

use crate::core::{Action, ActionSet, EnvConfig, EnvRng, Reward};
use crate::machine::MachineSnapshot;

use super::trajectory::EpisodeSummary;

/// What an agent sees when choosing its next action.
#[derive(Clone, Copy, Debug)]
pub struct AgentView<'a> {
    /// Episode index within the run.
    pub episode: u64,
    /// Frames stepped in this episode.
    pub episode_frame: u64,
    /// Cumulative reward so far in this episode.
    pub score: Reward,
    /// Reward returned by the previous step.
    pub last_reward: Reward,
    /// Legal actions of the loaded title.
    pub legal: &'a ActionSet,
    /// The last completed frame.
    pub snapshot: &'a MachineSnapshot,
}

/// A policy driven by `AgentLoop`.
pub trait Agent {
    /// Choose the next action.
    fn act(&mut self, view: &AgentView<'_>) -> Action;

    /// Called at the start of every episode.
    ///
    /// Returns the first action, or `None` to use the title's default action.
    fn episode_start(&mut self, _episode: u64) -> Option<Action> {
        None
    }

    /// Called when an episode ends.
    fn episode_end(&mut self, _summary: &EpisodeSummary) {}

    fn name(&self) -> &str;
}

/// Uniform over the legal actions. Each episode draws from its own seeded stream.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    base: EnvRng,
    rng: EnvRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        let base = EnvRng::new(seed);
        Self {
            rng: base.for_episode(0),
            base,
        }
    }

    /// Seeded from the environment's configured seed.
    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.seed)
    }

    /// Seed the agent was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.base.seed()
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, view: &AgentView<'_>) -> Action {
        self.rng.choose_action(view.legal).unwrap_or(Action::Noop)
    }

    fn episode_start(&mut self, episode: u64) -> Option<Action> {
        self.rng = self.base.for_episode(episode);
        None
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Always the same action.
#[derive(Clone, Copy, Debug)]
pub struct ConstantAgent(pub Action);

impl Agent for ConstantAgent {
    fn act(&mut self, _view: &AgentView<'_>) -> Action {
        self.0
    }

    fn episode_start(&mut self, _episode: u64) -> Option<Action> {
        Some(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(legal: &'a ActionSet, snapshot: &'a MachineSnapshot) -> AgentView<'a> {
        AgentView {
            episode: 0,
            episode_frame: 0,
            score: 0,
            last_reward: 0,
            legal,
            snapshot,
        }
    }

    #[test]
    fn test_random_agent_stays_legal() {
        let legal = ActionSet::from_actions(&[Action::Noop, Action::Fire, Action::Left]);
        let snapshot = MachineSnapshot::default();
        let mut agent = RandomAgent::new(1);

        for _ in 0..200 {
            assert!(legal.contains(agent.act(&view(&legal, &snapshot))));
        }
    }

    #[test]
    fn test_random_agent_episode_streams_repeat() {
        let legal = ActionSet::all();
        let snapshot = MachineSnapshot::default();
        let mut agent = RandomAgent::new(9);

        agent.episode_start(4);
        let first: Vec<Action> = (0..20).map(|_| agent.act(&view(&legal, &snapshot))).collect();
        agent.episode_start(5);
        agent.act(&view(&legal, &snapshot));
        agent.episode_start(4);
        let again: Vec<Action> = (0..20).map(|_| agent.act(&view(&legal, &snapshot))).collect();

        assert_eq!(first, again);
        assert_eq!(agent.name(), "random");
    }

    #[test]
    fn test_random_agent_uses_configured_seed() {
        let config = EnvConfig::new().with_seed(77);
        assert_eq!(RandomAgent::from_config(&config).seed(), 77);
        assert_eq!(RandomAgent::from_config(&EnvConfig::default()).seed(), 0);
    }

    #[test]
    fn test_constant_agent() {
        let legal = ActionSet::all();
        let snapshot = MachineSnapshot::default();
        let mut agent = ConstantAgent(Action::DownFire);

        assert_eq!(agent.episode_start(0), Some(Action::DownFire));
        assert_eq!(agent.act(&view(&legal, &snapshot)), Action::DownFire);
    }
}
