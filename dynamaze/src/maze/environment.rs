use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Action, CellEvent, ConfigError, EpisodeLayout, GridPosition, MazeConfig, TruncationMode};
use crate::env::{Env, EnvError, Transition};

pub const SHAPING_SCALE: f32 = 0.2;
pub const STEP_PENALTY: f32 = -1.0;
pub const BONUS_REWARD: f32 = 10.0;
pub const BOMB_REWARD: f32 = -20.0;
pub const PIT_REWARD: f32 = -50.0;
pub const GOAL_REWARD: f32 = 200.0;

/// `[row, col]` of the agent.
pub type Observation = [i32; 2];

pub type MazeTransition = Transition<Observation, StepInfo>;

/// Why an episode is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    Bomb,
    Pit,
    Goal,
    StepBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub step_count: u32,
    pub event: CellEvent,
}

/// The dynamic maze: a grid with a fixed start and goal, and bombs, pits and
/// bonus cells reshuffled on every reset.
///
/// Each instance owns its random source, so separate instances can run on
/// separate threads without coordination.
pub struct MazeEnvironment {
    config: MazeConfig,
    goal: GridPosition,
    agent_pos: GridPosition,
    step_count: u32,
    layout: EpisodeLayout,
    end_reason: Option<EndReason>,
    rng: StdRng,
}

impl MazeEnvironment {
    /// Validates `config` and starts a first, unseeded episode.
    pub fn new(config: MazeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let goal = config.goal();
        let mut env = Self {
            agent_pos: config.start_pos,
            layout: EpisodeLayout::empty(config.grid_cols),
            goal,
            step_count: 0,
            end_reason: None,
            rng: StdRng::from_entropy(),
            config,
        };
        env.reset(None);
        Ok(env)
    }

    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        let layout = EpisodeLayout::sample(&self.config, &mut self.rng);
        self.begin_episode(layout);
        debug!(
            ?seed,
            bombs = self.config.num_bombs,
            pits = self.config.num_pits,
            bonuses = self.config.num_rewards,
            "maze reset"
        );
        self.observation()
    }

    /// Starts an episode with bombs, pits and bonuses at the given cells
    /// instead of shuffled ones. The cells are checked against this maze's
    /// grid and endpoints; on error the current episode is left untouched.
    pub fn reset_with_layout(
        &mut self,
        bombs: &[GridPosition],
        pits: &[GridPosition],
        bonuses: &[GridPosition],
    ) -> Result<Observation, ConfigError> {
        let layout = EpisodeLayout::from_cells(&self.config, bombs, pits, bonuses)?;
        self.begin_episode(layout);
        debug!(
            bombs = bombs.len(),
            pits = pits.len(),
            bonuses = bonuses.len(),
            "maze reset with fixed layout"
        );
        Ok(self.observation())
    }

    fn begin_episode(&mut self, layout: EpisodeLayout) {
        self.layout = layout;
        self.agent_pos = self.config.start_pos;
        self.step_count = 0;
        self.end_reason = None;
    }

    /// Advances one tick. Hazards, the goal and the step budget all come back
    /// as ordinary transitions.
    ///
    /// Calling this after the episode ended keeps moving the agent and
    /// counting steps; drivers are expected to reset first.
    pub fn apply(&mut self, action: Action) -> MazeTransition {
        self.step_count += 1;
        let pos = self
            .agent_pos
            .moved(action, self.config.grid_rows, self.config.grid_cols);
        self.agent_pos = pos;

        let shaping = -SHAPING_SCALE * pos.manhattan(self.goal) as f32;
        let event = self.layout.classify(pos, self.goal);
        let (reward, natural_end) = match event {
            CellEvent::Bomb => (BOMB_REWARD, Some(EndReason::Bomb)),
            CellEvent::Pit => (PIT_REWARD, Some(EndReason::Pit)),
            CellEvent::Bonus => (shaping + BONUS_REWARD, None),
            CellEvent::Goal => (GOAL_REWARD, Some(EndReason::Goal)),
            CellEvent::Empty => (shaping + STEP_PENALTY, None),
        };

        let out_of_steps = self.step_count >= self.config.max_steps;
        let (terminated, truncated) = match self.config.truncation {
            TruncationMode::Combined => (natural_end.is_some() || out_of_steps, false),
            TruncationMode::Separate => (natural_end.is_some(), out_of_steps),
        };

        trace!(?action, %pos, reward, ?event, step = self.step_count, "maze step");
        if self.end_reason.is_none() {
            self.end_reason = natural_end.or(out_of_steps.then_some(EndReason::StepBudget));
            if let Some(reason) = self.end_reason {
                debug!(?reason, steps = self.step_count, "episode over");
            }
        }

        Transition {
            obs: pos.to_obs(),
            reward,
            terminated,
            truncated,
            info: StepInfo {
                step_count: self.step_count,
                event,
            },
        }
    }

    pub fn observation(&self) -> Observation {
        self.agent_pos.to_obs()
    }

    pub fn agent_pos(&self) -> GridPosition {
        self.agent_pos
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn layout(&self) -> &EpisodeLayout {
        &self.layout
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn start(&self) -> GridPosition {
        self.config.start_pos
    }

    pub fn goal(&self) -> GridPosition {
        self.goal
    }

    /// `None` while the episode is still running.
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn is_done(&self) -> bool {
        self.end_reason.is_some()
    }

    /// Inclusive bounds shared by both observation components.
    pub fn observation_bounds(&self) -> (i32, i32) {
        let high = self.config.grid_rows.max(self.config.grid_cols) - 1;
        (0, high as i32)
    }

    pub fn num_actions(&self) -> usize {
        Action::ALL.len()
    }
}

impl Env for MazeEnvironment {
    type Obs = Observation;
    type Act = i64;
    type Info = StepInfo;

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs, EnvError> {
        Ok(MazeEnvironment::reset(self, seed))
    }

    fn step(&mut self, act: Self::Act) -> Result<MazeTransition, EnvError> {
        let action = Action::try_from(act)?;
        Ok(self.apply(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_maze() -> MazeEnvironment {
        let cfg = MazeConfig::default().with_counts(0, 0, 0);
        MazeEnvironment::new(cfg).unwrap()
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn reset_returns_start_and_clears_counter() {
        let mut env = open_maze();
        env.apply(Action::Down);
        env.apply(Action::Right);
        assert_eq!(env.step_count(), 2);

        assert_eq!(env.reset(Some(3)), [0, 0]);
        assert_eq!(env.step_count(), 0);
        assert_eq!(env.end_reason(), None);
    }

    #[test]
    fn first_step_down_pays_shaping_and_step_penalty() {
        let mut env = open_maze();
        env.reset(Some(0));
        let t = env.apply(Action::Down);
        assert_eq!(t.obs, [1, 0]);
        assert_close(t.reward, -0.2 * 17.0 - 1.0);
        assert!(!t.terminated);
        assert!(!t.truncated);
        assert_eq!(t.info.event, CellEvent::Empty);
    }

    #[test]
    fn bumping_the_top_wall_still_costs_a_step() {
        let mut env = open_maze();
        env.reset(None);
        let t = env.apply(Action::Up);
        assert_eq!(t.obs, [0, 0]);
        assert_eq!(env.step_count(), 1);
        assert_close(t.reward, -0.2 * 18.0 - 1.0);
    }

    #[test]
    fn bonus_adds_ten_and_is_not_consumed() {
        let cfg = MazeConfig::default().with_counts(0, 0, 0);
        let mut env = MazeEnvironment::new(cfg).unwrap();
        env.reset_with_layout(&[], &[], &[GridPosition::new(0, 1)]).unwrap();

        let first = env.apply(Action::Right);
        assert_eq!(first.info.event, CellEvent::Bonus);
        assert_close(first.reward, -0.2 * 17.0 + 10.0);
        assert!(!first.terminated);

        env.apply(Action::Left);
        let again = env.apply(Action::Right);
        assert_eq!(again.info.event, CellEvent::Bonus);
        assert_close(again.reward, first.reward);
    }

    #[test]
    fn pit_ends_episode_with_fixed_penalty() {
        let cfg = MazeConfig::default().with_counts(0, 0, 0);
        let mut env = MazeEnvironment::new(cfg).unwrap();
        env.reset_with_layout(&[], &[GridPosition::new(1, 0)], &[]).unwrap();

        let t = env.apply(Action::Down);
        assert_eq!(t.reward, PIT_REWARD);
        assert!(t.terminated);
        assert_eq!(env.end_reason(), Some(EndReason::Pit));
    }

    #[test]
    fn fixed_layout_is_checked_against_this_grid() {
        let cfg = MazeConfig::default().with_counts(0, 0, 0);
        let mut env = MazeEnvironment::new(cfg).unwrap();
        env.reset(Some(1));
        env.apply(Action::Right);

        assert!(matches!(
            env.reset_with_layout(&[GridPosition::new(0, 10)], &[], &[]),
            Err(ConfigError::OutOfBounds { which: "layout", .. })
        ));
        let goal = env.goal();
        assert!(matches!(
            env.reset_with_layout(&[], &[goal], &[]),
            Err(ConfigError::LayoutCoversEndpoint(_))
        ));
        // A rejected layout leaves the running episode alone.
        assert_eq!(env.step_count(), 1);
        assert_eq!(env.observation(), [0, 1]);
    }

    #[test]
    fn fixed_layout_fires_exactly_on_reported_cells() {
        let cfg = MazeConfig::default().with_counts(0, 0, 0);
        let mut env = MazeEnvironment::new(cfg).unwrap();
        let bomb = GridPosition::new(1, 0);
        env.reset_with_layout(&[bomb], &[], &[]).unwrap();
        assert_eq!(env.layout().bomb_cells(), vec![bomb]);

        for _ in 0..3 {
            let t = env.apply(Action::Right);
            assert_eq!(t.info.event, CellEvent::Empty);
            assert!(!t.terminated);
        }

        env.reset_with_layout(&[bomb], &[], &[]).unwrap();
        let t = env.apply(Action::Down);
        assert_eq!(t.info.event, CellEvent::Bomb);
        assert_eq!(t.reward, BOMB_REWARD);
    }

    #[test]
    fn invalid_action_codes_are_rejected_without_side_effects() {
        let mut env = open_maze();
        env.reset(None);
        let err = Env::step(&mut env, 7).unwrap_err();
        assert!(matches!(err, EnvError::InvalidAction(7)));
        assert_eq!(env.step_count(), 0);
    }

    #[test]
    fn observation_space_matches_grid() {
        let cfg = MazeConfig::default().with_grid(4, 7).with_counts(1, 1, 1);
        let env = MazeEnvironment::new(cfg).unwrap();
        assert_eq!(env.observation_bounds(), (0, 6));
        assert_eq!(env.num_actions(), 4);
    }

    #[test]
    fn construction_rejects_bad_config() {
        let cfg = MazeConfig::default().with_grid(2, 2);
        assert!(matches!(
            MazeEnvironment::new(cfg),
            Err(ConfigError::TooManyItems { .. })
        ));
    }
}
