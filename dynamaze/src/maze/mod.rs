//! The dynamic maze environment.

mod config;
mod environment;
mod layout;
mod position;

pub use config::{ConfigError, MazeConfig, TruncationMode};
pub use environment::{
    BOMB_REWARD, BONUS_REWARD, EndReason, GOAL_REWARD, MazeEnvironment, MazeTransition,
    Observation, PIT_REWARD, SHAPING_SCALE, STEP_PENALTY, StepInfo,
};
pub use layout::{CellEvent, EpisodeLayout};
pub use position::{Action, GridPosition};
