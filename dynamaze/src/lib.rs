//! A grid-world reinforcement-learning environment with randomized hazards.
//!
//! [`maze::MazeEnvironment`] is the core state machine. [`env`] holds the
//! generic driver contract it implements, [`rollout`] plays policies against
//! it, and [`runtime`] runs many rollouts at once.

pub mod env;
pub mod maze;
pub mod rollout;
pub mod runtime;

pub use env::{Env, EnvError, Transition, VecEnv};
pub use maze::{Action, GridPosition, MazeConfig, MazeEnvironment};
