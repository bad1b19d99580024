use thiserror::Error;

use crate::maze::ConfigError;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("invalid action {0}: expected one of 0 (up), 1 (down), 2 (left), 3 (right)")]
    InvalidAction(i64),

    #[error("invalid environment config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("action count {got} doesn't match environment count {expected}")]
    ActionCountMismatch { expected: usize, got: usize },

    #[error("environment index {index} out of range for batch of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Failures from `Env` implementations outside this crate, such as a
    /// remote simulator dropping its connection.
    #[error("Environment error: {0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
