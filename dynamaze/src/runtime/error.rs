use thiserror::Error;

use crate::env::EnvError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("task canceled")]
    Canceled,

    #[error("task panicked: {0}")]
    Panicked(String),

    #[error("no tokio runtime available to schedule on")]
    NoRuntime,

    #[error("environment error: {0}")]
    Env(#[from] EnvError),
}

impl From<tokio::sync::oneshot::error::RecvError> for Error {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Error::Canceled
    }
}
