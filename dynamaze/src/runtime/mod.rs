//! Runs independent tasks, typically rollouts, concurrently on tokio.

pub mod error;
pub mod handle;
pub mod result_source;
pub mod scheduler;
pub mod task;

pub use error::Error;
pub use handle::{LocalTaskHandle, TaskHandle};
pub use scheduler::{LocalScheduler, Scheduler};
pub use task::Task;
