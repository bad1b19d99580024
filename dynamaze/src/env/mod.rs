mod errors;
mod traits;
mod types;
mod vec_env;

pub use errors::EnvError;
pub use traits::Env;
pub use types::{StepRecord, Trajectory, Transition};
pub use vec_env::VecEnv;
