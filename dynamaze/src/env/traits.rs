use crate::env::errors::EnvError;
use crate::env::types::Transition;

/// The contract between an environment and whatever drives it.
///
/// A driver calls [`Env::reset`] once per episode and [`Env::step`] once per
/// tick until the returned transition reports `terminated` or `truncated`.
/// Stepping a finished episode without resetting first is a usage error;
/// implementations are not required to detect it.
pub trait Env: Send {
    type Obs: Send + Clone + 'static;
    type Act: Send + Clone + 'static;
    type Info: Send + Clone + 'static;

    /// Starts a new episode. A seed reseeds the environment's own random
    /// source so the episode is reproducible.
    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Obs, EnvError>;

    fn step(&mut self, act: Self::Act) -> Result<Transition<Self::Obs, Self::Info>, EnvError>;

    fn close(&mut self) -> Result<(), EnvError> {
        Ok(())
    }
}
