//! Playback driver: runs a policy against an environment and records what
//! happened.

mod episode;
mod policy;

pub use episode::{RolloutTask, run_episode};
pub use policy::{FnPolicy, Policy, RandomPolicy, ScriptedPolicy};

use futures::future::join_all;

use crate::env::{Env, Trajectory};
use crate::runtime::{Error, LocalScheduler, Scheduler};

/// Runs every task concurrently on `scheduler` and collects the results in
/// submission order.
pub async fn run_concurrent<E, P>(
    scheduler: &LocalScheduler,
    tasks: Vec<RolloutTask<E, P>>,
) -> Vec<Result<(E, Trajectory<E::Obs, E::Act>), Error>>
where
    E: Env + 'static,
    P: Policy<E::Obs, E::Act> + 'static,
{
    let handles: Vec<_> = tasks.into_iter().map(|task| scheduler.submit(task)).collect();
    join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.and_then(|result| result.map_err(Error::from)))
        .collect()
}
