use tracing::{debug, info};
use uuid::Uuid;

use super::Policy;
use crate::env::{Env, EnvError, StepRecord, Trajectory};
use crate::runtime::Task;

/// Plays one episode of `env` under `policy`, from reset to the first
/// terminated or truncated transition.
///
/// The environment is responsible for ending the episode; the maze always
/// does so within its step budget.
pub fn run_episode<E, P>(
    env: &mut E,
    policy: &mut P,
    seed: Option<u64>,
) -> Result<Trajectory<E::Obs, E::Act>, EnvError>
where
    E: Env,
    P: Policy<E::Obs, E::Act> + ?Sized,
{
    let id = Uuid::new_v4().to_string();
    let initial_obs = env.reset(seed)?;
    let mut obs = initial_obs.clone();
    let mut steps = Vec::new();

    loop {
        let act = policy.act(&obs);
        let transition = env.step(act.clone())?;
        let done = transition.is_done();
        obs = transition.obs.clone();
        steps.push(StepRecord {
            obs: transition.obs,
            act,
            rew: transition.reward,
            terminated: transition.terminated,
            truncated: transition.truncated,
        });
        if done {
            break;
        }
    }

    let trajectory = Trajectory {
        id,
        seed,
        initial_obs,
        steps,
    };
    info!(
        id = %trajectory.id,
        len = trajectory.len(),
        total_reward = trajectory.total_reward(),
        "episode finished"
    );
    Ok(trajectory)
}

/// An episode to run on the [`runtime`](crate::runtime) scheduler. The
/// environment is handed back with the trajectory so it can be reused.
pub struct RolloutTask<E, P> {
    pub env: E,
    pub policy: P,
    pub seed: Option<u64>,
}

impl<E, P> RolloutTask<E, P> {
    pub fn new(env: E, policy: P, seed: Option<u64>) -> Self {
        Self { env, policy, seed }
    }
}

impl<E, P> Task for RolloutTask<E, P>
where
    E: Env + 'static,
    P: Policy<E::Obs, E::Act> + 'static,
{
    type Output = Result<(E, Trajectory<E::Obs, E::Act>), EnvError>;

    fn run(mut self) -> Self::Output {
        debug!(seed = ?self.seed, "rollout task started");
        let trajectory = run_episode(&mut self.env, &mut self.policy, self.seed)?;
        Ok((self.env, trajectory))
    }
}
