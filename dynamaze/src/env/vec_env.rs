use super::{Env, EnvError, Transition};

/// A batch of independent environments stepped in lockstep.
pub struct VecEnv<E> {
    envs: Vec<E>,
}

impl<E: Env> VecEnv<E> {
    pub fn new<F>(make_env: F, num_envs: usize) -> Result<Self, EnvError>
    where
        F: Fn() -> Result<E, EnvError>,
    {
        let envs = (0..num_envs).map(|_| make_env()).collect::<Result<_, _>>()?;
        Ok(Self { envs })
    }

    pub fn from_envs(envs: Vec<E>) -> Self {
        Self { envs }
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.envs.get(index)
    }

    /// Resets every environment. With a seed, environment `i` is seeded with
    /// `seed + i` so the batch never shares a layout by accident.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<Vec<E::Obs>, EnvError> {
        self.envs
            .iter_mut()
            .enumerate()
            .map(|(i, env)| env.reset(seed.map(|s| s.wrapping_add(i as u64))))
            .collect()
    }

    /// Resets a single environment, typically after its episode ended.
    pub fn reset_one(&mut self, index: usize, seed: Option<u64>) -> Result<E::Obs, EnvError> {
        let len = self.envs.len();
        let env = self
            .envs
            .get_mut(index)
            .ok_or(EnvError::IndexOutOfRange { index, len })?;
        env.reset(seed)
    }

    pub fn step(
        &mut self,
        actions: Vec<E::Act>,
    ) -> Result<Vec<Transition<E::Obs, E::Info>>, EnvError> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::ActionCountMismatch {
                expected: self.envs.len(),
                got: actions.len(),
            });
        }

        self.envs
            .iter_mut()
            .zip(actions)
            .map(|(env, action)| env.step(action))
            .collect()
    }

    pub fn close(&mut self) -> Result<(), EnvError> {
        for env in &mut self.envs {
            env.close()?;
        }
        Ok(())
    }
}
