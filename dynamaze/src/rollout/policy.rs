use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::maze::{Action, Observation};

/// Chooses an action from an observation.
///
/// This is the seam where a trained model plugs in; the crate itself only
/// ships the trivial policies below.
pub trait Policy<O, A>: Send {
    fn act(&mut self, obs: &O) -> A;
}

/// Uniformly random maze actions from a seeded source.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Policy<Observation, i64> for RandomPolicy {
    fn act(&mut self, _obs: &Observation) -> i64 {
        let idx = self.rng.gen_range(0..Action::ALL.len());
        Action::ALL[idx].code()
    }
}

/// Adapts a closure into a [`Policy`].
pub struct FnPolicy<F>(pub F);

impl<O, A, F> Policy<O, A> for FnPolicy<F>
where
    F: FnMut(&O) -> A + Send,
{
    fn act(&mut self, obs: &O) -> A {
        (self.0)(obs)
    }
}

/// Replays a fixed action sequence, then repeats the last action.
pub struct ScriptedPolicy<A> {
    actions: Vec<A>,
    cursor: usize,
}

impl<A> ScriptedPolicy<A> {
    /// `None` for an empty script, which would have nothing to repeat.
    pub fn new(actions: Vec<A>) -> Option<Self> {
        if actions.is_empty() {
            return None;
        }
        Some(Self { actions, cursor: 0 })
    }
}

impl<O, A: Clone + Send> Policy<O, A> for ScriptedPolicy<A> {
    fn act(&mut self, _obs: &O) -> A {
        let idx = self.cursor.min(self.actions.len() - 1);
        self.cursor += 1;
        self.actions[idx].clone()
    }
}
