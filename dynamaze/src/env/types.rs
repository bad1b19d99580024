use serde::{Deserialize, Serialize};

/// Result of a single [`Env::step`](crate::env::Env::step).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<O, I> {
    pub obs: O,
    pub reward: f32,
    /// The episode reached a natural end.
    pub terminated: bool,
    /// The episode was cut short by an external limit.
    pub truncated: bool,
    pub info: I,
}

impl<O, I> Transition<O, I> {
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord<O, A> {
    pub obs: O,
    pub act: A,
    pub rew: f32,
    pub terminated: bool,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory<O, A> {
    pub id: String,
    pub seed: Option<u64>,
    pub initial_obs: O,
    pub steps: Vec<StepRecord<O, A>>,
}

impl<O, A> Trajectory<O, A> {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_reward(&self) -> f32 {
        self.steps.iter().map(|s| s.rew).sum()
    }

    pub fn final_obs(&self) -> &O {
        self.steps.last().map_or(&self.initial_obs, |s| &s.obs)
    }

    pub fn to_json(&self) -> serde_json::Result<String>
    where
        O: Serialize,
        A: Serialize,
    {
        serde_json::to_string(self)
    }
}
