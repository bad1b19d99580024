use std::collections::HashSet;

use dynamaze::env::Env;
use dynamaze::maze::{
    Action, BOMB_REWARD, CellEvent, EndReason, GOAL_REWARD, GridPosition,
    MazeConfig, MazeEnvironment, TruncationMode,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn open_config() -> MazeConfig {
    MazeConfig::default().with_counts(0, 0, 0)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn agent_never_leaves_the_grid() {
    let cfg = MazeConfig::default().with_grid(4, 6).with_counts(0, 0, 0).with_max_steps(10_000);
    let mut env = MazeEnvironment::new(cfg).unwrap();
    env.reset(Some(11));
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..2_000 {
        let t = Env::step(&mut env, rng.gen_range(0..4)).unwrap();
        let [row, col] = t.obs;
        assert!((0..4).contains(&row), "row {row} out of range");
        assert!((0..6).contains(&col), "col {col} out of range");
        if t.info.event == CellEvent::Goal {
            env.reset(None);
        }
    }
}

#[test]
fn layouts_are_disjoint_after_every_reset() {
    let mut env = MazeEnvironment::new(MazeConfig::default()).unwrap();
    for seed in 0..100 {
        env.reset(Some(seed));
        let layout = env.layout();
        let bombs: HashSet<_> = layout.bomb_cells().into_iter().collect();
        let pits: HashSet<_> = layout.pit_cells().into_iter().collect();
        let bonuses: HashSet<_> = layout.bonus_cells().into_iter().collect();

        assert_eq!((bombs.len(), pits.len(), bonuses.len()), (8, 2, 5));
        assert!(bombs.is_disjoint(&pits));
        assert!(bombs.is_disjoint(&bonuses));
        assert!(pits.is_disjoint(&bonuses));
        for endpoint in [env.start(), env.goal()] {
            assert!(!bombs.contains(&endpoint));
            assert!(!pits.contains(&endpoint));
            assert!(!bonuses.contains(&endpoint));
        }
    }
}

#[test]
fn seeded_resets_are_reproducible() {
    let mut a = MazeEnvironment::new(MazeConfig::default()).unwrap();
    let mut b = MazeEnvironment::new(MazeConfig::default()).unwrap();

    a.reset(Some(2024));
    b.reset(Some(2024));
    assert_eq!(a.layout(), b.layout());

    // Unseeded resets continue the same stream.
    a.reset(None);
    b.reset(None);
    assert_eq!(a.layout(), b.layout());
}

#[test]
fn step_counter_increments_by_one_until_reset() {
    let cfg = open_config().with_max_steps(1_000);
    let mut env = MazeEnvironment::new(cfg).unwrap();
    env.reset(Some(1));
    for expected in 1..=50u32 {
        let action = Action::ALL[expected as usize % 4];
        let t = env.apply(action);
        assert_eq!(t.info.step_count, expected);
        assert_eq!(env.step_count(), expected);
    }
    env.reset(None);
    assert_eq!(env.step_count(), 0);
}

#[test]
fn bomb_pays_exactly_minus_twenty_after_a_long_walk() {
    let mut env = MazeEnvironment::new(open_config()).unwrap();
    env.reset_with_layout(&[GridPosition::new(5, 0)], &[], &[]).unwrap();

    for _ in 0..4 {
        assert!(!env.apply(Action::Down).terminated);
    }
    let t = env.apply(Action::Down);
    assert_eq!(t.reward, BOMB_REWARD);
    assert!(t.terminated);
    assert_eq!(t.info.event, CellEvent::Bomb);
    assert_eq!(env.end_reason(), Some(EndReason::Bomb));
}

#[test]
fn every_bomb_hit_in_random_play_terminates_with_fixed_penalty() {
    let mut env = MazeEnvironment::new(MazeConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let mut bomb_hits = 0;
    for seed in 0..300 {
        env.reset(Some(seed));
        loop {
            let t = Env::step(&mut env, rng.gen_range(0..4)).unwrap();
            if t.info.event == CellEvent::Bomb {
                bomb_hits += 1;
                assert_eq!(t.reward, -20.0);
                assert!(t.terminated);
            }
            if t.is_done() {
                break;
            }
        }
    }
    assert!(bomb_hits > 0, "random play should hit at least one bomb");
}

#[test]
fn up_at_top_row_is_a_counted_no_op() {
    let mut env = MazeEnvironment::new(open_config()).unwrap();
    env.reset(None);
    let t = env.apply(Action::Up);
    assert_eq!(t.obs, [0, 0]);
    assert_eq!(env.agent_pos(), GridPosition::new(0, 0));
    assert_eq!(env.step_count(), 1);
}

#[test]
fn single_step_down_on_open_grid() {
    let mut env = MazeEnvironment::new(open_config()).unwrap();
    env.reset(None);
    let t = Env::step(&mut env, 1).unwrap();
    assert_eq!(t.obs, [1, 0]);
    assert_close(t.reward, -4.4);
    assert!(!t.terminated);
    assert!(!t.truncated);
}

#[test]
fn walking_to_the_goal_pays_two_hundred() {
    let mut env = MazeEnvironment::new(open_config()).unwrap();
    env.reset(None);
    let path: Vec<i64> = std::iter::repeat_n(1, 9).chain(std::iter::repeat_n(3, 9)).collect();

    let (last, rest) = path.split_last().unwrap();
    for &action in rest {
        let t = Env::step(&mut env, action).unwrap();
        assert!(!t.terminated);
    }
    let t = Env::step(&mut env, *last).unwrap();
    assert_eq!(t.obs, [9, 9]);
    assert_eq!(t.reward, GOAL_REWARD);
    assert!(t.terminated);
    assert!(!t.truncated);
    assert_eq!(env.end_reason(), Some(EndReason::Goal));
}

#[test]
fn step_budget_folds_into_terminated_by_default() {
    let mut env = MazeEnvironment::new(open_config().with_max_steps(5)).unwrap();
    env.reset(None);
    for step in 1..=5 {
        let t = env.apply(Action::Right);
        assert!(!t.truncated);
        assert_eq!(t.terminated, step == 5, "step {step}");
    }
    assert_eq!(env.end_reason(), Some(EndReason::StepBudget));
}

#[test]
fn separate_mode_reports_budget_as_truncation() {
    let cfg = open_config()
        .with_max_steps(5)
        .with_truncation(TruncationMode::Separate);
    let mut env = MazeEnvironment::new(cfg).unwrap();
    env.reset(None);
    for step in 1..=5 {
        let t = env.apply(Action::Right);
        assert!(!t.terminated);
        assert_eq!(t.truncated, step == 5, "step {step}");
    }
    assert_eq!(env.end_reason(), Some(EndReason::StepBudget));
}

#[test]
fn goal_on_the_last_allowed_step_sets_both_flags_in_separate_mode() {
    let path = [Action::Down; 9].into_iter().chain([Action::Right; 9]);

    for (mode, truncated) in [(TruncationMode::Combined, false), (TruncationMode::Separate, true)] {
        let cfg = open_config().with_max_steps(18).with_truncation(mode);
        let mut env = MazeEnvironment::new(cfg).unwrap();
        env.reset(None);
        let last = path.clone().map(|a| env.apply(a)).last().unwrap();
        assert_eq!(last.reward, GOAL_REWARD);
        assert!(last.terminated);
        assert_eq!(last.truncated, truncated);
        assert_eq!(env.end_reason(), Some(EndReason::Goal));
    }
}

#[test]
fn invalid_action_is_an_error() {
    let mut env = MazeEnvironment::new(MazeConfig::default()).unwrap();
    env.reset(Some(0));
    assert!(Env::step(&mut env, 4).is_err());
    assert!(Env::step(&mut env, -1).is_err());
}
