use dynamaze::maze::{MazeConfig, MazeEnvironment};
use dynamaze::rollout::{RandomPolicy, RolloutTask, run_concurrent, run_episode};
use dynamaze::runtime::LocalScheduler;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => MazeConfig::from_json_file(path)?,
        None => MazeConfig::default(),
    };

    let mut env = MazeEnvironment::new(config.clone())?;
    let mut policy = RandomPolicy::new(7);

    for episode in 0..5u64 {
        println!("\nEpisode {}", episode + 1);
        let trajectory = run_episode(&mut env, &mut policy, Some(episode))?;
        for step in &trajectory.steps {
            println!("Position: {:?}, Reward: {:.2}", step.obs, step.rew);
        }
        println!(
            "Episode {} Total Reward: {:.2} ({:?})",
            episode + 1,
            trajectory.total_reward(),
            env.end_reason()
        );
    }

    println!("\nRunning batch rollouts...");
    let scheduler = LocalScheduler::new()?;
    let tasks = (0..4u64)
        .map(|i| {
            MazeEnvironment::new(config.clone())
                .map(|env| RolloutTask::new(env, RandomPolicy::new(i), Some(100 + i)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (i, result) in run_concurrent(&scheduler, tasks).await.into_iter().enumerate() {
        let (env, trajectory) = result?;
        println!(
            "Rollout {}: {} steps, total reward {:.2}, ended by {:?}",
            i + 1,
            trajectory.len(),
            trajectory.total_reward(),
            env.end_reason()
        );
    }

    Ok(())
}
