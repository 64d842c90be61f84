use std::{path::PathBuf, thread, time::Duration};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use atc_sched::AtcEnv;
use atc_sched::policy::PolicyKind;
use atc_sched::runner::{run_episode, EpisodeSummary};
use atc_sched::telemetry::{EventSink, FileSink, NoopSink};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Speed {
    Fast,
    Normal,
    Slow,
}

impl Speed {
    fn delay(self) -> Duration {
        match self {
            Speed::Fast => Duration::from_millis(100),
            Speed::Normal => Duration::from_millis(500),
            Speed::Slow => Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Args)]
pub struct Run {
    /// The policy choosing the actions
    #[clap(short, long, value_enum, default_value="greedy")]
    policy: PolicyKind,
    /// Seed of the first episode, following episodes use the next seeds
    #[clap(short, long)]
    seed: Option<u64>,
    /// Maximum number of steps per episode
    #[clap(short='m', long, default_value="200")]
    max_steps: u32,
    /// Number of episodes to run
    #[clap(short='n', long, default_value="1")]
    episodes: u32,
    /// Path of a JSON environment config
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Print the state report after every step
    #[clap(short, long)]
    render: bool,
    /// Pause between two rendered steps
    #[clap(long, value_enum, default_value="normal")]
    speed: Speed,
    /// If present, the path where to write one JSON record per step
    #[clap(short, long)]
    telemetry: Option<PathBuf>,
}

impl Run {
    pub fn run(&self) -> Result<()> {
        let config = super::load_config(self.config.as_ref())?;
        let mut env = AtcEnv::new(config)?;

        let mut sink: Box<dyn EventSink> = match self.telemetry.as_ref() {
            Some(path) => Box::new(FileSink::create(path).with_context(|| format!("cannot create {}", path.display()))?),
            None => Box::new(NoopSink),
        };

        let first_seed = self.seed.unwrap_or_else(|| env.seed());
        for episode in 0..self.episodes {
            let seed = first_seed.wrapping_add(episode as u64);
            let mut policy = self.policy.build(seed);
            let summary = run_episode(&mut env, policy.as_mut(), episode, Some(seed), self.max_steps, sink.as_mut(), |env| {
                if self.render {
                    if let Ok(snapshot) = env.snapshot() {
                        println!("{snapshot}");
                    }
                    thread::sleep(self.speed.delay());
                }
            })?;
            print_summary(policy.name(), &summary);
        }
        Ok(())
    }
}

fn print_summary(policy: &str, summary: &EpisodeSummary) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("  EPISODE {} COMPLETE ({policy}, seed {})", summary.episode, summary.seed);
    println!("{rule}");
    println!("Total Steps: {}", summary.steps);
    println!("Total Reward: {:.2}", summary.total_reward);
    println!("Flights Served: {}", summary.served);
    println!("Crashes: {}", summary.crashes);
    println!("Waiting Flights: {}", summary.waiting);
    println!("Terminated: {}  Truncated: {}", summary.terminated, summary.truncated);
    println!("{rule}");
}
