//! Drives whole episodes: reset, then ask the policy for an action until the
//! episode ends or the step budget is spent.

use serde::{Serialize, Deserialize};

use crate::env::AtcEnv;
use crate::error::EnvError;
use crate::policy::Policy;
use crate::telemetry::EventSink;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: u32,
    pub seed: u64,
    pub steps: u32,
    pub total_reward: f64,
    pub served: u32,
    pub crashes: u32,
    pub waiting: usize,
    pub terminated: bool,
    pub truncated: bool,
}

/// Runs one episode of at most `max_steps` steps.
///
/// `on_step` is called after every transition with the environment state,
/// which is how the command line renders the console report.
pub fn run_episode(
    env: &mut AtcEnv,
    policy: &mut dyn Policy,
    episode: u32,
    seed: Option<u64>,
    max_steps: u32,
    sink: &mut dyn EventSink,
    mut on_step: impl FnMut(&AtcEnv),
) -> Result<EpisodeSummary, EnvError> {
    let (mut obs, mut info) = env.reset(seed);
    let mut summary = EpisodeSummary {
        episode,
        seed: env.seed(),
        steps: 0,
        total_reward: 0.0,
        served: 0,
        crashes: 0,
        waiting: info.waiting_count,
        terminated: false,
        truncated: false,
    };

    while summary.steps < max_steps {
        let action = policy.act(&obs, &info);
        let result = env.step(action)?;
        sink.log_step(episode, env, action, &result);
        on_step(env);

        summary.steps += 1;
        summary.total_reward += result.reward;
        summary.terminated = result.terminated;
        summary.truncated = result.truncated;
        obs = result.observation;
        info = result.info;

        if result.done() {
            break;
        }
    }
    sink.flush();

    summary.served = info.served_count;
    summary.crashes = info.crash_count;
    summary.waiting = info.waiting_count;
    Ok(summary)
}
