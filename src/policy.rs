//! Baseline policies used to drive the environment from the command line.
//!
//! These are reference points for a learned agent, not learners themselves.

use clap::ValueEnum;
use rand_chacha::ChaChaRng;
use rand_distr::{Uniform, Distribution};

use crate::action::Action;
use crate::config::{ACTION_COUNT, NUM_RUNWAYS};
use crate::env::StepInfo;
use crate::generate::seeded_rng;
use crate::observation::Observation;

/// Maps what the environment exposes to one discrete action.
pub trait Policy {
    fn name(&self) -> &'static str;

    fn act(&mut self, obs: &Observation, info: &StepInfo) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    Idle,
    Greedy,
    Random,
}

impl PolicyKind {
    pub fn build(self, seed: u64) -> Box<dyn Policy> {
        match self {
            PolicyKind::Idle => Box::new(IdlePolicy),
            PolicyKind::Greedy => Box::new(GreedyPolicy),
            PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

/// Never lands anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn act(&mut self, _obs: &Observation, _info: &StepInfo) -> u32 {
        Action::IDLE_VALUE
    }
}

/// Lands the top-ranked waiting aircraft on the first free runway.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn act(&mut self, obs: &Observation, info: &StepInfo) -> u32 {
        if info.waiting_count == 0 {
            return Action::IDLE_VALUE;
        }
        (0..NUM_RUNWAYS)
            .find(|&runway| obs.runway_available(runway))
            .map(|runway| Action::Land { flight_index: 0, runway }.encode())
            .unwrap_or(Action::IDLE_VALUE)
    }
}

/// Uniform over the whole action space.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaChaRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        RandomPolicy { rng: seeded_rng(seed) }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn act(&mut self, _obs: &Observation, _info: &StepInfo) -> u32 {
        Uniform::new(0, ACTION_COUNT).sample(&mut self.rng)
    }
}
