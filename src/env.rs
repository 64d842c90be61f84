//! The landing-scheduling environment.
//!
//! `AtcEnv` owns the aircraft collection, the runway cooldowns and the
//! episode counters, and exposes the usual `reset` / `step` protocol:
//! - `reset(seed)` -> `(Observation, StepInfo)`
//! - `step(action)` -> `StepResult { observation, reward, terminated, truncated, info }`
//!
//! Every random draw goes through the ChaCha generator owned by the
//! instance, so a given seed and action sequence always replays the same
//! episode.

use rand::Rng;
use rand_chacha::ChaChaRng;
use rand_distr::{Uniform, Distribution};
use serde::{Serialize, Deserialize};

use crate::action::Action;
use crate::aircraft::{rank_waiting, rank_waiting_indices, Aircraft};
use crate::config::{EnvConfig, NUM_RUNWAYS};
use crate::error::EnvError;
use crate::generate::{entropy_seed, seeded_rng};
use crate::observation::Observation;
use crate::reward::{RewardComponents, RewardWeights};
use crate::snapshot::{LandingRecord, StateSnapshot};

/// Auxiliary counters returned with every observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub served_count: u32,
    pub crash_count: u32,
    pub waiting_count: usize,
    pub step_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    /// Equal to `components.total()`
    pub reward: f64,
    /// Crash limit or service quota reached
    pub terminated: bool,
    /// Step ceiling reached
    pub truncated: bool,
    pub info: StepInfo,
    pub components: RewardComponents,
    /// Aircraft landed by this step's action, if any
    pub landing: Option<LandingRecord>,
}

impl StepResult {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Mutable state of one episode.
#[derive(Debug, Clone)]
struct Episode {
    fleet: Vec<Aircraft>,
    cooldowns: [u32; NUM_RUNWAYS],
    cooldown_duration: u32,
    step_index: u32,
    last_spawn_step: u32,
    served: u32,
    crashes: u32,
    last_action: Option<Action>,
    last_reward: f64,
    last_landing: Option<LandingRecord>,
}

impl Episode {
    fn new(fleet: Vec<Aircraft>, cooldown_duration: u32) -> Self {
        Episode {
            fleet,
            cooldowns: [0; NUM_RUNWAYS],
            cooldown_duration,
            step_index: 0,
            last_spawn_step: 0,
            served: 0,
            crashes: 0,
            last_action: None,
            last_reward: 0.0,
            last_landing: None,
        }
    }

    fn waiting_count(&self) -> usize {
        self.fleet.iter().filter(|a| a.is_waiting()).count()
    }

    fn info(&self) -> StepInfo {
        StepInfo {
            served_count: self.served,
            crash_count: self.crashes,
            waiting_count: self.waiting_count(),
            step_index: self.step_index,
        }
    }

    fn observe(&self) -> Observation {
        Observation::encode(&self.cooldowns, &rank_waiting(&self.fleet))
    }

    /// One transition. The order of the effects below is part of the
    /// contract: each reads state written by the previous ones.
    fn advance(&mut self, config: &EnvConfig, rng: &mut ChaChaRng, action: Action) -> StepResult {
        let weights = &config.rewards;
        let mut components = RewardComponents::default();

        self.step_index += 1;

        if self.step_index - self.last_spawn_step >= config.spawn_interval {
            let arrivals = config.arrivals.generate(self.step_index, rng);
            self.fleet.extend(arrivals);
            self.last_spawn_step = self.step_index;
        }

        self.fleet.iter_mut().for_each(Aircraft::burn_fuel);

        for cooldown in self.cooldowns.iter_mut() {
            *cooldown = cooldown.saturating_sub(1);
        }

        let (action_reward, landing) = self.execute(action, weights);
        components.action = action_reward;
        self.last_action = Some(action);
        self.last_reward = action_reward;
        if landing.is_some() {
            self.last_landing = landing.clone();
        }

        self.fleet.iter_mut().for_each(Aircraft::tick);

        let (crashed, airborne): (Vec<Aircraft>, Vec<Aircraft>) =
            std::mem::take(&mut self.fleet).into_iter().partition(Aircraft::is_crashed);
        self.fleet = airborne;
        for aircraft in &crashed {
            self.crashes += 1;
            components.crash += if aircraft.is_emergency() { weights.crash_emergency } else { weights.crash_normal };
        }

        let terminated = self.crashes >= config.max_crashes || self.served >= config.max_served;
        let truncated = self.step_index >= config.max_steps;

        self.shape(action, weights, &mut components);

        StepResult {
            observation: self.observe(),
            reward: components.total(),
            terminated,
            truncated,
            info: self.info(),
            components,
            landing,
        }
    }

    /// Applies the chosen action and returns its reward term.
    fn execute(&mut self, action: Action, weights: &RewardWeights) -> (f64, Option<LandingRecord>) {
        let Action::Land { flight_index, runway } = action else {
            return (0.0, None);
        };

        let ranked = rank_waiting_indices(&self.fleet);
        let Some(&index) = ranked.get(flight_index) else {
            return (weights.invalid_flight, None);
        };
        if self.cooldowns[runway] > 0 {
            return (weights.blocked_runway, None);
        }

        let aircraft = self.fleet.remove(index);
        self.served += 1;
        self.cooldowns[runway] = self.cooldown_duration;

        let mut reward = weights.landing;
        if aircraft.is_emergency() {
            reward += weights.emergency_bonus;
        }
        (reward, Some(LandingRecord { aircraft_id: aircraft.id, runway }))
    }

    /// Shaping terms over the aircraft still waiting after removals.
    fn shape(&self, action: Action, weights: &RewardWeights, components: &mut RewardComponents) {
        let waiting = self.fleet.iter().filter(|a| a.is_waiting()).collect::<Vec<&Aircraft>>();

        if action == Action::Idle && !waiting.is_empty() {
            components.idle = weights.idle_with_waiting;
        }
        for aircraft in waiting {
            if aircraft.wait_time > weights.long_wait_threshold {
                components.long_wait += weights.long_wait;
            }
            if aircraft.wait_time < weights.short_wait_threshold {
                components.short_wait += weights.short_wait;
            }
        }
    }

    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            step_index: self.step_index,
            cooldowns: self.cooldowns,
            cooldown_duration: self.cooldown_duration,
            waiting: rank_waiting(&self.fleet).into_iter().cloned().collect(),
            served_count: self.served,
            crash_count: self.crashes,
            last_action: self.last_action,
            last_reward: self.last_reward,
            last_landing: self.last_landing.clone(),
        }
    }
}

pub struct AtcEnv {
    config: EnvConfig,
    rng: ChaChaRng,
    seed: u64,
    episode: Option<Episode>,
}

impl AtcEnv {
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let seed = entropy_seed();
        Ok(AtcEnv { config, rng: seeded_rng(seed), seed, episode: None })
    }

    /// Starts a new episode from an exact state instead of a random one.
    ///
    /// The RNG is seeded with `seed` and only used for later arrivals; the
    /// cooldown duration is taken as given. Each runway cooldown must not
    /// exceed it.
    pub fn from_parts(
        config: EnvConfig,
        seed: u64,
        fleet: Vec<Aircraft>,
        cooldowns: [u32; NUM_RUNWAYS],
        cooldown_duration: u32,
    ) -> Result<Self, EnvError> {
        config.validate()?;
        if cooldowns.iter().any(|c| *c > cooldown_duration) {
            return Err(EnvError::config("cooldowns", "a runway cooldown exceeds the cooldown duration"));
        }
        let mut episode = Episode::new(fleet, cooldown_duration);
        episode.cooldowns = cooldowns;
        Ok(AtcEnv { config, rng: seeded_rng(seed), seed, episode: Some(episode) })
    }

    /// Starts a new episode.
    ///
    /// Without a seed, one is drawn from the instance RNG so that a seeded
    /// sequence of resets stays reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, StepInfo) {
        let seed = seed.unwrap_or_else(|| self.rng.gen());
        self.seed = seed;
        self.rng = seeded_rng(seed);

        let [low, high] = self.config.cooldown_range;
        let cooldown_duration = Uniform::new_inclusive(low, high).sample(&mut self.rng);
        let fleet = self.config.arrivals.generate(0, &mut self.rng);

        let episode = Episode::new(fleet, cooldown_duration);
        let result = (episode.observe(), episode.info());
        self.episode = Some(episode);
        result
    }

    /// Decodes `action` and advances the episode by one tick.
    pub fn step(&mut self, action: u32) -> Result<StepResult, EnvError> {
        let action = Action::decode(action)?;
        self.step_action(action)
    }

    pub fn step_action(&mut self, action: Action) -> Result<StepResult, EnvError> {
        if !action.in_range() {
            return Err(EnvError::InvalidAction(action.encode()));
        }
        let episode = self.episode.as_mut().ok_or(EnvError::NotReset)?;
        Ok(episode.advance(&self.config, &mut self.rng, action))
    }

    pub fn snapshot(&self) -> Result<StateSnapshot, EnvError> {
        self.episode.as_ref().map(Episode::snapshot).ok_or(EnvError::NotReset)
    }

    pub fn observation(&self) -> Result<Observation, EnvError> {
        self.episode.as_ref().map(Episode::observe).ok_or(EnvError::NotReset)
    }

    pub fn info(&self) -> Result<StepInfo, EnvError> {
        self.episode.as_ref().map(Episode::info).ok_or(EnvError::NotReset)
    }

    /// Live aircraft in collection order, empty before the first reset.
    pub fn aircraft(&self) -> &[Aircraft] {
        self.episode.as_ref().map(|e| e.fleet.as_slice()).unwrap_or_default()
    }

    pub fn cooldowns(&self) -> [u32; NUM_RUNWAYS] {
        self.episode.as_ref().map(|e| e.cooldowns).unwrap_or_default()
    }

    pub fn cooldown_duration(&self) -> Option<u32> {
        self.episode.as_ref().map(|e| e.cooldown_duration)
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_reset(&self) -> bool {
        self.episode.is_some()
    }
}
