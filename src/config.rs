//! Environment configuration.
//!
//! The structural dimensions (runways, observed queue slots, action count)
//! are compile-time constants because the observation and action encodings
//! depend on them. Everything else can be tuned from a JSON file.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Serialize, Deserialize};

use crate::error::EnvError;
use crate::generate::ArrivalGenerator;
use crate::reward::RewardWeights;

pub const NUM_RUNWAYS: usize = 2;
/// Number of ranked waiting aircraft exposed to the policy.
pub const QUEUE_SLOTS: usize = 5;
/// `QUEUE_SLOTS * NUM_RUNWAYS` landing actions plus the no-op.
pub const ACTION_COUNT: u32 = (QUEUE_SLOTS * NUM_RUNWAYS) as u32 + 1;
pub const OBS_DIM: usize = NUM_RUNWAYS + 3 * QUEUE_SLOTS;
pub const OBS_HIGH: f32 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Ticks between two arrival batches
    pub spawn_interval: u32,
    /// Step index at which the episode is truncated
    pub max_steps: u32,
    /// Served count at which the episode terminates
    pub max_served: u32,
    /// Crash count at which the episode terminates
    pub max_crashes: u32,
    /// Inclusive bounds of the runway cooldown, drawn once per episode
    pub cooldown_range: [u32; 2],
    pub arrivals: ArrivalGenerator,
    pub rewards: RewardWeights,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            spawn_interval: 5,
            max_steps: 2000,
            max_served: 200,
            max_crashes: 1,
            cooldown_range: [3, 5],
            arrivals: ArrivalGenerator::default(),
            rewards: RewardWeights::default(),
        }
    }
}

impl EnvConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let path = path.as_ref();
        let load_error = |source: String| EnvError::ConfigLoad { path: path.display().to_string(), source };

        let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
        let config: EnvConfig = serde_json::from_reader(BufReader::new(file)).map_err(|e| load_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if self.spawn_interval == 0 {
            return Err(EnvError::config("spawn_interval", "must be positive"));
        }
        if self.max_crashes == 0 {
            return Err(EnvError::config("max_crashes", "must be positive"));
        }
        if self.cooldown_range[0] > self.cooldown_range[1] {
            return Err(EnvError::config("cooldown_range", "lower bound exceeds upper bound"));
        }
        if self.cooldown_range[1] as f32 > OBS_HIGH {
            return Err(EnvError::config("cooldown_range", "cooldown exceeds the observation bound"));
        }
        if self.arrivals.fuel[1] as f32 > OBS_HIGH {
            return Err(EnvError::config("arrivals.fuel", "fuel exceeds the observation bound"));
        }
        self.arrivals.validate()
    }
}
