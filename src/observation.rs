//! Fixed-size observation vector handed to the policy.
//!
//! Layout (17 values, each in [0, 100]):
//! - `[0..2]`   runway availability flags (1.0 when the cooldown is 0)
//! - `[2..7]`   fuel of the five highest-ranked waiting aircraft
//! - `[7..12]`  their wait times
//! - `[12..17]` their emergency flags
//!
//! Slots follow the ranking position, not aircraft identity, and unused
//! slots are zero.

use serde::{Serialize, Deserialize};

use crate::aircraft::Aircraft;
use crate::config::{NUM_RUNWAYS, OBS_DIM, OBS_HIGH, QUEUE_SLOTS};

const FUEL_OFFSET: usize = NUM_RUNWAYS;
const WAIT_OFFSET: usize = FUEL_OFFSET + QUEUE_SLOTS;
const EMERGENCY_OFFSET: usize = WAIT_OFFSET + QUEUE_SLOTS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation(pub [f32; OBS_DIM]);

impl Default for Observation {
    fn default() -> Self {
        Observation([0.0; OBS_DIM])
    }
}

fn bounded(value: f32) -> f32 {
    value.clamp(0.0, OBS_HIGH)
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

impl Observation {
    /// Encodes the runway cooldowns and an already ranked waiting list.
    pub fn encode(cooldowns: &[u32; NUM_RUNWAYS], ranked: &[&Aircraft]) -> Self {
        let mut obs = Observation::default();

        for (i, cooldown) in cooldowns.iter().enumerate() {
            obs.0[i] = flag(*cooldown == 0);
        }
        for (slot, aircraft) in ranked.iter().take(QUEUE_SLOTS).enumerate() {
            obs.0[FUEL_OFFSET + slot] = bounded(aircraft.fuel as f32);
            obs.0[WAIT_OFFSET + slot] = bounded(aircraft.wait_time as f32);
            obs.0[EMERGENCY_OFFSET + slot] = flag(aircraft.is_emergency());
        }

        obs
    }

    pub fn runway_available(&self, runway: usize) -> bool {
        self.0[runway] > 0.5
    }

    pub fn fuel(&self, slot: usize) -> f32 {
        self.0[FUEL_OFFSET + slot]
    }

    pub fn wait_time(&self, slot: usize) -> f32 {
        self.0[WAIT_OFFSET + slot]
    }

    pub fn emergency(&self, slot: usize) -> bool {
        self.0[EMERGENCY_OFFSET + slot] > 0.5
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}
