//! Reward weights and the per-step reward breakdown.

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    /// Granted for every successful landing
    pub landing: f64,
    /// Added on top of `landing` for an emergency aircraft
    pub emergency_bonus: f64,
    /// Selected flight index beyond the waiting list
    pub invalid_flight: f64,
    /// Selected runway still cooling down
    pub blocked_runway: f64,
    pub crash_normal: f64,
    pub crash_emergency: f64,
    /// No-op while at least one aircraft is waiting
    pub idle_with_waiting: f64,
    /// Per waiting aircraft with `wait_time > long_wait_threshold`
    pub long_wait: f64,
    pub long_wait_threshold: u32,
    /// Per waiting aircraft with `wait_time < short_wait_threshold`
    pub short_wait: f64,
    pub short_wait_threshold: u32,
}

impl Default for RewardWeights {
    fn default() -> Self {
        RewardWeights {
            landing: 10.0,
            emergency_bonus: 20.0,
            invalid_flight: -5.0,
            blocked_runway: -15.0,
            crash_normal: -50.0,
            crash_emergency: -100.0,
            idle_with_waiting: -10.0,
            long_wait: -2.0,
            long_wait_threshold: 10,
            short_wait: 0.1,
            short_wait_threshold: 5,
        }
    }
}

/// Additive terms that make up one step's reward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardComponents {
    /// Landing reward or invalid-selection penalty
    pub action: f64,
    pub crash: f64,
    pub idle: f64,
    pub long_wait: f64,
    pub short_wait: f64,
}

impl RewardComponents {
    pub fn total(&self) -> f64 {
        self.action + self.crash + self.idle + self.long_wait + self.short_wait
    }
}
