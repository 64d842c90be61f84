//! This module defines the aircraft entity and its per-step lifecycle.

use std::cmp::Ordering;

use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    /// Still approaching, `eta > 0`
    InTransit,
    /// In the landing queue, `eta == 0`
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Carrier code followed by a 3-digit number, not guaranteed unique
    pub id: String,
    /// Remaining fuel; a negative value means the aircraft has crashed
    pub fuel: i32,
    /// Ticks left before the aircraft joins the queue
    pub eta: u32,
    pub priority: Priority,
    /// Ticks spent in the queue
    pub wait_time: u32,
    /// Distance metric drawn at creation, informational only
    pub distance: u32,
}

impl Aircraft {
    pub fn new(id: impl Into<String>, fuel: i32, eta: u32, priority: Priority) -> Self {
        Aircraft { id: id.into(), fuel, eta, priority, wait_time: 0, distance: 0 }
    }

    pub fn with_distance(mut self, distance: u32) -> Self {
        self.distance = distance;
        self
    }

    pub fn phase(&self) -> FlightPhase {
        if self.eta > 0 { FlightPhase::InTransit } else { FlightPhase::Waiting }
    }

    pub fn is_waiting(&self) -> bool {
        self.eta == 0
    }

    pub fn is_emergency(&self) -> bool {
        self.priority == Priority::Emergency
    }

    pub fn is_crashed(&self) -> bool {
        self.fuel < 0
    }

    /// Consumes one unit of fuel if the aircraft is waiting.
    pub fn burn_fuel(&mut self) {
        if self.is_waiting() {
            self.fuel -= 1;
        }
    }

    /// Lifecycle transition: approach while in transit, accumulate waiting time once queued.
    pub fn tick(&mut self) {
        match self.phase() {
            FlightPhase::InTransit => self.eta -= 1,
            FlightPhase::Waiting => self.wait_time += 1,
        }
    }
}

/// Emergency aircraft first, then more remaining fuel first.
fn landing_order(a: &Aircraft, b: &Aircraft) -> Ordering {
    let tier = |x: &Aircraft| if x.is_emergency() { 0 } else { 1 };
    tier(a).cmp(&tier(b)).then_with(|| b.fuel.cmp(&a.fuel))
}

/// Indices of the waiting aircraft in `fleet`, ranked for landing.
///
/// The sort is stable, so aircraft with equal keys keep their collection order.
pub fn rank_waiting_indices(fleet: &[Aircraft]) -> Vec<usize> {
    let mut indices = fleet.iter().enumerate()
        .filter(|(_, a)| a.is_waiting())
        .map(|(i, _)| i)
        .collect::<Vec<usize>>();
    indices.sort_by(|&i, &j| landing_order(&fleet[i], &fleet[j]));
    indices
}

/// The waiting aircraft in `fleet`, ranked for landing.
pub fn rank_waiting(fleet: &[Aircraft]) -> Vec<&Aircraft> {
    rank_waiting_indices(fleet).into_iter().map(|i| &fleet[i]).collect()
}
