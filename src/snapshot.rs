//! Read-only view of the environment for reporting.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::action::Action;
use crate::aircraft::Aircraft;
use crate::config::NUM_RUNWAYS;

/// Outcome of the most recent successful landing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingRecord {
    pub aircraft_id: String,
    /// Runway index, 0-based like the action encoding
    pub runway: usize,
}

/// Owned copy of the engine state; mutating it has no effect on the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub step_index: u32,
    pub cooldowns: [u32; NUM_RUNWAYS],
    pub cooldown_duration: u32,
    /// Waiting aircraft in landing-priority order
    pub waiting: Vec<Aircraft>,
    pub served_count: u32,
    pub crash_count: u32,
    pub last_action: Option<Action>,
    pub last_reward: f64,
    pub last_landing: Option<LandingRecord>,
}

/// Rows of the waiting table shown by the console report.
const REPORT_ROWS: usize = 10;

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{rule}")?;
        writeln!(f, "  ATC SIM STEP {}", self.step_index)?;
        writeln!(f, "{rule}")?;

        writeln!(f, "\nRunway Status:")?;
        for (i, cooldown) in self.cooldowns.iter().enumerate() {
            let status = if *cooldown == 0 { "AVAILABLE" } else { "BUSY" };
            writeln!(f, "  Runway {}: {status:12} (cooldown: {cooldown})", i + 1)?;
        }

        writeln!(f, "\nWaiting Flights:")?;
        if self.waiting.is_empty() {
            writeln!(f, "  (No flights waiting)")?;
        } else {
            writeln!(f, "{:<8} {:<6} {:<6} {:<10}", "ID", "Fuel", "Wait", "Priority")?;
            writeln!(f, "{}", "-".repeat(32))?;
            for aircraft in self.waiting.iter().take(REPORT_ROWS) {
                let priority = if aircraft.is_emergency() { "EMERGENCY" } else { "NORMAL" };
                writeln!(f, "{:<8} {:<6} {:<6} {:<10}", aircraft.id, aircraft.fuel, aircraft.wait_time, priority)?;
            }
        }

        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Flights Served: {}", self.served_count)?;
        writeln!(f, "  Crashes: {}", self.crash_count)?;
        writeln!(f, "  Waiting: {}", self.waiting.len())?;

        if let Some(action) = self.last_action {
            write!(f, "\nLast Action: ")?;
            match (action, &self.last_landing) {
                (Action::Idle, _) => writeln!(f, "DO_NOTHING")?,
                (Action::Land { .. }, Some(landing)) => {
                    writeln!(f, "Landed {} on Runway {}", landing.aircraft_id, landing.runway.saturating_add(1))?
                }
                (Action::Land { runway, .. }, None) => {
                    writeln!(f, "Action {} (Runway {})", action.encode(), runway.saturating_add(1))?
                }
            }
            if self.last_reward != 0.0 {
                let sign = if self.last_reward > 0.0 { "+" } else { "" };
                writeln!(f, "Reward: {sign}{:.1}", self.last_reward)?;
            }
        }

        writeln!(f, "{rule}")
    }
}
