//! Discrete-time landing scheduler.
//!
//! Aircraft arrive in random batches, burn fuel while they wait in the
//! queue and have to be assigned to one of two runways, each of which needs
//! a cooldown after every landing. The environment follows the usual
//! reinforcement-learning protocol (`reset` / `step`) so that an external
//! agent can learn a landing policy from its observations and rewards.
//!
//! # Modules
//!
//! - **`aircraft`**: the per-flight record, its lifecycle and the landing ranking
//! - **`generate`**: the stochastic arrival process and RNG seeding
//! - **`env`**: the scheduling engine (`AtcEnv`)
//! - **`action`** / **`observation`**: the discrete action space and the 17-value observation
//! - **`reward`**: reward weights and per-step breakdown
//! - **`snapshot`**: read-only state view and console report
//! - **`policy`**, **`runner`**, **`telemetry`**: baselines, episode loop, JSONL sinks

pub mod action;
pub mod aircraft;
pub mod config;
pub mod env;
pub mod error;
pub mod generate;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod runner;
pub mod snapshot;
pub mod telemetry;

pub use action::Action;
pub use aircraft::{Aircraft, FlightPhase, Priority};
pub use config::EnvConfig;
pub use env::{AtcEnv, StepInfo, StepResult};
pub use error::EnvError;
pub use generate::ArrivalGenerator;
pub use observation::Observation;
pub use reward::{RewardComponents, RewardWeights};
pub use snapshot::{LandingRecord, StateSnapshot};
