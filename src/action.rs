use std::fmt;

use serde::{Serialize, Deserialize};

use crate::config::{ACTION_COUNT, NUM_RUNWAYS, QUEUE_SLOTS};
use crate::error::EnvError;

/// A decoded discrete action.
///
/// Values `0..10` land the `value / 2`-th ranked waiting aircraft on runway
/// `value % 2`; the last value of the space is the no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Idle,
    Land { flight_index: usize, runway: usize },
}

impl Action {
    pub const IDLE_VALUE: u32 = ACTION_COUNT - 1;

    pub fn decode(value: u32) -> Result<Action, EnvError> {
        if value >= ACTION_COUNT {
            return Err(EnvError::InvalidAction(value));
        }
        if value == Self::IDLE_VALUE {
            return Ok(Action::Idle);
        }
        let value = value as usize;
        Ok(Action::Land { flight_index: value / NUM_RUNWAYS, runway: value % NUM_RUNWAYS })
    }

    /// Whether the action belongs to the discrete action space.
    pub fn in_range(&self) -> bool {
        match *self {
            Action::Idle => true,
            Action::Land { flight_index, runway } => flight_index < QUEUE_SLOTS && runway < NUM_RUNWAYS,
        }
    }

    /// Saturates to `u32::MAX` for landing indices far outside the space.
    pub fn encode(&self) -> u32 {
        match *self {
            Action::Idle => Self::IDLE_VALUE,
            Action::Land { flight_index, runway } => {
                let value = flight_index.saturating_mul(NUM_RUNWAYS).saturating_add(runway);
                u32::try_from(value).unwrap_or(u32::MAX)
            }
        }
    }

    pub fn all() -> impl Iterator<Item = Action> {
        (0..ACTION_COUNT).filter_map(|v| Action::decode(v).ok())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Idle => write!(f, "DO_NOTHING"),
            Action::Land { flight_index, runway } => {
                write!(f, "land #{} on Runway {}", flight_index.saturating_add(1), runway.saturating_add(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_layout() {
        assert_eq!(Action::decode(0), Ok(Action::Land { flight_index: 0, runway: 0 }));
        assert_eq!(Action::decode(1), Ok(Action::Land { flight_index: 0, runway: 1 }));
        assert_eq!(Action::decode(7), Ok(Action::Land { flight_index: 3, runway: 1 }));
        assert_eq!(Action::decode(9), Ok(Action::Land { flight_index: 4, runway: 1 }));
        assert_eq!(Action::decode(10), Ok(Action::Idle));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert_eq!(Action::decode(11), Err(EnvError::InvalidAction(11)));
        assert_eq!(Action::decode(u32::MAX), Err(EnvError::InvalidAction(u32::MAX)));
    }

    #[test]
    fn test_huge_landing_indices_do_not_overflow() {
        let far = Action::Land { flight_index: usize::MAX, runway: usize::MAX };
        assert!(!far.in_range());
        assert_eq!(far.encode(), u32::MAX);
        assert!(far.to_string().starts_with("land #"));
        assert!(!Action::Land { flight_index: 5, runway: 0 }.in_range());
        assert!(!Action::Land { flight_index: 0, runway: 2 }.in_range());
        assert!(Action::all().all(|a| a.in_range()));
    }

    #[test]
    fn test_all_covers_the_space_once() {
        let values = Action::all().map(|a| a.encode()).collect::<Vec<u32>>();
        assert_eq!(values, (0..11).collect::<Vec<u32>>());
    }
}
