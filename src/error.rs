//! Contract violations raised by the environment.
//!
//! Domain outcomes (selecting a missing flight, a blocked runway, a crash)
//! are not errors: they are reward-bearing transitions and never surface here.

use std::fmt;

use crate::config::ACTION_COUNT;

#[derive(Debug, Clone, PartialEq)]
pub enum EnvError {
    /// The action value lies outside the discrete action space.
    InvalidAction(u32),
    /// `step` was called before the first `reset`.
    NotReset,
    /// The environment configuration is inconsistent.
    InvalidConfig { field: String, message: String },
    /// The configuration file could not be read or parsed.
    ConfigLoad { path: String, source: String },
}

impl EnvError {
    pub(crate) fn config(field: &str, message: impl Into<String>) -> Self {
        EnvError::InvalidConfig { field: field.to_string(), message: message.into() }
    }
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::InvalidAction(action) => {
                write!(f, "invalid action {action}: expected a value in [0, {}]", ACTION_COUNT - 1)
            }
            EnvError::NotReset => write!(f, "step called before reset"),
            EnvError::InvalidConfig { field, message } => {
                write!(f, "invalid config field '{field}': {message}")
            }
            EnvError::ConfigLoad { path, source } => {
                write!(f, "failed to load config '{path}': {source}")
            }
        }
    }
}

impl std::error::Error for EnvError {}
