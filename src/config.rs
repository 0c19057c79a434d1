//! Configuration for tables and machines.
//!
//! Both types deserialize from JSON with every field optional, so a config
//! file only needs to mention what it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How a table builder treats a second rule for the same `(state, trigger)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Reject a rule that can never fire because an earlier unguarded rule
    /// for the same pair always wins.
    #[default]
    Reject,
    /// A later rule replaces every earlier rule for the same pair.
    Replace,
}

/// Per-machine settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Record committed transitions in the machine's history.
    pub record_history: bool,
    /// Keep at most this many transitions; `None` keeps all of them.
    pub history_limit: Option<usize>,
    /// Reject every trigger once the machine reaches a final state.
    pub halt_on_final: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: None,
            halt_on_final: true,
        }
    }
}

impl MachineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "history_limit must be greater than zero; disable record_history instead"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_record_history_and_halt() {
        let config = MachineConfig::default();
        assert!(config.record_history);
        assert!(config.halt_on_final);
        assert_eq!(config.history_limit, None);
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Reject);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = MachineConfig::from_json(r#"{ "history_limit": 16 }"#).unwrap();

        assert_eq!(config.history_limit, Some(16));
        assert!(config.record_history);
        assert!(config.halt_on_final);
    }

    #[test]
    fn zero_history_limit_is_invalid() {
        let result = MachineConfig::from_json(r#"{ "history_limit": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = MachineConfig::from_json("{ history_limit: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn duplicate_policy_uses_snake_case() {
        let policy: DuplicatePolicy = serde_json::from_str(r#""replace""#).unwrap();
        assert_eq!(policy, DuplicatePolicy::Replace);
        assert_eq!(
            serde_json::to_string(&DuplicatePolicy::Reject).unwrap(),
            r#""reject""#
        );
    }
}
