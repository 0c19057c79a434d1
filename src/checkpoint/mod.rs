//! Checkpoint and resume for machine instances.
//!
//! A checkpoint captures where a machine is and how it got there, so a
//! long-lived machine can survive a process restart. Rules, guards and
//! actions live in the transition table and are not serialized; a checkpoint
//! is resumed against a table built by the same code.

use crate::config::MachineConfig;
use crate::core::{State, StateHistory, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 2;

/// Serializable snapshot of a machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Checkpoint<S: State, T: Trigger> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// Identifier of the machine the checkpoint was taken from
    pub machine_id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Initial state of the machine
    pub initial_state: S,

    /// Current state of the machine
    pub current_state: S,

    /// Number of transitions committed so far
    pub sequence: u64,

    /// Configuration the machine was running with
    pub config: MachineConfig,

    /// Recorded transition history
    pub history: StateHistory<S, T>,
}

impl<S: State, T: Trigger> Checkpoint<S, T> {
    /// Check that this build can resume the checkpoint.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        if let Some(last) = self.history.last() {
            if last.to != self.current_state {
                return Err(CheckpointError::ValidationFailed(format!(
                    "history ends in '{}' but current state is '{}'",
                    last.to.name(),
                    self.current_state.name()
                )));
            }
            if last.sequence != self.sequence {
                return Err(CheckpointError::ValidationFailed(format!(
                    "history ends at sequence {} but checkpoint is at {}",
                    last.sequence, self.sequence
                )));
            }
        }
        if self.history.len() as u64 > self.sequence {
            return Err(CheckpointError::ValidationFailed(format!(
                "{} recorded transitions exceed sequence {}",
                self.history.len(),
                self.sequence
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))
    }
}
