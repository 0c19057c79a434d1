//! Errors returned when firing triggers.

use crate::core::ActionFailure;
use thiserror::Error;

/// Errors that can occur while firing a trigger.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// No rule for the current state matched the trigger (or every matching
    /// rule's guard failed, or the machine is halted). The state is unchanged.
    #[error("No transition from state '{state}' on trigger '{trigger}'")]
    NoTransition { state: String, trigger: String },

    /// The transition was committed but its action failed. The machine is
    /// already in state `to`.
    #[error("Action for transition '{from}' --{trigger}--> '{to}' failed: {source}")]
    Action {
        from: String,
        trigger: String,
        to: String,
        #[source]
        source: ActionFailure,
    },
}

impl TransitionError {
    /// True when the machine state changed despite the error.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Action { .. })
    }
}
