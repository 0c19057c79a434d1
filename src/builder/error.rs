//! Build errors for transition tables and rules.

use thiserror::Error;

/// Errors that can occur when building rules and transition tables.
///
/// Any of these aborts table construction; no partial table is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Duplicate rule for trigger '{trigger}' in state '{state}'. Guard the earlier rule or use DuplicatePolicy::Replace")]
    DuplicateRule { state: String, trigger: String },

    #[error("No rules defined. Add at least one rule before finalizing")]
    EmptyTable,

    #[error("Rule source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Rule trigger not specified. Call .on(trigger)")]
    MissingTrigger,

    #[error("Rule target state not specified. Call .to(state)")]
    MissingToState,
}
