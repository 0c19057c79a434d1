//! Core state machine types.
//!
//! This module contains the vocabulary the engine is built from:
//! - State and trigger definitions via the `State` and `Trigger` traits
//! - Guard predicates, transition actions and state hooks
//! - Transition history tracking

mod guard;
mod history;
mod state;

pub use guard::{Action, ActionFailure, Guard, Hook};
pub use history::{StateHistory, StateTransition};
pub use state::{State, Trigger};
