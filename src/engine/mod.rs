//! The transition engine.
//!
//! A [`TransitionTable`] is built once and read by any number of
//! [`Machine`]s. Each machine owns a single current state and advances it
//! through [`Machine::fire`].
//!
//! # Key Concepts
//!
//! - **Rules**: `(from, trigger) -> to`, optionally guarded, optionally with an action
//! - **Dispatch**: first rule for the trigger whose guard passes, in insertion order
//! - **Commit before action**: actions and entry hooks see the new state
//! - **Halting**: a machine in a final state rejects every trigger

mod error;
mod machine;
mod table;

pub use error::TransitionError;
pub use machine::{Machine, MachineStatus};
pub use table::{Rule, TransitionTable};
