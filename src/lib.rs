//! Switchyard: a trigger-driven finite state machine engine.
//!
//! A closed set of states, a closed set of triggers, and a transition table
//! mapping `(state, trigger)` to the next state. The table is built once and
//! shared read-only; each [`Machine`] owns one current state and moves it
//! forward with [`Machine::fire`].
//!
//! # Core Concepts
//!
//! - **State / Trigger**: closed enums, usually declared with [`state_enum!`] and [`trigger_enum!`]
//! - **Transition Table**: immutable rules, validated when finalized
//! - **Guards**: pure predicates over the machine's context
//! - **Actions and hooks**: side effects run after a transition commits
//! - **Checkpoints**: serializable snapshots for resuming machines
//!
//! # Example
//!
//! ```rust
//! use switchyard::{build_table, state_enum, trigger_enum, Guard, Machine, TransitionTable};
//!
//! state_enum! {
//!     enum PhoneState {
//!         OffHook => "off the hook",
//!         Connecting => "connecting",
//!         Connected => "connected",
//!         OnHold => "on hold",
//!         Destroyed => "destroyed",
//!     }
//!     final: [Destroyed]
//! }
//!
//! trigger_enum! {
//!     enum PhoneTrigger {
//!         CallDialed,
//!         CallConnected,
//!         PlacedOnHold,
//!         PhoneThrownIntoWall,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Mood {
//!     angry: bool,
//! }
//!
//! let table: TransitionTable<PhoneState, PhoneTrigger, Mood> = build_table()
//!     .add_rule(PhoneState::OffHook, PhoneTrigger::CallDialed, PhoneState::Connecting)
//!     .add_rule(PhoneState::Connecting, PhoneTrigger::CallConnected, PhoneState::Connected)
//!     .add_rule(PhoneState::Connected, PhoneTrigger::PlacedOnHold, PhoneState::OnHold)
//!     .add_rule_with(
//!         PhoneState::OnHold,
//!         PhoneTrigger::PhoneThrownIntoWall,
//!         PhoneState::Destroyed,
//!         Some(Guard::new(|mood: &Mood| mood.angry)),
//!         None,
//!     )
//!     .finalize()
//!     .unwrap();
//!
//! let mut phone = Machine::new(&table, PhoneState::OffHook);
//! phone.fire(PhoneTrigger::CallDialed).unwrap();
//! phone.fire(PhoneTrigger::CallConnected).unwrap();
//! phone.fire(PhoneTrigger::PlacedOnHold).unwrap();
//!
//! assert!(phone.fire(PhoneTrigger::PhoneThrownIntoWall).is_err());
//! phone.context_mut().angry = true;
//! phone.fire(PhoneTrigger::PhoneThrownIntoWall).unwrap();
//!
//! assert_eq!(phone.current_state().to_string(), "destroyed");
//! assert!(phone.is_halted());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{build_table, BuildError, RuleBuilder, TransitionTableBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{DuplicatePolicy, MachineConfig};
pub use crate::core::{Action, Guard, State, StateHistory, StateTransition, Trigger};
pub use engine::{Machine, MachineStatus, Rule, TransitionError, TransitionTable};
