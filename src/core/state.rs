//! State and trigger traits.
//!
//! A machine moves between values of a closed set of states in response to
//! values of a closed set of triggers. Both sets are plain Rust types; these
//! traits describe what the engine needs to know about them.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are immutable, identity-comparable values. The transition table
/// is keyed by state, hence the `Eq + Hash` requirement.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records and checkpoints
/// - `Eq` + `Hash`: states key the transition table
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: states must be serializable for checkpoints
///
/// # Example
///
/// ```rust
/// use switchyard::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Line {
///     OffHook,
///     Connected,
///     Destroyed,
/// }
///
/// impl State for Line {
///     fn name(&self) -> &str {
///         match self {
///             Self::OffHook => "OffHook",
///             Self::Connected => "Connected",
///             Self::Destroyed => "Destroyed",
///         }
///     }
///
///     fn label(&self) -> &str {
///         match self {
///             Self::OffHook => "off the hook",
///             _ => self.name(),
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Destroyed)
///     }
/// }
///
/// assert_eq!(Line::OffHook.label(), "off the hook");
/// assert!(Line::Destroyed.is_final());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Stable identifier used in errors and logs.
    fn name(&self) -> &str;

    /// Human readable text for presentation. Defaults to [`State::name`].
    fn label(&self) -> &str {
        self.name()
    }

    /// Check if this is a final (terminal) state.
    ///
    /// A machine that enters a final state halts: every later trigger is
    /// rejected (see `MachineConfig::halt_on_final`).
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// A machine in an error state reports `MachineStatus::Faulted` but keeps
    /// accepting triggers.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Trait for the external stimuli that drive a machine.
pub trait Trigger: Clone + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync {
    /// Stable identifier used in errors and logs.
    fn name(&self) -> &str;

    /// Human readable text for presentation. Defaults to [`Trigger::name`].
    fn label(&self) -> &str {
        self.name()
    }
}
