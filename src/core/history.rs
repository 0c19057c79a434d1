//! Transition history tracking.
//!
//! Every committed transition is recorded as a [`StateTransition`]. A
//! [`StateHistory`] keeps them in commit order, optionally bounded so that
//! long-lived machines do not grow without limit.

use super::state::{State, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single committed transition.
///
/// This is also what a transition's action receives, so an action can see
/// where the machine came from, what fired, and where it is now.
///
/// # Example
///
/// ```rust
/// use switchyard::core::StateTransition;
/// use switchyard::{state_enum, trigger_enum};
/// use chrono::Utc;
///
/// state_enum! {
///     enum Door { Closed, Open }
/// }
///
/// trigger_enum! {
///     enum Push { Open }
/// }
///
/// let transition = StateTransition {
///     from: Door::Closed,
///     trigger: Push::Open,
///     to: Door::Open,
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert!(!transition.is_self_loop());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, T: Trigger> {
    /// The state being transitioned from
    pub from: S,
    /// The trigger that caused the transition
    pub trigger: T,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
    /// 1-based position of this transition in the machine's lifetime
    pub sequence: u64,
}

impl<S: State, T: Trigger> StateTransition<S, T> {
    /// True when the rule led back to the state it started from.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of committed transitions.
///
/// With a limit set, recording past the limit evicts the oldest entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, T: Trigger> {
    transitions: VecDeque<StateTransition<S, T>>,
    #[serde(default)]
    limit: Option<usize>,
}

impl<S: State, T: Trigger> Default for StateHistory<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, T: Trigger> StateHistory<S, T> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty history that keeps at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(64)),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a transition, evicting the oldest one if the history is full.
    pub fn record(&mut self, transition: StateTransition<S, T>) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Iterate over retained transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &StateTransition<S, T>> {
        self.transitions.iter()
    }

    /// The most recently committed transition.
    pub fn last(&self) -> Option<&StateTransition<S, T>> {
        self.transitions.back()
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed by
    /// the `to` state of every retained transition. Empty when nothing has
    /// been recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
