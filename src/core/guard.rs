//! Guards, actions and state hooks attached to a transition table.
//!
//! Guards are pure predicates over the machine's context that decide whether
//! a rule applies. Actions and hooks are the side-effecting callbacks that
//! run once a transition has been committed.

use super::history::StateTransition;
use super::state::{State, Trigger};
use std::error::Error;
use std::fmt;

/// Error type returned by a failing [`Action`].
pub type ActionFailure = Box<dyn Error + Send + Sync>;

/// Pure predicate that decides whether a guarded rule may fire.
///
/// Guards are evaluated synchronously against the machine's context `C`.
/// They must be deterministic and free of side effects; the engine may
/// evaluate the same guard several times (for example from
/// `Machine::permitted_triggers`).
///
/// # Example
///
/// ```rust
/// use switchyard::core::Guard;
///
/// struct Phone {
///     angry: bool,
/// }
///
/// let can_destroy = Guard::new(|phone: &Phone| phone.angry);
///
/// assert!(can_destroy.check(&Phone { angry: true }));
/// assert!(!can_destroy.check(&Phone { angry: false }));
/// ```
pub struct Guard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Check if the guard allows the transition for this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }

    /// Guard that passes exactly when this one fails.
    pub fn negate(self) -> Self
    where
        C: 'static,
    {
        let inner = self.predicate;
        Guard {
            predicate: Box::new(move |context| !inner(context)),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

type ActionFn<S, T, C> =
    Box<dyn Fn(&StateTransition<S, T>, &mut C) -> Result<(), ActionFailure> + Send + Sync>;

/// Side-effecting callback run once per successful transition.
///
/// Actions run after the new state has been committed, so they always see
/// the machine in its target state. An action failure does not roll the
/// transition back; it is reported to the caller as
/// `TransitionError::Action`.
pub struct Action<S: State, T: Trigger, C> {
    callback: ActionFn<S, T, C>,
}

impl<S: State, T: Trigger, C> Action<S, T, C> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&StateTransition<S, T>, &mut C) -> Result<(), ActionFailure> + Send + Sync + 'static,
    {
        Action {
            callback: Box::new(callback),
        }
    }

    /// Wrap a callback that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&StateTransition<S, T>, &mut C) + Send + Sync + 'static,
    {
        Action::new(move |transition, context| {
            callback(transition, context);
            Ok(())
        })
    }

    pub fn run(
        &self,
        transition: &StateTransition<S, T>,
        context: &mut C,
    ) -> Result<(), ActionFailure> {
        (self.callback)(transition, context)
    }
}

impl<S: State, T: Trigger, C> fmt::Debug for Action<S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Callback run when a machine enters or leaves a particular state.
pub struct Hook<S: State, C> {
    callback: Box<dyn Fn(&S, &mut C) + Send + Sync>,
}

impl<S: State, C> Hook<S, C> {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&S, &mut C) + Send + Sync + 'static,
    {
        Hook {
            callback: Box::new(callback),
        }
    }

    pub fn run(&self, state: &S, context: &mut C) {
        (self.callback)(state, context)
    }
}
