//! Builder for constructing a single transition rule.

use crate::builder::error::BuildError;
use crate::core::{Action, ActionFailure, Guard, State, StateTransition, Trigger};
use crate::engine::Rule;

/// Builder for constructing rules with a fluent API.
///
/// `from`, `on` and `to` are required; guard and action are optional.
pub struct RuleBuilder<S: State, T: Trigger, C = ()> {
    from: Option<S>,
    trigger: Option<T>,
    to: Option<S>,
    guard: Option<Guard<C>>,
    action: Option<Action<S, T, C>>,
}

impl<S: State, T: Trigger, C> RuleBuilder<S, T, C> {
    /// Create a new rule builder.
    pub fn new() -> Self {
        Self {
            from: None,
            trigger: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the trigger (required).
    pub fn on(mut self, trigger: T) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action (optional).
    pub fn action(mut self, action: Action<S, T, C>) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the action using a closure (optional).
    pub fn then<F>(mut self, callback: F) -> Self
    where
        F: Fn(&StateTransition<S, T>, &mut C) -> Result<(), ActionFailure> + Send + Sync + 'static,
    {
        self.action = Some(Action::new(callback));
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<Rule<S, T, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let trigger = self.trigger.ok_or(BuildError::MissingTrigger)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Rule::new(from, trigger, to, self.guard, self.action))
    }
}

impl<S: State, T: Trigger, C> Default for RuleBuilder<S, T, C> {
    fn default() -> Self {
        Self::new()
    }
}
