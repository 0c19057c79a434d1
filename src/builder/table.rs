//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::rule::RuleBuilder;
use crate::config::DuplicatePolicy;
use crate::core::{Action, Guard, Hook, State, Trigger};
use crate::engine::{Rule, TransitionTable};
use std::collections::HashMap;
use stillwater::validation::Validation;

/// Builder for constructing a [`TransitionTable`] with a fluent API.
///
/// Rules are collected as given and checked once, in [`finalize`]. Under the
/// default [`DuplicatePolicy::Reject`] a `(state, trigger)` pair may carry
/// several rules only if every rule except the last one is guarded: the
/// engine picks the first rule whose guard passes, in insertion order, so an
/// unguarded rule would shadow everything after it.
///
/// [`finalize`]: TransitionTableBuilder::finalize
pub struct TransitionTableBuilder<S: State, T: Trigger, C = ()> {
    rules: Vec<Rule<S, T, C>>,
    entry_hooks: Vec<(S, Hook<S, C>)>,
    exit_hooks: Vec<(S, Hook<S, C>)>,
    policy: DuplicatePolicy,
}

/// Start building a transition table.
pub fn build_table<S: State, T: Trigger, C>() -> TransitionTableBuilder<S, T, C> {
    TransitionTableBuilder::new()
}

impl<S: State, T: Trigger, C> TransitionTableBuilder<S, T, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            entry_hooks: Vec::new(),
            exit_hooks: Vec::new(),
            policy: DuplicatePolicy::default(),
        }
    }

    /// Set how repeated `(state, trigger)` pairs are treated.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add an unguarded rule without an action.
    pub fn add_rule(self, from: S, trigger: T, to: S) -> Self {
        self.add(Rule::new(from, trigger, to, None, None))
    }

    /// Add a rule with an optional guard and an optional action.
    pub fn add_rule_with(
        self,
        from: S,
        trigger: T,
        to: S,
        guard: Option<Guard<C>>,
        action: Option<Action<S, T, C>>,
    ) -> Self {
        self.add(Rule::new(from, trigger, to, guard, action))
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(self, builder: RuleBuilder<S, T, C>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        Ok(self.add(rule))
    }

    /// Add a pre-built rule.
    pub fn add(mut self, rule: Rule<S, T, C>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Run `hook` every time a machine enters `state`.
    pub fn on_entry<F>(mut self, state: S, hook: F) -> Self
    where
        F: Fn(&S, &mut C) + Send + Sync + 'static,
    {
        self.entry_hooks.push((state, Hook::new(hook)));
        self
    }

    /// Run `hook` every time a machine leaves `state`.
    pub fn on_exit<F>(mut self, state: S, hook: F) -> Self
    where
        F: Fn(&S, &mut C) + Send + Sync + 'static,
    {
        self.exit_hooks.push((state, Hook::new(hook)));
        self
    }

    /// Check the collected rules, reporting every problem at once.
    pub fn validate(&self) -> Validation<(), Vec<BuildError>> {
        let errors = self.problems();
        if errors.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(errors)
        }
    }

    fn problems(&self) -> Vec<BuildError> {
        let mut errors = Vec::new();

        if self.rules.is_empty() {
            errors.push(BuildError::EmptyTable);
        }

        if self.policy == DuplicatePolicy::Reject {
            for (index, rule) in self.rules.iter().enumerate() {
                if rule.is_guarded() {
                    continue;
                }
                let shadowed = self.rules[index + 1..]
                    .iter()
                    .any(|later| later.from() == rule.from() && later.trigger() == rule.trigger());
                if shadowed {
                    let error = BuildError::DuplicateRule {
                        state: rule.from().name().to_string(),
                        trigger: rule.trigger().name().to_string(),
                    };
                    if !errors.contains(&error) {
                        errors.push(error);
                    }
                }
            }
        }

        errors
    }

    /// Build the immutable table.
    ///
    /// Returns the first problem [`validate`](Self::validate) would report.
    pub fn finalize(self) -> Result<TransitionTable<S, T, C>, BuildError> {
        let errors = self.problems();
        if let Some(first) = errors.first() {
            tracing::warn!(
                problems = errors.len(),
                error = %first,
                "transition table rejected"
            );
            return Err(first.clone());
        }

        let mut states: Vec<S> = Vec::new();
        let mut note_state = |state: &S| {
            if !states.contains(state) {
                states.push(state.clone());
            }
        };

        let mut rules: HashMap<S, Vec<Rule<S, T, C>>> = HashMap::new();
        for rule in self.rules {
            note_state(rule.from());
            note_state(rule.to());
            let bucket = rules.entry(rule.from().clone()).or_default();
            if self.policy == DuplicatePolicy::Replace {
                bucket.retain(|existing| existing.trigger() != rule.trigger());
            }
            bucket.push(rule);
        }

        let mut entry_hooks: HashMap<S, Vec<Hook<S, C>>> = HashMap::new();
        for (state, hook) in self.entry_hooks {
            note_state(&state);
            entry_hooks.entry(state).or_default().push(hook);
        }

        let mut exit_hooks: HashMap<S, Vec<Hook<S, C>>> = HashMap::new();
        for (state, hook) in self.exit_hooks {
            note_state(&state);
            exit_hooks.entry(state).or_default().push(hook);
        }

        let table = TransitionTable {
            rules,
            states,
            entry_hooks,
            exit_hooks,
        };
        tracing::debug!(
            states = table.states().len(),
            rules = table.len(),
            "transition table finalized"
        );
        Ok(table)
    }
}

impl<S: State, T: Trigger, C> Default for TransitionTableBuilder<S, T, C> {
    fn default() -> Self {
        Self::new()
    }
}
