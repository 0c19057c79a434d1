//! Transition rules and the immutable table that holds them.

use crate::builder::TransitionTableBuilder;
use crate::core::{Action, Guard, Hook, State, Trigger};
use std::collections::HashMap;
use std::fmt;

/// A single `(from, trigger) -> to` rule with optional guard and action.
pub struct Rule<S: State, T: Trigger, C = ()> {
    from: S,
    trigger: T,
    to: S,
    guard: Option<Guard<C>>,
    action: Option<Action<S, T, C>>,
}

impl<S: State, T: Trigger, C> Rule<S, T, C> {
    pub fn new(
        from: S,
        trigger: T,
        to: S,
        guard: Option<Guard<C>>,
        action: Option<Action<S, T, C>>,
    ) -> Self {
        Self {
            from,
            trigger,
            to,
            guard,
            action,
        }
    }

    pub fn from(&self) -> &S {
        &self.from
    }

    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn to(&self) -> &S {
        &self.to
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Check if this rule may fire for the given context (pure).
    pub fn allows(&self, context: &C) -> bool {
        self.guard.as_ref().map_or(true, |g| g.check(context))
    }

    pub(crate) fn action(&self) -> Option<&Action<S, T, C>> {
        self.action.as_ref()
    }
}

impl<S: State, T: Trigger, C> fmt::Debug for Rule<S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("from", &self.from)
            .field("trigger", &self.trigger)
            .field("to", &self.to)
            .field("guarded", &self.is_guarded())
            .field("action", &self.has_action())
            .finish()
    }
}

/// Immutable mapping from state to its ordered rules.
///
/// Built once through [`TransitionTableBuilder::finalize`] and then only
/// read. A table can back any number of machines, including machines on
/// different threads.
pub struct TransitionTable<S: State, T: Trigger, C = ()> {
    pub(crate) rules: HashMap<S, Vec<Rule<S, T, C>>>,
    pub(crate) states: Vec<S>,
    pub(crate) entry_hooks: HashMap<S, Vec<Hook<S, C>>>,
    pub(crate) exit_hooks: HashMap<S, Vec<Hook<S, C>>>,
}

impl<S: State, T: Trigger, C> TransitionTable<S, T, C> {
    /// Start building a table.
    pub fn builder() -> TransitionTableBuilder<S, T, C> {
        TransitionTableBuilder::new()
    }

    /// Rules leaving `state`, in insertion order.
    pub fn rules_for(&self, state: &S) -> &[Rule<S, T, C>] {
        self.rules.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Triggers with at least one rule leaving `state`, without evaluating
    /// guards. Each trigger appears once, in rule order.
    pub fn triggers_for(&self, state: &S) -> Vec<&T> {
        let mut triggers: Vec<&T> = Vec::new();
        for rule in self.rules_for(state) {
            if !triggers.contains(&rule.trigger()) {
                triggers.push(rule.trigger());
            }
        }
        triggers
    }

    /// Every state mentioned by a rule or hook, in order of first mention.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Iterate over all rules. Rules of one state stay in insertion order;
    /// the order between states is unspecified.
    pub fn rules(&self) -> impl Iterator<Item = &Rule<S, T, C>> {
        self.rules.values().flatten()
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn entry_hooks(&self, state: &S) -> &[Hook<S, C>] {
        self.entry_hooks.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn exit_hooks(&self, state: &S) -> &[Hook<S, C>] {
        self.exit_hooks.get(state).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<S: State, T: Trigger, C> fmt::Debug for TransitionTable<S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("states", &self.states)
            .field("rules", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_table;
    use crate::{state_enum, trigger_enum};

    state_enum! {
        enum TestState {
            OffHook,
            Connecting,
            Connected,
            OnHold,
        }
    }

    trigger_enum! {
        enum TestTrigger {
            CallDialed,
            HungUp,
            CallConnected,
            PlacedOnHold,
        }
    }

    fn phone_table() -> TransitionTable<TestState, TestTrigger> {
        build_table()
            .add_rule(TestState::OffHook, TestTrigger::CallDialed, TestState::Connecting)
            .add_rule(TestState::Connecting, TestTrigger::HungUp, TestState::OffHook)
            .add_rule(
                TestState::Connecting,
                TestTrigger::CallConnected,
                TestState::Connected,
            )
            .add_rule(
                TestState::Connected,
                TestTrigger::PlacedOnHold,
                TestState::OnHold,
            )
            .finalize()
            .unwrap()
    }

    #[test]
    fn rules_for_keeps_insertion_order() {
        let table = phone_table();
        let triggers: Vec<&TestTrigger> = table
            .rules_for(&TestState::Connecting)
            .iter()
            .map(Rule::trigger)
            .collect();

        assert_eq!(
            triggers,
            vec![&TestTrigger::HungUp, &TestTrigger::CallConnected]
        );
    }

    #[test]
    fn state_without_rules_has_empty_slice() {
        let table = phone_table();
        assert!(table.rules_for(&TestState::OnHold).is_empty());
        assert!(table.triggers_for(&TestState::OnHold).is_empty());
    }

    #[test]
    fn states_are_listed_in_first_mention_order() {
        let table = phone_table();
        assert_eq!(
            table.states(),
            &[
                TestState::OffHook,
                TestState::Connecting,
                TestState::Connected,
                TestState::OnHold,
            ]
        );
        assert!(table.contains_state(&TestState::OnHold));
    }

    #[test]
    fn len_counts_all_rules() {
        let table = phone_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.rules().count(), 4);
        assert!(!table.is_empty());
    }

    #[test]
    fn triggers_for_collapses_guarded_alternatives() {
        let table: TransitionTable<TestState, TestTrigger, bool> = build_table()
            .add_rule_with(
                TestState::Connected,
                TestTrigger::HungUp,
                TestState::OnHold,
                Some(Guard::new(|hold: &bool| *hold)),
                None,
            )
            .add_rule(TestState::Connected, TestTrigger::HungUp, TestState::OffHook)
            .finalize()
            .unwrap();

        assert_eq!(table.rules_for(&TestState::Connected).len(), 2);
        assert_eq!(
            table.triggers_for(&TestState::Connected),
            vec![&TestTrigger::HungUp]
        );
    }

    #[test]
    fn table_is_shareable_across_threads() {
        fn assert_sync<X: Sync + Send>() {}
        assert_sync::<TransitionTable<TestState, TestTrigger>>();
    }
}
