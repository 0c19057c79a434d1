//! Builder API for transition tables.
//!
//! This module provides fluent builders and macros for declaring states,
//! triggers and the rules between them with minimal boilerplate.

pub mod error;
pub mod macros;
pub mod rule;
pub mod table;

pub use error::BuildError;
pub use rule::RuleBuilder;
pub use table::{build_table, TransitionTableBuilder};

use crate::core::{Guard, State, Trigger};
use crate::engine::Rule;

/// Create an unconditional rule without an action.
///
/// # Example
///
/// ```
/// use switchyard::builder::{build_table, simple_rule};
/// use switchyard::engine::TransitionTable;
/// use switchyard::{state_enum, trigger_enum};
///
/// state_enum! {
///     enum Light { Red, Green }
/// }
///
/// trigger_enum! {
///     enum Timer { Tick }
/// }
///
/// let table: TransitionTable<Light, Timer> = build_table()
///     .add(simple_rule(Light::Red, Timer::Tick, Light::Green))
///     .add(simple_rule(Light::Green, Timer::Tick, Light::Red))
///     .finalize()
///     .unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub fn simple_rule<S, T, C>(from: S, trigger: T, to: S) -> Rule<S, T, C>
where
    S: State,
    T: Trigger,
{
    Rule::new(from, trigger, to, None, None)
}

/// Create a rule that only fires while `guard` holds for the machine's context.
pub fn guarded_rule<S, T, C, F>(from: S, trigger: T, to: S, guard: F) -> Rule<S, T, C>
where
    S: State,
    T: Trigger,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Rule::new(from, trigger, to, Some(Guard::new(guard)), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state_enum, trigger_enum};

    state_enum! {
        enum TestState {
            OnHold,
            Destroyed,
        }
        final: [Destroyed]
    }

    trigger_enum! {
        enum TestTrigger {
            PhoneThrownIntoWall,
        }
    }

    #[test]
    fn simple_rule_builds() {
        let rule: Rule<TestState, TestTrigger> = simple_rule(
            TestState::OnHold,
            TestTrigger::PhoneThrownIntoWall,
            TestState::Destroyed,
        );

        assert_eq!(rule.from(), &TestState::OnHold);
        assert_eq!(rule.to(), &TestState::Destroyed);
        assert!(rule.allows(&()));
    }

    #[test]
    fn guarded_rule_respects_guard() {
        let rule: Rule<TestState, TestTrigger, bool> = guarded_rule(
            TestState::OnHold,
            TestTrigger::PhoneThrownIntoWall,
            TestState::Destroyed,
            |angry: &bool| *angry,
        );

        assert!(rule.allows(&true));
        assert!(!rule.allows(&false));
    }
}
