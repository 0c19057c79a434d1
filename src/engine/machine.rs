//! Machine instances that fire triggers against a shared transition table.

use crate::checkpoint::{Checkpoint, CheckpointError, CHECKPOINT_VERSION};
use crate::config::{ConfigError, MachineConfig};
use crate::core::{State, StateHistory, StateTransition, Trigger};
use crate::engine::error::TransitionError;
use crate::engine::table::{Rule, TransitionTable};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a machine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Accepting triggers.
    Ready,
    /// In an error state. Triggers are still accepted so the machine can
    /// recover.
    Faulted,
    /// Reached a final state; every trigger is rejected.
    Halted,
}

/// A single machine instance.
///
/// The machine borrows its [`TransitionTable`] and exclusively owns its
/// current state and its context `C`, the value guards read and actions and
/// hooks mutate. `fire` takes `&mut self`, so calls on one machine are
/// always serialized; the table itself is only ever read.
///
/// # Example
///
/// ```rust
/// use switchyard::builder::build_table;
/// use switchyard::engine::{Machine, TransitionError, TransitionTable};
/// use switchyard::{state_enum, trigger_enum};
///
/// state_enum! {
///     enum Phone { OffHook, Connecting, Connected }
/// }
///
/// trigger_enum! {
///     enum Call { Dialed, Connected, HungUp }
/// }
///
/// let table: TransitionTable<Phone, Call> = build_table()
///     .add_rule(Phone::OffHook, Call::Dialed, Phone::Connecting)
///     .add_rule(Phone::Connecting, Call::Connected, Phone::Connected)
///     .add_rule(Phone::Connected, Call::HungUp, Phone::OffHook)
///     .finalize()
///     .unwrap();
///
/// let mut phone = Machine::new(&table, Phone::OffHook);
/// assert_eq!(phone.fire(Call::Dialed).unwrap(), Phone::Connecting);
///
/// let err = phone.fire(Call::HungUp).unwrap_err();
/// assert!(matches!(err, TransitionError::NoTransition { .. }));
/// assert_eq!(phone.current_state(), &Phone::Connecting);
/// ```
pub struct Machine<'t, S: State, T: Trigger, C = ()> {
    id: Uuid,
    table: &'t TransitionTable<S, T, C>,
    initial: S,
    current: S,
    context: C,
    config: MachineConfig,
    history: StateHistory<S, T>,
    sequence: u64,
}

impl<'t, S: State, T: Trigger, C: Default> Machine<'t, S, T, C> {
    /// Create a machine in `initial` with a default context.
    pub fn new(table: &'t TransitionTable<S, T, C>, initial: S) -> Self {
        Self::with_context(table, initial, C::default())
    }
}

impl<'t, S: State, T: Trigger, C> Machine<'t, S, T, C> {
    /// Create a machine in `initial` with the given context.
    pub fn with_context(table: &'t TransitionTable<S, T, C>, initial: S, context: C) -> Self {
        let config = MachineConfig::default();
        let machine = Self {
            id: Uuid::new_v4(),
            table,
            current: initial.clone(),
            initial,
            context,
            history: empty_history(&config),
            config,
            sequence: 0,
        };
        tracing::debug!(
            machine = %machine.id,
            state = machine.current.name(),
            "machine created"
        );
        machine
    }

    /// Replace the machine's configuration. Recorded history is kept, trimmed
    /// to the new limit.
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails
    /// [`MachineConfig::validate`].
    pub fn with_config(mut self, config: MachineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut history = empty_history(&config);
        if config.record_history {
            for transition in self.history.iter() {
                history.record(transition.clone());
            }
        }
        self.history = history;
        self.config = config;
        Ok(self)
    }

    /// Identifier of this machine; kept across checkpoint and resume.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// State the machine was created in.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// The table this machine fires against.
    pub fn table(&self) -> &'t TransitionTable<S, T, C> {
        self.table
    }

    /// Settings this machine runs with.
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Context value passed to guards, actions and hooks.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access to the context, e.g. to change what guards see
    /// between triggers.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consume the machine and return its context.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Get transition history (pure)
    pub fn history(&self) -> &StateHistory<S, T> {
        &self.history
    }

    /// Lifecycle status derived from the current state and config.
    pub fn status(&self) -> MachineStatus {
        if self.config.halt_on_final && self.current.is_final() {
            MachineStatus::Halted
        } else if self.current.is_error() {
            MachineStatus::Faulted
        } else {
            MachineStatus::Ready
        }
    }

    pub fn is_halted(&self) -> bool {
        self.status() == MachineStatus::Halted
    }

    /// Check whether `trigger` would currently fire (guards are evaluated).
    pub fn can_fire(&self, trigger: &T) -> bool {
        !self.is_halted() && self.select(trigger).is_some()
    }

    /// Triggers that would currently fire, in rule order, without repeats.
    pub fn permitted_triggers(&self) -> Vec<&'t T> {
        if self.is_halted() {
            return Vec::new();
        }
        let table = self.table;
        let mut triggers: Vec<&'t T> = Vec::new();
        for rule in table.rules_for(&self.current) {
            if !triggers.contains(&rule.trigger()) && rule.allows(&self.context) {
                triggers.push(rule.trigger());
            }
        }
        triggers
    }

    /// Fire `trigger` and return the state the machine ends up in.
    ///
    /// The current state's rules are scanned in insertion order; the first
    /// rule for `trigger` whose guard passes wins. Exit hooks of the old
    /// state run, the new state is committed, then the rule's action runs,
    /// then entry hooks of the new state. If nothing matches, the state is
    /// left untouched and [`TransitionError::NoTransition`] is returned. If
    /// the action fails, the transition stays committed and
    /// [`TransitionError::Action`] is returned.
    pub fn fire(&mut self, trigger: T) -> Result<S, TransitionError> {
        if self.is_halted() {
            tracing::debug!(
                machine = %self.id,
                state = self.current.name(),
                trigger = trigger.name(),
                "machine halted; trigger rejected"
            );
            return Err(self.no_transition(&trigger));
        }

        let table = self.table;
        let Some(rule) = self.select(&trigger) else {
            tracing::debug!(
                machine = %self.id,
                state = self.current.name(),
                trigger = trigger.name(),
                "no transition"
            );
            return Err(self.no_transition(&trigger));
        };

        for hook in table.exit_hooks(&self.current) {
            hook.run(&self.current, &mut self.context);
        }

        let from = std::mem::replace(&mut self.current, rule.to().clone());
        self.sequence += 1;
        let transition = StateTransition {
            from,
            trigger,
            to: self.current.clone(),
            timestamp: Utc::now(),
            sequence: self.sequence,
        };
        tracing::debug!(
            machine = %self.id,
            from = transition.from.name(),
            trigger = transition.trigger.name(),
            to = transition.to.name(),
            "transition committed"
        );
        if self.config.record_history {
            self.history.record(transition.clone());
        }

        let outcome = match rule.action() {
            Some(action) => action.run(&transition, &mut self.context),
            None => Ok(()),
        };

        for hook in table.entry_hooks(&self.current) {
            hook.run(&self.current, &mut self.context);
        }

        match self.status() {
            MachineStatus::Halted => tracing::info!(
                machine = %self.id,
                state = self.current.name(),
                "machine halted in final state"
            ),
            MachineStatus::Faulted => tracing::warn!(
                machine = %self.id,
                from = transition.from.name(),
                trigger = transition.trigger.name(),
                state = self.current.name(),
                "machine entered error state"
            ),
            MachineStatus::Ready => {}
        }

        match outcome {
            Ok(()) => Ok(self.current.clone()),
            Err(source) => {
                tracing::warn!(
                    machine = %self.id,
                    from = transition.from.name(),
                    trigger = transition.trigger.name(),
                    to = transition.to.name(),
                    error = %source,
                    "transition action failed"
                );
                Err(TransitionError::Action {
                    from: transition.from.name().to_string(),
                    trigger: transition.trigger.name().to_string(),
                    to: transition.to.name().to_string(),
                    source,
                })
            }
        }
    }

    /// Capture the machine's state, config and history.
    ///
    /// The context is not part of the checkpoint; supply it again on
    /// [`Machine::resume`].
    pub fn checkpoint(&self) -> Checkpoint<S, T> {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            machine_id: self.id,
            timestamp: Utc::now(),
            initial_state: self.initial.clone(),
            current_state: self.current.clone(),
            sequence: self.sequence,
            config: self.config.clone(),
            history: self.history.clone(),
        }
    }

    /// Rebuild a machine from a checkpoint taken against an equivalent table.
    pub fn resume(
        table: &'t TransitionTable<S, T, C>,
        checkpoint: Checkpoint<S, T>,
        context: C,
    ) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        let state = &checkpoint.current_state;
        if !table.contains_state(state) && *state != checkpoint.initial_state {
            return Err(CheckpointError::ValidationFailed(format!(
                "state '{}' is not known to the transition table",
                state.name()
            )));
        }

        checkpoint
            .config
            .validate()
            .map_err(|e| CheckpointError::ValidationFailed(e.to_string()))?;
        tracing::debug!(
            machine = %checkpoint.machine_id,
            checkpoint = %checkpoint.id,
            state = state.name(),
            "machine resumed from checkpoint"
        );
        Ok(Self {
            id: checkpoint.machine_id,
            table,
            initial: checkpoint.initial_state,
            current: checkpoint.current_state,
            context,
            config: checkpoint.config,
            history: checkpoint.history,
            sequence: checkpoint.sequence,
        })
    }

    fn select(&self, trigger: &T) -> Option<&'t Rule<S, T, C>> {
        let table = self.table;
        table
            .rules_for(&self.current)
            .iter()
            .filter(|rule| rule.trigger() == trigger)
            .find(|rule| {
                let allowed = rule.allows(&self.context);
                if !allowed {
                    tracing::trace!(
                        machine = %self.id,
                        state = self.current.name(),
                        trigger = trigger.name(),
                        to = rule.to().name(),
                        "guard rejected rule"
                    );
                }
                allowed
            })
    }

    fn no_transition(&self, trigger: &T) -> TransitionError {
        TransitionError::NoTransition {
            state: self.current.name().to_string(),
            trigger: trigger.name().to_string(),
        }
    }
}

fn empty_history<S: State, T: Trigger>(config: &MachineConfig) -> StateHistory<S, T> {
    match config.history_limit {
        Some(limit) => StateHistory::with_limit(limit),
        None => StateHistory::new(),
    }
}
