//! The telephone model shared by the integration tests.

use switchyard::{build_table, state_enum, trigger_enum, Action, Guard, TransitionTable};

state_enum! {
    pub enum PhoneState {
        OffHook => "off the hook",
        Connecting => "connecting",
        Connected => "connected",
        OnHold => "on hold",
        Destroyed => "destroyed",
    }
    final: [Destroyed]
}

trigger_enum! {
    pub enum PhoneTrigger {
        CallDialed => "call dialed",
        HungUp => "hung up",
        CallConnected => "call connected",
        PlacedOnHold => "placed on hold",
        TakenOffHold => "taken off hold",
        LeftMessage => "left message",
        PhoneThrownIntoWall => "phone thrown into wall",
    }
}

#[derive(Debug, Default)]
pub struct Phone {
    pub angry: bool,
    pub events: Vec<String>,
}

/// The four-rule table from the basic scenario.
pub fn basic_table() -> TransitionTable<PhoneState, PhoneTrigger> {
    build_table()
        .add_rule(
            PhoneState::OffHook,
            PhoneTrigger::CallDialed,
            PhoneState::Connecting,
        )
        .add_rule(
            PhoneState::Connecting,
            PhoneTrigger::CallConnected,
            PhoneState::Connected,
        )
        .add_rule(
            PhoneState::Connected,
            PhoneTrigger::PlacedOnHold,
            PhoneState::OnHold,
        )
        .add_rule(
            PhoneState::OnHold,
            PhoneTrigger::TakenOffHold,
            PhoneState::Connected,
        )
        .finalize()
        .expect("basic phone table is valid")
}

/// Full telephone: hang-ups, messages, and a phone that can be destroyed
/// when its owner is angry.
pub fn full_table() -> TransitionTable<PhoneState, PhoneTrigger, Phone> {
    build_table()
        .add_rule(
            PhoneState::OffHook,
            PhoneTrigger::CallDialed,
            PhoneState::Connecting,
        )
        .add_rule(
            PhoneState::Connecting,
            PhoneTrigger::HungUp,
            PhoneState::OffHook,
        )
        .add_rule(
            PhoneState::Connecting,
            PhoneTrigger::CallConnected,
            PhoneState::Connected,
        )
        .add_rule(
            PhoneState::Connected,
            PhoneTrigger::LeftMessage,
            PhoneState::OffHook,
        )
        .add_rule(
            PhoneState::Connected,
            PhoneTrigger::HungUp,
            PhoneState::OffHook,
        )
        .add_rule(
            PhoneState::Connected,
            PhoneTrigger::PlacedOnHold,
            PhoneState::OnHold,
        )
        .add_rule(
            PhoneState::OnHold,
            PhoneTrigger::TakenOffHold,
            PhoneState::Connected,
        )
        .add_rule(PhoneState::OnHold, PhoneTrigger::HungUp, PhoneState::OffHook)
        .add_rule_with(
            PhoneState::OnHold,
            PhoneTrigger::PhoneThrownIntoWall,
            PhoneState::Destroyed,
            Some(Guard::new(|phone: &Phone| phone.angry)),
            Some(Action::infallible(|_, phone: &mut Phone| {
                phone.events.push("phone breaks into a million pieces".to_string());
            })),
        )
        .on_entry(PhoneState::Connecting, |_, phone: &mut Phone| {
            phone.events.push("we are connecting".to_string());
        })
        .finalize()
        .expect("full phone table is valid")
}
