//! End-to-end scenarios on the telephone model.

mod common;

use common::{basic_table, full_table, Phone, PhoneState, PhoneTrigger};
use switchyard::{Checkpoint, Machine, MachineStatus, TransitionError};

#[test]
fn call_goes_on_and_off_hold() {
    let table = basic_table();
    let mut phone = Machine::new(&table, PhoneState::OffHook);

    for trigger in [
        PhoneTrigger::CallDialed,
        PhoneTrigger::CallConnected,
        PhoneTrigger::PlacedOnHold,
        PhoneTrigger::TakenOffHold,
    ] {
        phone.fire(trigger).unwrap();
    }

    assert_eq!(phone.current_state(), &PhoneState::Connected);
    assert_eq!(phone.history().len(), 4);
}

#[test]
fn hold_while_off_hook_is_rejected() {
    let table = basic_table();
    let mut phone = Machine::new(&table, PhoneState::OffHook);

    let err = phone.fire(PhoneTrigger::PlacedOnHold).unwrap_err();

    assert!(matches!(err, TransitionError::NoTransition { .. }));
    assert_eq!(
        err.to_string(),
        "No transition from state 'OffHook' on trigger 'PlacedOnHold'"
    );
    assert_eq!(phone.current_state(), &PhoneState::OffHook);
}

#[test]
fn permitted_triggers_list_the_menu() {
    let table = full_table();
    let mut phone = Machine::new(&table, PhoneState::OffHook);
    phone.fire(PhoneTrigger::CallDialed).unwrap();
    phone.fire(PhoneTrigger::CallConnected).unwrap();

    let menu: Vec<String> = phone
        .permitted_triggers()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(menu, vec!["left message", "hung up", "placed on hold"]);
}

#[test]
fn angry_owner_destroys_phone() {
    let table = full_table();
    let mut phone = Machine::new(&table, PhoneState::OffHook);

    phone.fire(PhoneTrigger::CallDialed).unwrap();
    phone.fire(PhoneTrigger::CallConnected).unwrap();
    phone.fire(PhoneTrigger::PlacedOnHold).unwrap();

    let calm = phone.fire(PhoneTrigger::PhoneThrownIntoWall);
    assert!(matches!(calm, Err(TransitionError::NoTransition { .. })));
    assert_eq!(phone.current_state(), &PhoneState::OnHold);

    phone.context_mut().angry = true;
    phone.fire(PhoneTrigger::PhoneThrownIntoWall).unwrap();
    assert_eq!(phone.current_state().to_string(), "destroyed");
    assert_eq!(phone.status(), MachineStatus::Halted);

    let after = phone.fire(PhoneTrigger::CallDialed);
    assert!(matches!(after, Err(TransitionError::NoTransition { .. })));

    let phone: Phone = phone.into_context();
    assert_eq!(
        phone.events,
        vec!["we are connecting", "phone breaks into a million pieces"]
    );
}

#[test]
fn entry_hook_runs_on_every_entry() {
    let table = full_table();
    let mut phone = Machine::new(&table, PhoneState::OffHook);

    phone.fire(PhoneTrigger::CallDialed).unwrap();
    phone.fire(PhoneTrigger::HungUp).unwrap();
    phone.fire(PhoneTrigger::CallDialed).unwrap();

    assert_eq!(phone.context().events.len(), 2);
}

#[test]
fn checkpoint_survives_binary_roundtrip() {
    let table = full_table();
    let mut phone = Machine::new(&table, PhoneState::OffHook);
    phone.fire(PhoneTrigger::CallDialed).unwrap();
    phone.fire(PhoneTrigger::CallConnected).unwrap();

    let bytes = phone.checkpoint().to_bytes().unwrap();
    let checkpoint = Checkpoint::from_bytes(&bytes).unwrap();
    let mut resumed = Machine::resume(&table, checkpoint, Phone::default()).unwrap();

    assert_eq!(resumed.current_state(), &PhoneState::Connected);
    resumed.fire(PhoneTrigger::PlacedOnHold).unwrap();
    let path: Vec<&PhoneState> = resumed.history().get_path();
    assert_eq!(
        path,
        vec![
            &PhoneState::OffHook,
            &PhoneState::Connecting,
            &PhoneState::Connected,
            &PhoneState::OnHold,
        ]
    );
}

#[test]
fn one_table_backs_machines_on_many_threads() {
    let table = basic_table();

    let finals: Vec<PhoneState> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let table = &table;
                scope.spawn(move || {
                    let mut phone = Machine::new(table, PhoneState::OffHook);
                    phone.fire(PhoneTrigger::CallDialed).unwrap();
                    phone.fire(PhoneTrigger::CallConnected).unwrap();
                    for _ in 0..n {
                        phone.fire(PhoneTrigger::PlacedOnHold).unwrap();
                        phone.fire(PhoneTrigger::TakenOffHold).unwrap();
                    }
                    if n % 2 == 1 {
                        phone.fire(PhoneTrigger::PlacedOnHold).unwrap();
                    }
                    *phone.current_state()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        finals,
        vec![
            PhoneState::Connected,
            PhoneState::OnHold,
            PhoneState::Connected,
            PhoneState::OnHold,
        ]
    );
}
