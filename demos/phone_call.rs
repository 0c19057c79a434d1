//! Telephone State Machine
//!
//! This example drives a telephone through its states.
//!
//! Key concepts:
//! - Closed state and trigger sets with display labels
//! - A guarded transition that reads the machine's context
//! - An action and an entry hook run after the transition commits
//! - A final state that halts the machine
//!
//! Run with: cargo run --example phone_call
//! Interactive menu: cargo run --example phone_call -- --interactive
//! Engine logs: RUST_LOG=switchyard=debug cargo run --example phone_call

use std::io::{self, BufRead, Write};
use switchyard::{
    build_table, state_enum, trigger_enum, Action, Guard, Machine, TransitionError,
    TransitionTable,
};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum PhoneState {
        OffHook => "off the hook",
        Connecting => "connecting",
        Connected => "connected",
        OnHold => "on hold",
        Destroyed => "destroyed",
    }
    final: [Destroyed]
}

trigger_enum! {
    enum PhoneTrigger {
        CallDialed => "call dialed",
        HungUp => "hung up",
        CallConnected => "call connected",
        PlacedOnHold => "placed on hold",
        TakenOffHold => "taken off hold",
        LeftMessage => "left message",
        PhoneThrownIntoWall => "phone thrown into wall",
    }
}

#[derive(Default)]
struct Owner {
    angry: bool,
}

fn phone_table() -> Result<TransitionTable<PhoneState, PhoneTrigger, Owner>, switchyard::BuildError>
{
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
            Some(Guard::new(|owner: &Owner| owner.angry)),
            Some(Action::infallible(|_, _| {
                println!("Phone breaks into a million pieces");
            })),
        )
        .on_entry(PhoneState::Connecting, |_, _| println!("We are connecting..."))
        .finalize()
}

fn report(result: Result<PhoneState, TransitionError>) {
    if let Err(e) = result {
        println!("  ! {e}");
    }
}

fn scripted(table: &TransitionTable<PhoneState, PhoneTrigger, Owner>) {
    let mut phone = Machine::new(table, PhoneState::OffHook);
    let info = |phone: &Machine<PhoneState, PhoneTrigger, Owner>| {
        println!("The phone is currently {}", phone.current_state());
    };

    info(&phone);
    for trigger in [
        PhoneTrigger::CallDialed,
        PhoneTrigger::CallConnected,
        PhoneTrigger::PlacedOnHold,
        PhoneTrigger::PhoneThrownIntoWall,
    ] {
        println!("-> {trigger}");
        report(phone.fire(trigger));
        info(&phone);
    }

    println!("(the owner gets angry)");
    phone.context_mut().angry = true;
    println!("-> {}", PhoneTrigger::PhoneThrownIntoWall);
    report(phone.fire(PhoneTrigger::PhoneThrownIntoWall));
    info(&phone);

    println!("-> {}", PhoneTrigger::CallDialed);
    report(phone.fire(PhoneTrigger::CallDialed));
}

fn interactive(table: &TransitionTable<PhoneState, PhoneTrigger, Owner>) -> io::Result<()> {
    let mut phone = Machine::new(table, PhoneState::OffHook);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("The phone is currently {}", phone.current_state());
        if phone.is_halted() {
            break;
        }

        let menu = phone.permitted_triggers();
        println!("Select a trigger (a = toggle anger, q = quit):");
        for (i, trigger) in menu.iter().enumerate() {
            println!("{i}. {trigger}");
        }
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        match line.trim() {
            "q" => break,
            "a" => {
                let owner = phone.context_mut();
                owner.angry = !owner.angry;
                println!("angry: {}", owner.angry);
            }
            choice => match choice.parse::<usize>().ok().and_then(|i| menu.get(i)) {
                Some(trigger) => report(phone.fire(**trigger)),
                None => println!("Incorrect option. Please try again."),
            },
        }
    }

    println!("We are done using the phone.");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Telephone State Machine ===\n");

    let table = match phone_table() {
        Ok(table) => table,
        Err(e) => {
            eprintln!("invalid phone table: {e}");
            std::process::exit(1);
        }
    };

    if std::env::args().any(|arg| arg == "--interactive") {
        if let Err(e) = interactive(&table) {
            eprintln!("input error: {e}");
            std::process::exit(1);
        }
    } else {
        scripted(&table);
    }

    println!("\n=== Example Complete ===");
}
