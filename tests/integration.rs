use std::{str::from_utf8, sync::Arc};

use chrono::NaiveDate;
use cute_atm::{
    bin_utils::Service,
    clock::ManualClock,
    ledger::{Ledger, default_seed, in_memory_ledger::InMemoryLedger},
};
use rust_decimal::dec;

fn ledger() -> InMemoryLedger {
    let clock = ManualClock::new(
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 15)
            .unwrap(),
    );
    InMemoryLedger::new(default_seed(), Arc::new(clock)).unwrap()
}

fn run(ledger: &InMemoryLedger, script: &str) -> String {
    let mut output = Vec::new();
    let service = Service {
        ledger,
        input: script.as_bytes(),
        output: &mut output,
        statement_size: 5,
    };
    service.run().unwrap();
    from_utf8(&output).unwrap().to_owned()
}

#[test]
fn scripted_session() {
    let ledger = ledger();
    let script = [
        "1", "1001", "1234", // login
        "1",    // balance
        "2", "250.5", // deposit
        "3", "5000", // overdraw
        "4", "1002", "100", // transfer
        "4", "9999", // unknown target
        "4", "1001", "50", // self transfer
        "2", "abc", // bad amount
        "9",    // unknown option
        "5",    // mini statement
        "6", "12", // short pin
        "6", "5555", // new pin
        "7",    // logout
        "1", "1001", "1234", // old pin no longer works
        "1", "1001", "5555", "7", "2",
    ]
    .join("\n");
    let output = run(&ledger, &script);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "=== Welcome to Simple ATM ===");
    for expected in [
        "Your Balance: 1000.00",
        "Deposited successfully.",
        "Error: Insufficient funds",
        "Transfer successful.",
        "No such account.",
        "Error: Cannot transfer to the same account",
        "Error: `abc` is not a valid amount",
        "Invalid option.",
        "Last transactions:",
        "2024-06-01 09:30 | Account Opened | 1000.00 | Balance: 1000.00 | ",
        "2024-06-01 09:30 | Deposit | 250.50 | Balance: 1250.50 | ",
        "2024-06-01 09:30 | Transfer Out | 100.00 | Balance: 1150.50 | To 1002",
        "Error: PIN must be at least 4 digits",
        "PIN changed successfully.",
        "Logged out.",
        "Invalid account number or PIN.",
        "Thank you for using Simple ATM. Goodbye!",
    ] {
        // prompts are not followed by a newline, so answers share their line
        assert!(
            lines.iter().any(|l| l.ends_with(expected)),
            "missing `{expected}` in:\n{output}"
        );
    }
    assert_eq!(
        lines
            .iter()
            .filter(|l| l.ends_with("Login successful."))
            .count(),
        2
    );

    let source = ledger.lookup("1001").unwrap();
    let dest = ledger.lookup("1002").unwrap();
    assert_eq!(source.balance(), dec!(1150.50));
    assert_eq!(dest.balance(), dec!(600));
    assert!(source.check_pin("5555"));
    assert_eq!(
        dest.transactions().last().unwrap().to_string(),
        "2024-06-01 09:30 | Transfer In | 100.00 | Balance: 600.00 | From 1001"
    );
}

#[test]
fn end_of_input_stops_cleanly() {
    let ledger = ledger();
    let output = run(&ledger, "1\n1002\n2222\n2\n");
    assert!(output.contains("Login successful."));
    assert!(output.ends_with("Amount to deposit: "));
    assert_eq!(ledger.lookup("1002").unwrap().transactions().len(), 1);

    let output = run(&ledger, "");
    assert_eq!(output, "=== Welcome to Simple ATM ===\n\n1) Login  2) Exit\n");
}

#[test]
fn unknown_start_choice() {
    let ledger = ledger();
    let output = run(&ledger, "x\n2\n");
    assert!(output.lines().any(|l| l == "Invalid choice."));
    assert!(output.ends_with("Goodbye!\n"));
}

#[test]
fn oversized_and_sub_cent_amounts_are_reported() {
    let ledger = ledger();
    let script = [
        "1", "1001", "1234", //
        "2", "79228162514264337593543950335", // past the largest balance
        "2", "0.001", // below one cent
        "4", "1002", "79228162514264337593543950335", //
        "7", "2",
    ]
    .join("\n");
    let output = run(&ledger, &script);
    let lines: Vec<&str> = output.lines().collect();
    let overflows = lines
        .iter()
        .filter(|l| {
            l.ends_with("Error: Amount would exceed the largest balance an account can hold")
                || l.ends_with("Error: Insufficient funds")
        })
        .count();
    assert_eq!(overflows, 2, "{output}");
    assert!(
        lines
            .iter()
            .any(|l| l.ends_with("Error: Amount must be positive, in whole cents")),
        "{output}"
    );
    assert!(output.ends_with("Goodbye!\n"));

    for (id, balance) in [("1001", dec!(1000)), ("1002", dec!(500))] {
        let acc = ledger.lookup(id).unwrap();
        assert_eq!(acc.balance(), balance);
        assert_eq!(acc.transactions().len(), 1);
    }
}
