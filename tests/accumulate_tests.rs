// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerclip::ledger::accumulate::{LedgerError, accumulate};
use ledgerclip::models::{BalanceType, Transaction};
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, date: &str, no: &str, ty: &str, debit: &str, credit: &str) -> Transaction {
    Transaction {
        id,
        date: d(date),
        voucher_no: no.to_string(),
        voucher_type: ty.to_string(),
        party: None,
        debit: dec(debit),
        credit: dec(credit),
        narration: None,
        line_items: Vec::new(),
    }
}

fn worked_scenario() -> Vec<Transaction> {
    vec![
        tx(1, "2025-04-01", "INV-1", "Invoice", "10000", "0"),
        tx(2, "2025-04-05", "PAY-1", "Payment", "0", "5000"),
        tx(3, "2025-04-10", "RET-1", "Return", "0", "1000"),
        tx(4, "2025-04-15", "INV-2", "Invoice", "7500", "0"),
        tx(5, "2025-04-20", "PAY-2", "Payment", "0", "3000"),
    ]
}

#[test]
fn worked_scenario_running_balances() {
    let annotated = accumulate(&worked_scenario(), dec("5000")).unwrap();
    let balances: Vec<String> = annotated
        .iter()
        .map(|r| format!("{} {}", r.running_balance, r.balance_type))
        .collect();
    assert_eq!(
        balances,
        vec!["15000 Dr", "10000 Dr", "9000 Dr", "16500 Dr", "13500 Dr"]
    );
}

#[test]
fn empty_stream_yields_empty_annotation() {
    let annotated = accumulate(&[], dec("5000")).unwrap();
    assert!(annotated.is_empty());
}

#[test]
fn negative_balance_classified_cr() {
    let rows = vec![
        tx(1, "2025-01-01", "PAY-1", "Payment", "0", "500"),
        tx(2, "2025-01-02", "INV-1", "Invoice", "200", "0"),
    ];
    let annotated = accumulate(&rows, Decimal::ZERO).unwrap();
    assert_eq!(annotated[0].running_balance, dec("-500"));
    assert_eq!(annotated[0].balance_type, BalanceType::Cr);
    assert_eq!(annotated[1].running_balance, dec("-300"));
    assert_eq!(annotated[1].balance_type, BalanceType::Cr);
}

#[test]
fn debit_and_credit_on_one_row_are_independent() {
    let rows = vec![tx(1, "2025-01-01", "JNL-1", "Journal", "100", "40")];
    let annotated = accumulate(&rows, Decimal::ZERO).unwrap();
    assert_eq!(annotated[0].running_balance, dec("60"));
}

#[test]
fn equal_dates_keep_caller_order() {
    let rows = vec![
        tx(7, "2025-02-01", "INV-7", "Invoice", "100", "0"),
        tx(3, "2025-02-01", "PAY-3", "Payment", "0", "30"),
        tx(9, "2025-02-01", "INV-9", "Invoice", "50", "0"),
    ];
    let annotated = accumulate(&rows, Decimal::ZERO).unwrap();
    let ids: Vec<i64> = annotated.iter().map(|r| r.tx.id).collect();
    assert_eq!(ids, vec![7, 3, 9]);
    assert_eq!(annotated[2].running_balance, dec("120"));
}

#[test]
fn unsorted_input_rejected() {
    let rows = vec![
        tx(1, "2025-03-10", "INV-1", "Invoice", "100", "0"),
        tx(2, "2025-03-01", "PAY-1", "Payment", "0", "50"),
    ];
    let err = accumulate(&rows, Decimal::ZERO).unwrap_err();
    assert_eq!(err, LedgerError::UnsortedInput { position: 1 });
}

#[test]
fn opening_typed_row_is_not_double_counted() {
    // An upstream "Opening" voucher participates like any other row; the
    // opening balance itself is seeded exactly once.
    let rows = vec![
        tx(1, "2025-01-01", "OP-1", "Opening", "1000", "0"),
        tx(2, "2025-01-05", "INV-1", "Invoice", "500", "0"),
    ];
    let annotated = accumulate(&rows, Decimal::ZERO).unwrap();
    assert_eq!(annotated[0].running_balance, dec("1000"));
    assert_eq!(annotated[1].running_balance, dec("1500"));
}

#[test]
fn rerun_is_idempotent() {
    let rows = worked_scenario();
    let first = accumulate(&rows, dec("5000")).unwrap();
    let second = accumulate(&rows, dec("5000")).unwrap();
    assert_eq!(first, second);
}
