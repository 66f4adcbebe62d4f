// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerclip::ledger::accumulate::accumulate;
use ledgerclip::ledger::reconcile::reconcile;
use ledgerclip::models::{AuthoritativeSummary, BalanceType, Transaction};
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
fn worked_scenario_summary() {
    let annotated = accumulate(&worked_scenario(), dec("5000")).unwrap();
    let reconciled = reconcile(&annotated, dec("5000"), None);
    let s = &reconciled.summary;
    assert_eq!(s.total_debit, dec("17500"));
    assert_eq!(s.total_credit, dec("9000"));
    assert_eq!(s.opening_balance, dec("5000"));
    assert_eq!(s.closing_balance, dec("13500"));
    assert_eq!(s.closing_type(), BalanceType::Dr);
    assert!(reconciled.warnings.is_empty());
}

#[test]
fn local_derivation_is_consistent() {
    let annotated = accumulate(&worked_scenario(), dec("5000")).unwrap();
    let s = reconcile(&annotated, dec("5000"), None).summary;
    assert_eq!(s.closing_balance, annotated.last().unwrap().running_balance);
    assert_eq!(
        s.total_debit - s.total_credit,
        s.closing_balance - s.opening_balance
    );
}

#[test]
fn empty_stream_collapses_to_opening_balance() {
    let reconciled = reconcile(&[], dec("5000"), None);
    let s = &reconciled.summary;
    assert_eq!(s.total_debit, Decimal::ZERO);
    assert_eq!(s.total_credit, Decimal::ZERO);
    assert_eq!(s.opening_balance, dec("5000"));
    assert_eq!(s.closing_balance, dec("5000"));
}

#[test]
fn authoritative_fields_win_exactly() {
    let annotated = accumulate(&worked_scenario(), dec("5000")).unwrap();
    let auth = AuthoritativeSummary {
        total_debit: Some(dec("18000")),
        closing_balance: Some(dec("14000")),
        ..Default::default()
    };
    let reconciled = reconcile(&annotated, dec("5000"), Some(&auth));
    let s = &reconciled.summary;
    assert_eq!(s.total_debit, dec("18000"));
    assert_eq!(s.closing_balance, dec("14000"));
    // Unsupplied fields fall back to the local derivation.
    assert_eq!(s.total_credit, dec("9000"));
    assert_eq!(s.opening_balance, dec("5000"));
}

#[test]
fn disagreement_beyond_tolerance_warns() {
    let annotated = accumulate(&worked_scenario(), dec("5000")).unwrap();
    let auth = AuthoritativeSummary {
        total_debit: Some(dec("18000")),
        ..Default::default()
    };
    let reconciled = reconcile(&annotated, dec("5000"), Some(&auth));
    assert_eq!(reconciled.warnings.len(), 1);
    let w = &reconciled.warnings[0];
    assert_eq!(w.field, "total_debit");
    assert_eq!(w.authoritative, dec("18000"));
    assert_eq!(w.local, dec("17500"));
}

#[test]
fn disagreement_within_tolerance_is_silent() {
    let annotated = accumulate(&worked_scenario(), dec("5000")).unwrap();
    let auth = AuthoritativeSummary {
        total_debit: Some(dec("17500.01")),
        ..Default::default()
    };
    let reconciled = reconcile(&annotated, dec("5000"), Some(&auth));
    assert!(reconciled.warnings.is_empty());
    // The authoritative value still wins even when it agrees.
    assert_eq!(reconciled.summary.total_debit, dec("17500.01"));
}
