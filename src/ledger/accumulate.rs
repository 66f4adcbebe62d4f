// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AnnotatedTransaction, BalanceType, Transaction};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("transactions not sorted by date at position {position}")]
    UnsortedInput { position: usize },
}

/// Annotate a date-ordered transaction stream with running balances.
///
/// One O(n) forward pass: `balance += debit - credit`, seeded with the
/// opening balance exactly once. The input must be the FULL canonical set
/// for the account; any filtered view is a projection over the returned
/// rows, never an alternative input to this pass. A missing opening
/// balance is the caller passing zero, not an error.
///
/// Ties on equal dates are whatever order the caller sequenced; sorting is
/// the normalizer's (or loader's) job because the correct tie-break depends
/// on source-specific sequencing this pass must not guess. Input that is
/// not date-ascending is a caller bug and is rejected.
pub fn accumulate(
    transactions: &[Transaction],
    opening_balance: Decimal,
) -> Result<Vec<AnnotatedTransaction>, LedgerError> {
    if let Some(position) = first_disorder(transactions) {
        return Err(LedgerError::UnsortedInput { position });
    }

    let mut balance = opening_balance;
    let mut annotated = Vec::with_capacity(transactions.len());
    for tx in transactions {
        balance += tx.debit - tx.credit;
        annotated.push(AnnotatedTransaction {
            tx: tx.clone(),
            running_balance: balance,
            balance_type: BalanceType::of(balance),
        });
    }
    Ok(annotated)
}

fn first_disorder(transactions: &[Transaction]) -> Option<usize> {
    transactions
        .windows(2)
        .position(|pair| pair[1].date < pair[0].date)
        .map(|i| i + 1)
}
