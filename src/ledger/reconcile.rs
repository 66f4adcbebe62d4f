// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AnnotatedTransaction, AuthoritativeSummary, LedgerSummary};
use rust_decimal::Decimal;

/// Agreement tolerance at currency scale.
fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMismatch {
    pub field: &'static str,
    pub authoritative: Decimal,
    pub local: Decimal,
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub summary: LedgerSummary,
    pub warnings: Vec<SummaryMismatch>,
}

/// Derive aggregate totals, preferring authoritative fields where supplied.
///
/// Upstream systems may compute summaries over a broader dataset than the
/// locally loaded window, so a present authoritative field always wins; the
/// local derivation is the fallback and the consistency check. Disagreement
/// beyond tolerance is a data-quality warning, never an error — the sums
/// themselves carry full precision, rounding happens only at presentation.
pub fn reconcile(
    annotated: &[AnnotatedTransaction],
    opening_balance: Decimal,
    authoritative: Option<&AuthoritativeSummary>,
) -> Reconciled {
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    for row in annotated {
        total_debit += row.tx.debit;
        total_credit += row.tx.credit;
    }
    let closing_balance = annotated
        .last()
        .map(|row| row.running_balance)
        .unwrap_or(opening_balance);

    let mut warnings = Vec::new();
    let summary = match authoritative {
        None => LedgerSummary {
            total_debit,
            total_credit,
            opening_balance,
            closing_balance,
        },
        Some(auth) => LedgerSummary {
            total_debit: resolve("total_debit", auth.total_debit, total_debit, &mut warnings),
            total_credit: resolve(
                "total_credit",
                auth.total_credit,
                total_credit,
                &mut warnings,
            ),
            opening_balance: resolve(
                "opening_balance",
                auth.opening_balance,
                opening_balance,
                &mut warnings,
            ),
            closing_balance: resolve(
                "closing_balance",
                auth.closing_balance,
                closing_balance,
                &mut warnings,
            ),
        },
    };
    Reconciled { summary, warnings }
}

fn resolve(
    field: &'static str,
    authoritative: Option<Decimal>,
    local: Decimal,
    warnings: &mut Vec<SummaryMismatch>,
) -> Decimal {
    match authoritative {
        Some(value) => {
            if (value - local).abs() > tolerance() {
                warnings.push(SummaryMismatch {
                    field,
                    authoritative: value,
                    local,
                });
            }
            value
        }
        None => local,
    }
}
