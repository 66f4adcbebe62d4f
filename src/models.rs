// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Customer,
    Vendor,
    General,
}

impl AccountKind {
    pub fn from_label(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(Self::Customer),
            "vendor" => Some(Self::Vendor),
            "general" => Some(Self::General),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::General => "general",
        }
    }

    /// Creditor-style ledgers have debit/credit swapped at normalization,
    /// so the accumulator stays convention-agnostic.
    pub fn is_creditor(&self) -> bool {
        matches!(self, Self::Vendor)
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerAccount {
    pub id: i64,
    pub name: String,
    pub kind: AccountKind,
    pub currency: String,
    pub opening_balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub value: Decimal,
}

/// A canonical ledger row. Both `debit` and `credit` are non-negative;
/// conventionally only one is non-zero per row, but the accumulator treats
/// them independently and does not forbid both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub voucher_no: String,
    pub voucher_type: String,
    pub party: Option<String>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub narration: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceType {
    Dr,
    Cr,
}

impl BalanceType {
    /// Debtor-ledger convention: a non-negative balance sits on the debit side.
    pub fn of(balance: Decimal) -> Self {
        if balance >= Decimal::ZERO {
            Self::Dr
        } else {
            Self::Cr
        }
    }
}

impl std::fmt::Display for BalanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dr => write!(f, "Dr"),
            Self::Cr => write!(f, "Cr"),
        }
    }
}

/// A transaction plus its running balance. Produced once per accumulation
/// pass and re-derived in full whenever the input stream changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedTransaction {
    #[serde(flatten)]
    pub tx: Transaction,
    pub running_balance: Decimal,
    pub balance_type: BalanceType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
}

impl LedgerSummary {
    pub fn closing_type(&self) -> BalanceType {
        BalanceType::of(self.closing_balance)
    }
}

/// Partial summary supplied by an upstream source of record. Present
/// fields win over local recomputation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoritativeSummary {
    pub total_debit: Option<Decimal>,
    pub total_credit: Option<Decimal>,
    pub opening_balance: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeCount {
    pub counts: BTreeMap<String, u64>,
    pub total: u64,
}

/// Read-only predicate descriptor. Applying it selects from the annotated
/// stream; it never mutates or re-derives what it filters.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub voucher_type: Option<String>,
    pub voucher_no: Option<String>,
    pub free_text: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

impl Page {
    /// Size 0 disables pagination.
    pub fn all() -> Self {
        Page { index: 0, size: 0 }
    }
}
