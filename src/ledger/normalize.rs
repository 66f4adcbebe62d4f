// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{LineItem, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Explicit per-source alias table: each canonical field lists the upstream
/// names that may carry it, first match wins. Upstream endpoints name the
/// same concept differently; keeping the mapping here keeps the accumulator
/// source-agnostic.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub source: &'static str,
    pub id: &'static [&'static str],
    pub date: &'static [&'static str],
    pub voucher_no: &'static [&'static str],
    pub voucher_type: &'static [&'static str],
    pub party: &'static [&'static str],
    pub debit: &'static [&'static str],
    pub credit: &'static [&'static str],
    pub narration: &'static [&'static str],
    pub line_items: &'static [&'static str],
}

/// Our own export headers.
pub static STANDARD: FieldMap = FieldMap {
    source: "standard",
    id: &["id"],
    date: &["date"],
    voucher_no: &["voucher_no"],
    voucher_type: &["voucher_type"],
    party: &["party"],
    debit: &["debit"],
    credit: &["credit"],
    narration: &["narration"],
    line_items: &["line_items"],
};

/// The older dashboard endpoints: `vch_*` names, `party_name`, epoch dates.
pub static LEGACY: FieldMap = FieldMap {
    source: "legacy",
    id: &["id", "entry_id"],
    date: &["date", "vch_date", "entry_date"],
    voucher_no: &["vch_no", "voucher_no"],
    voucher_type: &["vch_type", "voucher_type"],
    party: &["party_name", "ledger_name", "party"],
    debit: &["dr_amount", "debit"],
    credit: &["cr_amount", "credit"],
    narration: &["narration", "remarks"],
    line_items: &["items", "item_details"],
};

impl FieldMap {
    pub fn for_source(name: &str) -> Option<&'static FieldMap> {
        match name.to_lowercase().as_str() {
            "standard" => Some(&STANDARD),
            "legacy" => Some(&LEGACY),
            _ => None,
        }
    }

    fn pick<'a>(&self, record: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
        aliases
            .iter()
            .find_map(|key| record.get(*key))
            .filter(|v| !v.is_null())
    }
}

#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRow>,
}

/// Map heterogeneous upstream records into canonical transactions, sorted
/// ascending by date with input order as the tie-break.
///
/// Rows with an unparseable date or amount are skipped and reported, never
/// zeroed and never fatal; missing amounts coerce to zero. `swap_sides`
/// exchanges debit and credit for creditor-style ledgers so the accumulator
/// sees one convention.
pub fn normalize(records: &[Map<String, Value>], map: &FieldMap, swap_sides: bool) -> Normalized {
    let mut transactions = Vec::new();
    let mut skipped = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match normalize_record(record, map, swap_sides, index) {
            Ok(tx) => transactions.push(tx),
            Err(reason) => skipped.push(SkippedRow { index, reason }),
        }
    }
    // Stable sort: equal dates keep input order.
    transactions.sort_by_key(|tx| tx.date);
    Normalized {
        transactions,
        skipped,
    }
}

fn normalize_record(
    record: &Map<String, Value>,
    map: &FieldMap,
    swap_sides: bool,
    index: usize,
) -> Result<Transaction, String> {
    let date = match map.pick(record, map.date) {
        Some(v) => parse_raw_date(v).ok_or_else(|| format!("invalid date '{}'", compact(v)))?,
        None => return Err("missing date".to_string()),
    };

    let mut debit = parse_raw_amount(map.pick(record, map.debit), "debit")?;
    let mut credit = parse_raw_amount(map.pick(record, map.credit), "credit")?;
    if swap_sides {
        std::mem::swap(&mut debit, &mut credit);
    }

    let id = map
        .pick(record, map.id)
        .and_then(Value::as_i64)
        .unwrap_or(index as i64 + 1);
    let voucher_no = raw_string(map.pick(record, map.voucher_no)).unwrap_or_default();
    let voucher_type = raw_string(map.pick(record, map.voucher_type)).unwrap_or_default();
    let party = raw_string(map.pick(record, map.party));
    let narration = raw_string(map.pick(record, map.narration));
    let line_items: Vec<LineItem> = map
        .pick(record, map.line_items)
        .filter(|v| v.is_array())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    Ok(Transaction {
        id,
        date,
        voucher_no,
        voucher_type,
        party,
        debit,
        credit,
        narration,
        line_items,
    })
}

/// Dates arrive as ISO/dotted strings or integer epoch seconds/milliseconds.
fn parse_raw_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            let date_part = s.split_once('T').map(|(d, _)| d).unwrap_or(s);
            for fmt in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"] {
                if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
                    return Some(d);
                }
            }
            None
        }
        Value::Number(n) => {
            let raw = n.as_i64()?;
            // Anything past ~5138 CE in seconds must be milliseconds.
            let secs = if raw.abs() >= 100_000_000_000 {
                raw / 1000
            } else {
                raw
            };
            chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
        }
        _ => None,
    }
}

fn parse_raw_amount(value: Option<&Value>, side: &str) -> Result<Decimal, String> {
    let amount = match value {
        None => Decimal::ZERO,
        Some(Value::String(s)) if s.trim().is_empty() => Decimal::ZERO,
        Some(Value::String(s)) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| format!("invalid {} amount '{}'", side, s.trim()))?,
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                let f = n.as_f64().ok_or_else(|| format!("invalid {} amount '{}'", side, n))?;
                Decimal::try_from(f).map_err(|_| format!("invalid {} amount '{}'", side, n))?
            }
        }
        Some(other) => return Err(format!("invalid {} amount '{}'", side, compact(other))),
    };
    if amount < Decimal::ZERO {
        return Err(format!("negative {} amount '{}'", side, amount));
    }
    Ok(amount)
}

fn raw_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn compact(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
