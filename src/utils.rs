// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AccountKind, BalanceType, LedgerAccount};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// Render a signed running balance the way a statement prints it:
/// magnitude plus side, e.g. `13500.00 Dr` / `250.00 Cr`.
pub fn fmt_balance(d: &Decimal) -> String {
    format!("{:.2} {}", d.abs().round_dp(2), BalanceType::of(*d))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn account_by_name(conn: &Connection, name: &str) -> Result<LedgerAccount> {
    let (id, kind_raw, currency, opening_raw): (i64, String, String, String) = conn
        .query_row(
            "SELECT id, kind, currency, opening_balance FROM accounts WHERE name=?1",
            params![name],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .with_context(|| format!("Account '{}' not found", name))?;
    let kind = AccountKind::from_label(&kind_raw)
        .ok_or_else(|| anyhow!("Unknown account kind '{}' for {}", kind_raw, name))?;
    let opening_balance = opening_raw
        .parse::<Decimal>()
        .with_context(|| format!("Invalid opening balance '{}' for {}", opening_raw, name))?;
    Ok(LedgerAccount {
        id,
        name: name.to_string(),
        kind,
        currency,
        opening_balance,
    })
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
