// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Ledgerclip", "ledgerclip"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("ledgerclip.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        kind TEXT NOT NULL CHECK(kind IN ('customer','vendor','general')),
        currency TEXT NOT NULL,
        opening_balance TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS vouchers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        voucher_no TEXT NOT NULL,
        voucher_type TEXT NOT NULL,
        party TEXT,
        debit TEXT NOT NULL DEFAULT '0',
        credit TEXT NOT NULL DEFAULT '0',
        narration TEXT,
        line_items TEXT, -- JSON array, opaque to the accumulator
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_vouchers_account_date ON vouchers(account_id, date);
    "#,
    )?;
    Ok(())
}

/// Load the full canonical stream for an account, ordered by `(date, id)`.
/// Row ids ascend in insertion order, which is the tie-break the
/// accumulator expects on equal dates.
pub fn load_transactions(conn: &Connection, account_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, voucher_no, voucher_type, party, debit, credit, narration, line_items
         FROM vouchers WHERE account_id=?1 ORDER BY date, id",
    )?;
    let mut rows = stmt.query(params![account_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_raw: String = r.get(1)?;
        let voucher_no: String = r.get(2)?;
        let voucher_type: String = r.get(3)?;
        let party: Option<String> = r.get(4)?;
        let debit_raw: String = r.get(5)?;
        let credit_raw: String = r.get(6)?;
        let narration: Option<String> = r.get(7)?;
        let line_items_raw: Option<String> = r.get(8)?;

        let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid stored date '{}' for voucher {}", date_raw, id))?;
        let debit = debit_raw
            .parse::<Decimal>()
            .with_context(|| format!("Invalid stored debit '{}' for voucher {}", debit_raw, id))?;
        let credit = credit_raw.parse::<Decimal>().with_context(|| {
            format!("Invalid stored credit '{}' for voucher {}", credit_raw, id)
        })?;
        let line_items = match line_items_raw {
            Some(s) if !s.is_empty() => serde_json::from_str(&s)
                .with_context(|| format!("Invalid line items for voucher {}", id))?,
            _ => Vec::new(),
        };

        out.push(Transaction {
            id,
            date,
            voucher_no,
            voucher_type,
            party,
            debit,
            credit,
            narration,
            line_items,
        });
    }
    Ok(out)
}
