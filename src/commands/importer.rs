// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::normalize::{FieldMap, normalize};
use crate::utils::account_by_name;
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rusqlite::{Connection, params};
use serde_json::{Map, Value};
use std::fs;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("vouchers", sub)) => import_vouchers(conn, sub),
        _ => Ok(()),
    }
}

fn import_vouchers(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let source = sub.get_one::<String>("source").unwrap().trim();
    let account = account_by_name(conn, sub.get_one::<String>("account").unwrap().trim())?;
    let map = FieldMap::for_source(source)
        .ok_or_else(|| anyhow!("Unknown source '{}' (use standard|legacy)", source))?;

    let records = match fmt.as_str() {
        "csv" => read_csv_records(path)?,
        "json" => read_json_records(path)?,
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    };

    // Vendor ledgers are creditor-style: sides swap here so the stored
    // canonical rows share one convention.
    let normalized = normalize(&records, map, account.kind.is_creditor());
    for skip in &normalized.skipped {
        eprintln!("Skipped row {}: {}", skip.index + 1, skip.reason);
    }

    let tx = conn.transaction()?;
    for t in &normalized.transactions {
        let line_items = if t.line_items.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&t.line_items)?)
        };
        tx.execute(
            "INSERT INTO vouchers(account_id, date, voucher_no, voucher_type, party, debit, credit, narration, line_items)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
            params![
                account.id,
                t.date.to_string(),
                t.voucher_no,
                t.voucher_type,
                t.party,
                t.debit.to_string(),
                t.credit.to_string(),
                t.narration,
                line_items
            ],
        )?;
    }
    tx.commit()?;
    println!(
        "Imported {} vouchers into '{}' ({} skipped) from {}",
        normalized.transactions.len(),
        account.name,
        normalized.skipped.len(),
        path
    );
    Ok(())
}

fn read_csv_records(path: &str) -> Result<Vec<Map<String, Value>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        let mut obj = Map::new();
        for (header, value) in headers.iter().zip(rec.iter()) {
            obj.insert(header.to_string(), Value::String(value.to_string()));
        }
        records.push(obj);
    }
    Ok(records)
}

fn read_json_records(path: &str) -> Result<Vec<Map<String, Value>>> {
    let text = fs::read_to_string(path).with_context(|| format!("Open JSON {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Parse JSON records in {}", path))
}
