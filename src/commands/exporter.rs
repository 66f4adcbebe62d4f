// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::accumulate::accumulate;
use crate::utils::account_by_name;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("statement", sub)) => export_statement(conn, sub),
        _ => Ok(()),
    }
}

fn export_statement(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let account = account_by_name(conn, sub.get_one::<String>("account").unwrap().trim())?;

    let transactions = db::load_transactions(conn, account.id)?;
    let annotated = accumulate(&transactions, account.opening_balance)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "voucher_no",
                "voucher_type",
                "party",
                "debit",
                "credit",
                "running_balance",
                "balance_type",
                "narration",
            ])?;
            for row in &annotated {
                wtr.write_record([
                    row.tx.date.to_string(),
                    row.tx.voucher_no.clone(),
                    row.tx.voucher_type.clone(),
                    row.tx.party.clone().unwrap_or_default(),
                    row.tx.debit.to_string(),
                    row.tx.credit.to_string(),
                    row.running_balance.to_string(),
                    row.balance_type.to_string(),
                    row.tx.narration.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&annotated)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported statement for '{}' to {}", account.name, out);
    Ok(())
}
