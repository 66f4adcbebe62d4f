// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{account_by_name, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account = account_by_name(conn, sub.get_one::<String>("account").unwrap().trim())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let voucher_no = sub.get_one::<String>("no").unwrap().trim().to_string();
    let voucher_type = sub.get_one::<String>("type").unwrap().trim().to_string();
    let party = sub
        .get_one::<String>("party")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let debit = match sub.get_one::<String>("debit") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => Decimal::ZERO,
    };
    let credit = match sub.get_one::<String>("credit") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => Decimal::ZERO,
    };
    if debit < Decimal::ZERO || credit < Decimal::ZERO {
        return Err(anyhow!(
            "Amounts must be non-negative (got debit {}, credit {})",
            debit,
            credit
        ));
    }
    let narration = sub
        .get_one::<String>("narration")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    conn.execute(
        "INSERT INTO vouchers(account_id, date, voucher_no, voucher_type, party, debit, credit, narration)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            account.id,
            date.to_string(),
            voucher_no,
            voucher_type,
            party,
            debit.to_string(),
            credit.to_string(),
            narration
        ],
    )?;
    println!(
        "Recorded {} {} on {} ({} Dr / {} Cr) in '{}'",
        voucher_type, voucher_no, date, debit, credit, account.name
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.voucher_no.clone(),
                    r.voucher_type.clone(),
                    r.party.clone(),
                    r.debit.clone(),
                    r.credit.clone(),
                    r.narration.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Vch No", "Type", "Party", "Debit", "Credit", "Narration"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct VoucherRow {
    pub date: String,
    pub voucher_no: String,
    pub voucher_type: String,
    pub party: String,
    pub debit: String,
    pub credit: String,
    pub narration: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<VoucherRow>> {
    let account = account_by_name(conn, sub.get_one::<String>("account").unwrap().trim())?;
    let mut sql = String::from(
        "SELECT date, voucher_no, voucher_type, party, debit, credit, narration
         FROM vouchers WHERE account_id=? ORDER BY date DESC, id DESC",
    );
    if sub.get_one::<usize>("limit").is_some() {
        sql.push_str(" LIMIT ?");
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = match sub.get_one::<usize>("limit") {
        Some(limit) => stmt.query(params![account.id, *limit as i64])?,
        None => stmt.query(params![account.id])?,
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let voucher_no: String = r.get(1)?;
        let voucher_type: String = r.get(2)?;
        let party: Option<String> = r.get(3)?;
        let debit: String = r.get(4)?;
        let credit: String = r.get(5)?;
        let narration: Option<String> = r.get(6)?;
        data.push(VoucherRow {
            date,
            voucher_no,
            voucher_type,
            party: party.unwrap_or_default(),
            debit,
            credit,
            narration: narration.unwrap_or_default(),
        });
    }
    Ok(data)
}
