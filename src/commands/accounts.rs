// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountKind;
use crate::utils::{parse_decimal, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", _)) => list(conn)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let kind_raw = sub.get_one::<String>("kind").unwrap().trim();
    let kind = AccountKind::from_label(kind_raw)
        .ok_or_else(|| anyhow!("Unknown kind '{}' (use customer|vendor|general)", kind_raw))?;
    let currency = sub
        .get_one::<String>("currency")
        .unwrap()
        .trim()
        .to_uppercase();
    let opening = match sub.get_one::<String>("opening") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => Decimal::ZERO,
    };

    conn.execute(
        "INSERT INTO accounts(name, kind, currency, opening_balance) VALUES (?1,?2,?3,?4)",
        params![name, kind.as_str(), currency, opening.to_string()],
    )?;
    println!("Added {} account '{}' ({}, opening {})", kind, name, currency, opening);
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let mut stmt =
        conn.prepare("SELECT name, kind, currency, opening_balance FROM accounts ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (name, kind, ccy, opening) = row?;
        data.push(vec![name, kind, ccy, opening]);
    }
    println!(
        "{}",
        pretty_table(&["Account", "Kind", "CCY", "Opening"], data)
    );
    Ok(())
}
