// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ledger::accumulate::accumulate;
use crate::ledger::counts::aggregate_counts;
use crate::ledger::filter::project;
use crate::ledger::reconcile::{SummaryMismatch, reconcile};
use crate::models::{
    AccountKind, AnnotatedTransaction, AuthoritativeSummary, FilterCriteria, LedgerSummary, Page,
    TypeCount,
};
use crate::utils::{account_by_name, fmt_balance, fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

#[derive(Serialize)]
pub struct Statement {
    pub account: String,
    pub kind: AccountKind,
    pub currency: String,
    pub summary: LedgerSummary,
    pub total_matched: usize,
    pub rows: Vec<AnnotatedTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<TypeCount>,
}

/// Upstream summary file: the totals object, optionally with a per-type
/// voucher count breakdown alongside.
#[derive(Deserialize, Default)]
#[serde(default)]
struct AuthoritativeFile {
    #[serde(flatten)]
    summary: AuthoritativeSummary,
    type_counts: Option<TypeCount>,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (statement, warnings) = build(conn, sub)?;

    for w in &warnings {
        eprintln!(
            "warning: authoritative {} {} differs from local {}",
            w.field,
            fmt_money(&w.authoritative),
            fmt_money(&w.local)
        );
    }

    if maybe_print_json(json_flag, jsonl_flag, &statement)? {
        return Ok(());
    }

    println!(
        "Ledger: {} ({}, {})",
        statement.account, statement.kind, statement.currency
    );
    println!(
        "Opening: {}   Closing: {}",
        fmt_balance(&statement.summary.opening_balance),
        fmt_balance(&statement.summary.closing_balance)
    );
    println!(
        "Total Debit: {}   Total Credit: {}",
        fmt_money(&statement.summary.total_debit),
        fmt_money(&statement.summary.total_credit)
    );
    println!(
        "Showing {} of {} matched transactions",
        statement.rows.len(),
        statement.total_matched
    );

    let rows: Vec<Vec<String>> = statement
        .rows
        .iter()
        .map(|r| {
            vec![
                r.tx.date.to_string(),
                r.tx.voucher_no.clone(),
                r.tx.voucher_type.clone(),
                r.tx.party.clone().unwrap_or_default(),
                fmt_money(&r.tx.debit),
                fmt_money(&r.tx.credit),
                fmt_balance(&r.running_balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Vch No", "Type", "Party", "Debit", "Credit", "Balance"],
            rows,
        )
    );

    if let Some(counts) = &statement.counts {
        let mut data: Vec<Vec<String>> = counts
            .counts
            .iter()
            .map(|(label, n)| vec![label.clone(), n.to_string()])
            .collect();
        data.push(vec!["Total".into(), counts.total.to_string()]);
        println!("{}", pretty_table(&["Voucher Type", "Count"], data));
    }
    Ok(())
}

/// Full pipeline: load canonical rows, accumulate over the COMPLETE set,
/// reconcile totals, then filter and paginate the annotated view. Filters
/// never feed back into accumulation.
pub fn build(
    conn: &Connection,
    sub: &clap::ArgMatches,
) -> Result<(Statement, Vec<SummaryMismatch>)> {
    let account = account_by_name(conn, sub.get_one::<String>("account").unwrap().trim())?;
    let transactions = db::load_transactions(conn, account.id)?;
    let annotated = accumulate(&transactions, account.opening_balance)?;

    let authoritative = match sub.get_one::<String>("authoritative") {
        Some(path) => Some(read_authoritative(path.trim())?),
        None => None,
    };
    let reconciled = reconcile(
        &annotated,
        account.opening_balance,
        authoritative.as_ref().map(|a| &a.summary),
    );

    let criteria = FilterCriteria {
        from_date: sub
            .get_one::<String>("from")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        to_date: sub
            .get_one::<String>("to")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        voucher_type: sub.get_one::<String>("type").map(|s| s.trim().to_string()),
        voucher_no: sub
            .get_one::<String>("voucher")
            .map(|s| s.trim().to_string()),
        free_text: sub
            .get_one::<String>("search")
            .map(|s| s.trim().to_string()),
    };
    let page = Page {
        index: *sub.get_one::<usize>("page").unwrap_or(&0),
        size: *sub.get_one::<usize>("page-size").unwrap_or(&0),
    };
    let projection = project(&annotated, &criteria, page);

    let counts = if sub.get_flag("counts") {
        let label_map = match sub.get_one::<String>("labels") {
            Some(path) => read_labels(path.trim())?,
            None => HashMap::new(),
        };
        Some(aggregate_counts(
            &annotated,
            &label_map,
            authoritative.as_ref().and_then(|a| a.type_counts.as_ref()),
        ))
    } else {
        None
    };

    Ok((
        Statement {
            account: account.name,
            kind: account.kind,
            currency: account.currency,
            summary: reconciled.summary,
            total_matched: projection.total_matched,
            rows: projection.rows,
            counts,
        },
        reconciled.warnings,
    ))
}

fn read_authoritative(path: &str) -> Result<AuthoritativeFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Open authoritative summary {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Parse authoritative summary {}", path))
}

fn read_labels(path: &str) -> Result<HashMap<String, String>> {
    let text = fs::read_to_string(path).with_context(|| format!("Open label map {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("Parse label map {}", path))
}
