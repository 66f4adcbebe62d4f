// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerclip::{cli, commands::importer};
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE accounts(
            id INTEGER PRIMARY KEY,
            name TEXT,
            kind TEXT,
            currency TEXT,
            opening_balance TEXT
        );
        CREATE TABLE vouchers(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            voucher_no TEXT NOT NULL,
            voucher_type TEXT NOT NULL,
            party TEXT,
            debit TEXT NOT NULL DEFAULT '0',
            credit TEXT NOT NULL DEFAULT '0',
            narration TEXT,
            line_items TEXT
        );
        "#,
    )
    .unwrap();
    conn
}

fn run_import(conn: &mut Connection, args: &[&str]) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m).unwrap();
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn importer_inserts_rows_sorted_by_date() {
    let mut conn = base_conn();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,currency,opening_balance) VALUES (1,'Acme','customer','INR','0')",
        [],
    )
    .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,voucher_no,voucher_type,party,debit,credit\n2025-02-10,INV-2,Invoice,Acme,500,\n2025-02-01,INV-1,Invoice,Acme,100,"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(
        &mut conn,
        &["ledgerclip", "import", "vouchers", "--account", "Acme", "--path", &path],
    );

    let rows: Vec<(String, String)> = conn
        .prepare("SELECT date, voucher_no FROM vouchers ORDER BY id")
        .unwrap()
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2025-02-01".to_string(), "INV-1".to_string()),
            ("2025-02-10".to_string(), "INV-2".to_string()),
        ]
    );
}

#[test]
fn importer_skips_bad_rows_without_aborting() {
    let mut conn = base_conn();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,currency,opening_balance) VALUES (1,'Acme','customer','INR','0')",
        [],
    )
    .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,voucher_no,voucher_type,debit,credit\n2025-02-01,OK-1,Invoice,100,\nnot-a-date,BAD-1,Invoice,100,\n2025-02-03,BAD-2,Invoice,abc,\n2025-02-04,OK-2,Payment,,40"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(
        &mut conn,
        &["ledgerclip", "import", "vouchers", "--account", "Acme", "--path", &path],
    );

    let kept: Vec<String> = conn
        .prepare("SELECT voucher_no FROM vouchers ORDER BY id")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(kept, vec!["OK-1".to_string(), "OK-2".to_string()]);
}

#[test]
fn importer_swaps_sides_for_vendor_accounts() {
    let mut conn = base_conn();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,currency,opening_balance) VALUES (1,'Supplies Co','vendor','INR','0')",
        [],
    )
    .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,voucher_no,voucher_type,debit,credit\n2025-02-01,BILL-1,Purchase,,900"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(
        &mut conn,
        &["ledgerclip", "import", "vouchers", "--account", "Supplies Co", "--path", &path],
    );

    let (debit, credit): (String, String) = conn
        .query_row("SELECT debit, credit FROM vouchers", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(debit, "900");
    assert_eq!(credit, "0");
}

#[test]
fn importer_reads_legacy_json_records() {
    let mut conn = base_conn();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,currency,opening_balance) VALUES (1,'Acme','customer','INR','0')",
        [],
    )
    .unwrap();

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"[
            {{"vch_no": "INV-9", "vch_type": "Invoice", "party_name": "Acme", "vch_date": 1717200000, "dr_amount": 1250.5}},
            {{"vch_no": "PAY-9", "vch_type": "Payment", "party_name": "Acme", "vch_date": "2024-06-05", "cr_amount": "250"}}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(
        &mut conn,
        &[
            "ledgerclip", "import", "vouchers", "--account", "Acme", "--path", &path,
            "--format", "json", "--source", "legacy",
        ],
    );

    let rows: Vec<(String, String, String, String)> = conn
        .prepare("SELECT date, voucher_no, debit, credit FROM vouchers ORDER BY id")
        .unwrap()
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(rows[0].0, "2024-06-01");
    assert_eq!(rows[0].1, "INV-9");
    assert_eq!(rows[0].2, "1250.5");
    assert_eq!(rows[1].3, "250");
}

#[test]
fn importer_rejects_unknown_source() {
    let mut conn = base_conn();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,currency,opening_balance) VALUES (1,'Acme','customer','INR','0')",
        [],
    )
    .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,voucher_no\n2025-02-01,INV-1").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "ledgerclip", "import", "vouchers", "--account", "Acme", "--path", &path,
        "--source", "tally9",
    ]);
    if let Some(("import", import_m)) = matches.subcommand() {
        let err = importer::handle(&mut conn, import_m).unwrap_err();
        assert!(err.to_string().contains("Unknown source 'tally9'"));
    } else {
        panic!("no import subcommand");
    }
}
