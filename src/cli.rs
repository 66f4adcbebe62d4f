// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("ledgerclip")
        .about("Party ledgers, running balances, reconciliation, and statements")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("account")
                .about("Manage ledger accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add a ledger account")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("customer | vendor | general"),
                        )
                        .arg(Arg::new("currency").long("currency").required(true))
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .help("Opening balance, default 0"),
                        ),
                )
                .subcommand(Command::new("list").about("List ledger accounts")),
        )
        .subcommand(
            Command::new("voucher")
                .about("Record and inspect vouchers")
                .subcommand(
                    Command::new("add")
                        .about("Record a voucher")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("no").long("no").required(true))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("party").long("party"))
                        .arg(Arg::new("debit").long("debit"))
                        .arg(Arg::new("credit").long("credit"))
                        .arg(Arg::new("narration").long("narration")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List vouchers for an account")
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("import").about("Import upstream records").subcommand(
                Command::new("vouchers")
                    .about("Import vouchers from a CSV or JSON file")
                    .arg(Arg::new("account").long("account").required(true))
                    .arg(Arg::new("path").long("path").required(true))
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(
                        Arg::new("source")
                            .long("source")
                            .default_value("standard")
                            .help("Upstream field naming: standard | legacy"),
                    ),
            ),
        )
        .subcommand(json_flags(
            Command::new("statement")
                .about("Running-balance statement with summary and filters")
                .arg(Arg::new("account").long("account").required(true))
                .arg(Arg::new("from").long("from").help("From date, inclusive"))
                .arg(Arg::new("to").long("to").help("To date, inclusive"))
                .arg(Arg::new("type").long("type").help("Voucher type filter"))
                .arg(Arg::new("voucher").long("voucher").help("Voucher number filter"))
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Free text over voucher no, party, type"),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_parser(value_parser!(usize))
                        .help("0-based page index"),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("authoritative")
                        .long("authoritative")
                        .help("JSON file with upstream summary totals"),
                )
                .arg(
                    Arg::new("labels")
                        .long("labels")
                        .help("JSON file mapping voucher types to display labels"),
                )
                .arg(
                    Arg::new("counts")
                        .long("counts")
                        .action(ArgAction::SetTrue)
                        .help("Include the voucher type breakdown"),
                ),
        ))
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("statement")
                    .about("Export the full annotated statement")
                    .arg(Arg::new("account").long("account").required(true))
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv | json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
