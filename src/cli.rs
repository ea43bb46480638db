// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

pub fn build_cli() -> Command {
    Command::new("brightledger")
        .about("CLI client for the BrightLedger personal finance backend")
        .version(crate_version!())
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .value_name("URL")
                .help("Base URL of the ledger API (defaults to BRIGHTLEDGER_API or http://localhost:5000/api)"),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly overview: totals, budget status, daily spend, categories")
                .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a new transaction")
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("event").long("event").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("income|expense")
                                .required(true),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("remark").long("remark")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List transactions with optional filters")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                        .arg(Arg::new("type").long("type").value_name("income|expense"))
                        .arg(Arg::new("search").long("search").value_name("REGEX"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                        .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace a transaction (delete + add; there is no edit endpoint)")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("event").long("event"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type").value_name("income|expense"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("remark").long("remark")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("yes").long("yes").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Show or change the monthly budget settings")
                .subcommand(Command::new("show").about("Show the current budget settings"))
                .subcommand(
                    Command::new("set")
                        .about("Update budget settings")
                        .arg(Arg::new("year").long("year").value_parser(value_parser!(i32)))
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("limit").long("limit").value_name("AMOUNT"))
                        .arg(
                            Arg::new("enabled")
                                .long("enabled")
                                .value_name("true|false")
                                .value_parser(value_parser!(bool)),
                        ),
                ),
        )
        .subcommand(
            Command::new("todo")
                .about("Manage the task list")
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .value_name("all|active|completed")
                                .default_value("all"),
                        )
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .value_name("low|medium|high"),
                        )
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .value_name("low|medium|high")
                                .default_value("medium"),
                        )
                        .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category").default_value("Personal")),
                )
                .subcommand(
                    Command::new("toggle")
                        .about("Flip a task between active and completed")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("title").long("title"))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .value_name("low|medium|high"),
                        )
                        .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(
                    Command::new("rm")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("yes").long("yes").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("clear-completed")
                        .about("Remove every completed task in one write"),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Merge a JSON or CSV file into the session ledger (not persisted remotely)")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Export the full transaction list to a file")
                .arg(Arg::new("out").long("out").value_name("PATH"))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("json|csv")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("analyze")
                .about("AI spending summary for a month")
                .arg(Arg::new("month").long("month").value_name("YYYY-MM")),
        )
        .subcommand(
            Command::new("watch")
                .about("Keep the dashboard on screen, refreshing from the ledger API every 3 minutes")
                .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                .arg(
                    Arg::new("tick-secs")
                        .long("tick-secs")
                        .value_parser(value_parser!(u64))
                        .default_value("5"),
                ),
        )
}
