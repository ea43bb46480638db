// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use brightledger::api::{DEFAULT_BASE_URL, LedgerClient};
use brightledger::cli;
use brightledger::commands::{
    analyze, budgets, dashboard, exporter, importer, todos, transactions, watch,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli::build_cli().get_matches();

    let base_url = matches
        .get_one::<String>("api-url")
        .cloned()
        .or_else(|| std::env::var("BRIGHTLEDGER_API").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let client = LedgerClient::new(base_url)?;

    match matches.subcommand() {
        Some(("dashboard", sub)) => dashboard::handle(&client, sub)?,
        Some(("tx", sub)) => transactions::handle(&client, sub)?,
        Some(("budget", sub)) => budgets::handle(&client, sub)?,
        Some(("todo", sub)) => todos::handle(&client, sub)?,
        Some(("import", sub)) => importer::handle(&client, sub)?,
        Some(("export", sub)) => exporter::handle(&client, sub)?,
        Some(("analyze", sub)) => analyze::handle(&client, sub)?,
        Some(("watch", sub)) => watch::handle(&client, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
