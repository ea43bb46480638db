// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::advisor;
use crate::api::LedgerClient;
use crate::utils::{current_month_key, parse_month};

pub fn handle(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month_key(),
    };

    let transactions = client
        .fetch_all()
        .context("Fetch transactions from ledger API")?;
    println!("{}", advisor::analyze_spending(&transactions, &month));
    Ok(())
}
