// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::api::LedgerClient;
use crate::budget::{BudgetReconciler, QUIET_PERIOD};
use crate::cache::BudgetFileCache;
use crate::models::BudgetSettings;
use crate::utils::{fmt_money, parse_decimal, pretty_table};

pub fn handle(client: &LedgerClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(client)?,
        Some(("set", sub)) => set(client, sub)?,
        _ => {}
    }
    Ok(())
}

fn open_reconciler(
    client: &LedgerClient,
) -> Result<BudgetReconciler<&LedgerClient, BudgetFileCache>> {
    Ok(BudgetReconciler::new(client, BudgetFileCache::open_default()?))
}

fn show(client: &LedgerClient) -> Result<()> {
    let mut reconciler = open_reconciler(client)?;
    reconciler.hydrate();

    let settings = reconciler.settings();
    println!(
        "{}",
        pretty_table(
            &["Year", "Month", "Monthly Limit", "Enabled"],
            vec![vec![
                settings.year.to_string(),
                format!("{:02}", settings.month),
                fmt_money(&settings.monthly_limit),
                settings.enabled.to_string(),
            ]],
        )
    );
    if let Some(source) = reconciler.source() {
        println!("Loaded from {source}.");
    }
    Ok(())
}

fn set(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let mut reconciler = open_reconciler(client)?;
    reconciler.hydrate();

    let Some(next) = merge_flags(sub, reconciler.settings())? else {
        println!("Nothing to change.");
        return Ok(());
    };

    // Re-adopting the hydrated value consumes the echo slot, so the user's
    // change below behaves like any later mutation.
    let now = Instant::now();
    reconciler.mutate(reconciler.settings().clone(), now);

    reconciler.mutate(next, now);

    if !reconciler.write_pending() {
        println!("Budget updated locally; remote save skipped (year must be 4 digits).");
        return Ok(());
    }

    // A one-shot command has no later ticks, so drive the debounce clock past
    // the quiet period instead of sleeping through it.
    match reconciler.poll(now + QUIET_PERIOD) {
        Some(Ok(())) => println!("Budget saved."),
        Some(Err(err)) => {
            tracing::warn!("failed to save budget remotely: {err}");
            println!("Budget kept locally; the remote save failed.");
        }
        None => {}
    }
    Ok(())
}

/// Overlays the provided flags onto the current settings. `None` when no flag
/// was given at all, so a bare `budget set` never touches the collaborator.
pub fn merge_flags(
    sub: &clap::ArgMatches,
    current: &BudgetSettings,
) -> Result<Option<BudgetSettings>> {
    let mut next = current.clone();
    let mut changed = false;

    if let Some(year) = sub.get_one::<i32>("year") {
        next.year = *year;
        changed = true;
    }
    if let Some(month) = sub.get_one::<u32>("month") {
        anyhow::ensure!((1..=12).contains(month), "Month must be between 1 and 12");
        next.month = *month;
        changed = true;
    }
    if let Some(limit) = sub.get_one::<String>("limit") {
        let limit = parse_decimal(limit)?;
        anyhow::ensure!(limit >= Decimal::ZERO, "Limit must not be negative");
        next.monthly_limit = limit;
        changed = true;
    }
    if let Some(enabled) = sub.get_one::<bool>("enabled") {
        next.enabled = *enabled;
        changed = true;
    }

    Ok(changed.then_some(next))
}
