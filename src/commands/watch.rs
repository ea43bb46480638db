// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::api::LedgerClient;
use crate::budget::BudgetReconciler;
use crate::cache::BudgetFileCache;
use crate::commands::dashboard;
use crate::store::{REFRESH_INTERVAL, TransactionStore};
use crate::utils::{current_month_key, parse_month};

/// Long-running session loop: re-renders the dashboard on the polling
/// interval until interrupted. This is the only command that keeps a
/// `TransactionStore` and a `BudgetReconciler` alive across ticks.
pub fn handle(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let tick = Duration::from_secs(*sub.get_one::<u64>("tick-secs").unwrap());
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month_key(),
    };

    let mut store = TransactionStore::new();
    let mut reconciler = BudgetReconciler::new(client, BudgetFileCache::open_default()?);
    reconciler.hydrate();

    // Failed refreshes also wait out the full interval before the next
    // attempt, so a downed collaborator is not hammered every tick.
    let mut last_attempt: Option<Instant> = None;

    loop {
        let now = Instant::now();
        let attempt_due = match last_attempt {
            None => true,
            Some(at) => now.duration_since(at) >= REFRESH_INTERVAL,
        };

        if attempt_due && store.refresh_due(now) {
            last_attempt = Some(now);
            if let Err(err) = store.refresh(client, now) {
                tracing::warn!("refresh failed, showing stale data: {err}");
            }
            print!("\x1B[2J\x1B[H");
            dashboard::render(store.transactions(), reconciler.settings(), &month);
            println!("\nRefreshing every {}s. Press Ctrl-C to exit.", REFRESH_INTERVAL.as_secs());
        }

        if let Some(Err(err)) = reconciler.poll(now) {
            tracing::warn!("failed to save budget remotely: {err}");
        }

        std::thread::sleep(tick);
    }
}
