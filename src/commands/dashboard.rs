// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::json;

use crate::aggregate::{self, BudgetStatus};
use crate::api::LedgerClient;
use crate::budget::BudgetReconciler;
use crate::cache::BudgetFileCache;
use crate::models::{BudgetSettings, Transaction};
use crate::store::TransactionStore;
use crate::utils::{current_month_key, fmt_money, maybe_print_json, parse_month, pretty_table};

pub fn handle(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month_key(),
    };

    let mut store = TransactionStore::new();
    store
        .refresh(client, Instant::now())
        .context("Fetch transactions from ledger API")?;

    let mut reconciler = BudgetReconciler::new(client, BudgetFileCache::open_default()?);
    reconciler.hydrate();

    if json_flag {
        let report = report(store.transactions(), reconciler.settings(), &month);
        maybe_print_json(true, false, &report)?;
        return Ok(());
    }

    render(store.transactions(), reconciler.settings(), &month);
    Ok(())
}

/// Renders the full overview: totals card, daily spending series, category
/// breakdown. Shared with the `watch` session loop.
pub fn render(transactions: &[Transaction], budget: &BudgetSettings, month: &str) {
    let totals = aggregate::monthly_totals(transactions, month);
    let status = aggregate::budget_status(&totals, budget);

    let status_cell = match &status {
        BudgetStatus::Disabled => "Budget not set".to_string(),
        BudgetStatus::Enabled {
            percent_used,
            is_over,
        } => {
            let mut cell = format!(
                "{:.1}% of {}",
                percent_used,
                fmt_money(&budget.monthly_limit)
            );
            if *is_over {
                cell.push_str(" (over budget!)");
            }
            cell
        }
    };

    println!("Financial overview for {month}");
    println!(
        "{}",
        pretty_table(
            &["Monthly Income", "Monthly Expense", "Budget Status"],
            vec![vec![
                fmt_money(&totals.income),
                fmt_money(&totals.expense),
                status_cell,
            ]],
        )
    );

    let series = aggregate::daily_series(transactions, month);
    let rows: Vec<Vec<String>> = series
        .iter()
        .map(|(day, amount)| vec![format!("Day {day}"), fmt_money(amount)])
        .collect();
    println!("\nDaily spending ({month})");
    println!("{}", pretty_table(&["Day", "Spent"], rows));

    let breakdown = aggregate::category_breakdown(transactions, month);
    println!("\nExpense by category");
    if breakdown.is_empty() {
        println!("No expenses recorded this month.");
    } else {
        let rows: Vec<Vec<String>> = breakdown
            .iter()
            .map(|(category, total)| vec![category.clone(), fmt_money(total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
}

fn report(transactions: &[Transaction], budget: &BudgetSettings, month: &str) -> serde_json::Value {
    let totals = aggregate::monthly_totals(transactions, month);
    let status = aggregate::budget_status(&totals, budget);
    let series = aggregate::daily_series(transactions, month);
    let breakdown = aggregate::category_breakdown(transactions, month);

    let budget_value = match status {
        BudgetStatus::Disabled => json!({ "enabled": false }),
        BudgetStatus::Enabled {
            percent_used,
            is_over,
        } => json!({
            "enabled": true,
            "monthlyLimit": budget.monthly_limit,
            "percentUsed": percent_used,
            "isOver": is_over,
        }),
    };

    json!({
        "month": month,
        "income": totals.income,
        "expense": totals.expense,
        "budget": budget_value,
        "dailySeries": series,
        "categories": breakdown,
    })
}
