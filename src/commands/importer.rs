// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use csv::StringRecord;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::api::LedgerClient;
use crate::models::{Transaction, TransactionType};
use crate::store::TransactionStore;
use crate::utils::{fmt_money, pretty_table, today_string};

pub fn handle(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let items = parse_import_file(Path::new(path))?;

    let mut store = TransactionStore::new();
    // Best effort: an unreachable collaborator still lets the import preview run.
    if let Err(err) = store.refresh(client, Instant::now()) {
        tracing::warn!("could not refresh before import: {err}");
    }
    let count = store.import(items);

    println!("Successfully imported {} transactions.", count);
    println!("Note: imported records live in this session only and are not sent to the ledger API.");

    let preview: Vec<Vec<String>> = store
        .transactions()
        .iter()
        .take(10)
        .map(|t| {
            vec![
                t.date.clone(),
                t.event.clone(),
                t.category.clone(),
                t.r#type.to_string(),
                fmt_money(&t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Event", "Category", "Type", "Amount"], preview)
    );
    Ok(())
}

/// Parses a backup file into transactions. `.json` files must hold an array of
/// full transaction objects; everything else is treated as CSV.
pub fn parse_import_file(path: &Path) -> Result<Vec<Transaction>> {
    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Read {}", path.display()))?;
        let items: Vec<Transaction> =
            serde_json::from_str(&raw).with_context(|| format!("Parse {}", path.display()))?;
        return Ok(items);
    }
    parse_csv(path)
}

/// CSV import is forgiving: malformed cells fall back to safe defaults rather
/// than rejecting the row, matching how hand-edited exports tend to look.
pub fn parse_csv(path: &Path) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Read {}", path.display()))?;

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Parse {}", path.display()))?;
        items.push(transaction_from_record(&record));
    }
    Ok(items)
}

/// Expected column order: date, event, amount, type, category, remark.
pub fn transaction_from_record(record: &StringRecord) -> Transaction {
    let cell = |i: usize| record.get(i).map(str::trim).filter(|s| !s.is_empty());

    let r#type = match cell(3) {
        Some(t) if t.eq_ignore_ascii_case("income") => TransactionType::Income,
        _ => TransactionType::Expense,
    };

    Transaction {
        id: Uuid::new_v4().to_string(),
        date: cell(0).map(str::to_owned).unwrap_or_else(today_string),
        event: cell(1).unwrap_or("Unknown").to_owned(),
        amount: cell(2)
            .and_then(|a| a.parse::<Decimal>().ok())
            .unwrap_or(Decimal::ZERO),
        r#type,
        category: cell(4).unwrap_or("General").to_owned(),
        remark: cell(5).map(str::to_owned),
    }
}
