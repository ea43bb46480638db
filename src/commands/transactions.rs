// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::{Context, Result};
use regex::RegexBuilder;
use rust_decimal::Decimal;

use crate::api::LedgerClient;
use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::store::TransactionStore;
use crate::utils::{
    confirm, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
    today_string,
};

pub fn handle(client: &LedgerClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("rm", sub)) => rm(client, sub)?,
        _ => {}
    }
    Ok(())
}

// The entry form is the only boundary that enforces the minimum amount;
// downstream code trusts it.
const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

fn add(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?.to_string(),
        None => today_string(),
    };
    let event = sub.get_one::<String>("event").unwrap().clone();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    anyhow::ensure!(amount >= MIN_AMOUNT, "Amount must be at least 0.01");
    let r#type: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let category = sub.get_one::<String>("category").unwrap().clone();
    let remark = sub.get_one::<String>("remark").cloned().unwrap_or_default();

    let draft = NewTransaction {
        date,
        event,
        amount,
        r#type,
        category,
        remark,
    };

    let mut store = TransactionStore::new();
    store
        .add_or_edit(client, &draft, None, Instant::now())
        .context("Record transaction")?;
    println!(
        "Recorded {} {} '{}' on {}",
        draft.r#type,
        fmt_money(&draft.amount),
        draft.event,
        draft.date
    );
    Ok(())
}

fn list(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;
    let r#type = sub
        .get_one::<String>("type")
        .map(|t| t.parse::<TransactionType>())
        .transpose()?;
    let search = sub
        .get_one::<String>("search")
        .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
        .transpose()
        .context("Invalid search pattern")?;

    let mut store = TransactionStore::new();
    store
        .refresh(client, Instant::now())
        .context("Fetch transactions from ledger API")?;

    let mut rows: Vec<&Transaction> = store
        .transactions()
        .iter()
        .filter(|t| month.as_deref().is_none_or(|m| t.date.starts_with(m)))
        .filter(|t| r#type.is_none_or(|ty| t.r#type == ty))
        .filter(|t| {
            search
                .as_ref()
                .is_none_or(|re| re.is_match(&t.event) || re.is_match(&t.category))
        })
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.date.clone(),
                    t.event.clone(),
                    t.category.clone(),
                    t.r#type.to_string(),
                    fmt_money(&t.amount),
                    t.remark.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Event", "Category", "Type", "Amount", "Remark"],
                data,
            )
        );
    }
    Ok(())
}

fn edit(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();

    let mut store = TransactionStore::new();
    store
        .refresh(client, Instant::now())
        .context("Fetch transactions from ledger API")?;
    let existing = store
        .transactions()
        .iter()
        .find(|t| t.id == *id)
        .with_context(|| format!("Transaction '{}' not found", id))?
        .clone();

    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?.to_string(),
        None => existing.date.clone(),
    };
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_decimal(a)?,
        None => existing.amount,
    };
    anyhow::ensure!(amount >= MIN_AMOUNT, "Amount must be at least 0.01");
    let r#type = match sub.get_one::<String>("type") {
        Some(t) => t.parse::<TransactionType>()?,
        None => existing.r#type,
    };

    let draft = NewTransaction {
        date,
        event: sub
            .get_one::<String>("event")
            .cloned()
            .unwrap_or_else(|| existing.event.clone()),
        amount,
        r#type,
        category: sub
            .get_one::<String>("category")
            .cloned()
            .unwrap_or_else(|| existing.category.clone()),
        remark: sub
            .get_one::<String>("remark")
            .cloned()
            .or_else(|| existing.remark.clone())
            .unwrap_or_default(),
    };

    store
        .add_or_edit(client, &draft, Some(id), Instant::now())
        .context("Replace transaction")?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();

    if !sub.get_flag("yes") && !confirm("Are you sure you want to delete this item?")? {
        println!("Aborted.");
        return Ok(());
    }

    let mut store = TransactionStore::new();
    store
        .delete(client, id, Instant::now())
        .context("Delete transaction")?;
    println!("Deleted transaction {}", id);
    Ok(())
}
