// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::api::LedgerClient;
use crate::models::Transaction;
use crate::utils::today_string;

pub fn handle(client: &LedgerClient, sub: &clap::ArgMatches) -> Result<()> {
    let format = sub.get_one::<String>("format").unwrap();
    let out = match sub.get_one::<String>("out") {
        Some(p) => p.clone(),
        None => format!("ledger_backup_{}.{}", today_string(), format),
    };

    let transactions = client
        .fetch_all()
        .context("Fetch transactions from ledger API")?;
    export_transactions(&transactions, Path::new(&out), format)?;
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}

pub fn export_transactions(
    transactions: &[Transaction],
    path: &Path,
    format: &str,
) -> Result<()> {
    match format {
        "json" => {
            let raw = serde_json::to_string_pretty(transactions)?;
            std::fs::write(path, raw).with_context(|| format!("Write {}", path.display()))?;
        }
        "csv" => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Write {}", path.display()))?;
            writer.write_record(["date", "event", "amount", "type", "category", "remark"])?;
            for t in transactions {
                let amount = t.amount.to_string();
                let kind = t.r#type.to_string();
                writer.write_record([
                    t.date.as_str(),
                    t.event.as_str(),
                    amount.as_str(),
                    kind.as_str(),
                    t.category.as_str(),
                    t.remark.as_deref().unwrap_or(""),
                ])?;
            }
            writer.flush()?;
        }
        other => bail!("Unknown export format '{}', expected json|csv", other),
    }
    Ok(())
}
