// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type '{}', expected income|expense",
                other
            )),
        }
    }
}

/// A single money movement. Never mutated in place: the collaborator has no
/// edit endpoint, so an edit is a delete of the old id plus an add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Calendar date as a zero-padded `YYYY-MM-DD` string, compared lexically.
    pub date: String,
    pub event: String,
    /// Non-negative magnitude; the sign is carried by `type`.
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// POST body for `/receive`: a transaction before the collaborator assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: String,
    pub event: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub remark: String,
}

/// Singleton budget configuration; the client only ever holds the current
/// value, never a per-month history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSettings {
    pub year: i32,
    pub month: u32,
    pub monthly_limit: Decimal,
    pub enabled: bool,
}

impl BudgetSettings {
    /// Defaults used before hydration: current year/month, $2000, enabled.
    pub fn current_defaults() -> Self {
        let today = Local::now().date_naive();
        BudgetSettings {
            year: today.year(),
            month: today.month(),
            monthly_limit: Decimal::from(2000),
            enabled: true,
        }
    }

    /// Only 4-digit years are eligible for remote persistence. Shorter values
    /// show up transiently while a year is being typed and must not be
    /// durably persisted.
    pub fn has_valid_year(&self) -> bool {
        (1000..=9999).contains(&self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(anyhow::anyhow!(
                "Invalid priority '{}', expected low|medium|high",
                other
            )),
        }
    }
}

/// Independent task-list entity; no relationship to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// PATCH body for `/todo?id=`: only the present fields are updated.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// The collaborator serves ids as either JSON numbers or strings depending on
// how the row was created; treat both as the same opaque identifier.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}
