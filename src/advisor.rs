// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! AI spending analysis via the generative-language collaborator.
//!
//! Consumed as a single opaque call: transactions plus a `YYYY-MM` month in,
//! prose out. Any failure maps to one of the fixed fallback strings; this
//! module never returns an error to its caller.

use serde_json::{Value, json};

use crate::models::Transaction;
use crate::utils::http_client;

const MODEL: &str = "gemini-2.5-flash";
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub const MISSING_KEY: &str = "API Key is missing. Please configure your environment.";
pub const NO_ANALYSIS: &str = "No analysis could be generated.";
pub const ANALYSIS_FAILED: &str = "Sorry, I couldn't analyze the data at this moment.";

pub fn analyze_spending(transactions: &[Transaction], month: &str) -> String {
    let key = match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.is_empty() => key,
        _ => {
            tracing::warn!("{API_KEY_VAR} not found in environment");
            return MISSING_KEY.to_string();
        }
    };

    let prompt = build_prompt(transactions, month);
    match request_analysis(&key, &prompt) {
        Ok(Some(text)) => text,
        Ok(None) => NO_ANALYSIS.to_string(),
        Err(err) => {
            tracing::warn!("analysis request failed: {err}");
            ANALYSIS_FAILED.to_string()
        }
    }
}

/// Condenses the month's transactions into a csv-like block to keep the token
/// count down, then wraps it in the advisor prompt.
pub fn build_prompt(transactions: &[Transaction], month: &str) -> String {
    let data_summary = transactions
        .iter()
        .filter(|t| t.date.starts_with(month))
        .map(|t| {
            format!(
                "{}, {}, {}, {}, {}",
                t.date, t.r#type, t.category, t.amount, t.event
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a financial advisor. Analyze the following transaction data for {month} \
         (Format: Date, Type, Category, Amount, Event).\n\n\
         Data:\n{data_summary}\n\n\
         Please provide:\n\
         1. A brief summary of spending habits.\n\
         2. Identify the largest expense categories.\n\
         3. One actionable tip to save money based on this specific data.\n\
         4. Keep the tone encouraging and professional. Limit response to 200 words."
    )
}

fn request_analysis(key: &str, prompt: &str) -> Result<Option<String>, reqwest::Error> {
    let client = http_client()?;
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });
    let resp = client
        .post(format!("{ENDPOINT}/{MODEL}:generateContent"))
        .query(&[("key", key)])
        .json(&body)
        .send()?
        .error_for_status()?;
    let payload: Value = resp.json()?;
    Ok(extract_text(&payload))
}

/// Pulls the first candidate's text out of a generateContent response.
pub fn extract_text(payload: &Value) -> Option<String> {
    payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
