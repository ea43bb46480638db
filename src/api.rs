// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! REST collaborator client. Every call returns an explicit `Result` so the
//! caller decides how a failure degrades; nothing is retried here.

use serde::{Deserialize, de::DeserializeOwned};

use crate::models::{BudgetSettings, NewTransaction, TodoItem, TodoPatch, Transaction};
use crate::utils::http_client;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("collaborator returned status '{0}'")]
    Status(String),
}

/// Response envelope shared by every endpoint: `status` is the literal `"ok"`
/// on success; any other value is a failure regardless of the HTTP code.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    data: Option<T>,
}

pub struct LedgerClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl LedgerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(LedgerClient {
            http: http_client()?,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn unwrap_ok<T: DeserializeOwned>(
        resp: reqwest::blocking::Response,
    ) -> Result<Option<T>, ApiError> {
        let envelope: Envelope<T> = resp.json()?;
        if envelope.status != "ok" {
            return Err(ApiError::Status(envelope.status));
        }
        Ok(envelope.data)
    }

    pub fn fetch_all(&self) -> Result<Vec<Transaction>, ApiError> {
        let resp = self.http.get(self.url("/data")).send()?;
        Ok(Self::unwrap_ok(resp)?.unwrap_or_default())
    }

    pub fn add(&self, draft: &NewTransaction) -> Result<(), ApiError> {
        let resp = self.http.post(self.url("/receive")).json(draft).send()?;
        Self::unwrap_ok::<serde_json::Value>(resp).map(|_| ())
    }

    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url("/data"))
            .query(&[("id", id)])
            .send()?;
        Self::unwrap_ok::<serde_json::Value>(resp).map(|_| ())
    }

    pub fn read_budget(&self) -> Result<Option<BudgetSettings>, ApiError> {
        let resp = self.http.get(self.url("/budget")).send()?;
        Self::unwrap_ok(resp)
    }

    pub fn save_budget(&self, settings: &BudgetSettings) -> Result<(), ApiError> {
        let resp = self.http.put(self.url("/budget")).json(settings).send()?;
        Self::unwrap_ok::<serde_json::Value>(resp).map(|_| ())
    }

    pub fn list_todos(&self) -> Result<Vec<TodoItem>, ApiError> {
        let resp = self.http.get(self.url("/todo")).send()?;
        Ok(Self::unwrap_ok(resp)?.unwrap_or_default())
    }

    pub fn put_todos(&self, items: &[TodoItem]) -> Result<(), ApiError> {
        let resp = self.http.put(self.url("/todo")).json(&items).send()?;
        Self::unwrap_ok::<serde_json::Value>(resp).map(|_| ())
    }

    pub fn add_todo(&self, item: &TodoItem) -> Result<(), ApiError> {
        let resp = self.http.post(self.url("/todo")).json(item).send()?;
        Self::unwrap_ok::<serde_json::Value>(resp).map(|_| ())
    }

    pub fn delete_todo(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url("/todo"))
            .query(&[("id", id)])
            .send()?;
        Self::unwrap_ok::<serde_json::Value>(resp).map(|_| ())
    }

    pub fn patch_todo(&self, id: &str, patch: &TodoPatch) -> Result<(), ApiError> {
        let resp = self
            .http
            .patch(self.url("/todo"))
            .query(&[("id", id)])
            .json(patch)
            .send()?;
        Self::unwrap_ok::<serde_json::Value>(resp).map(|_| ())
    }
}

impl crate::store::LedgerApi for LedgerClient {
    fn fetch_all(&self) -> Result<Vec<Transaction>, ApiError> {
        LedgerClient::fetch_all(self)
    }

    fn add(&self, draft: &NewTransaction) -> Result<(), ApiError> {
        LedgerClient::add(self, draft)
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        LedgerClient::delete(self, id)
    }
}

impl crate::budget::RemoteBudget for LedgerClient {
    fn read_budget(&self) -> Result<Option<BudgetSettings>, ApiError> {
        LedgerClient::read_budget(self)
    }

    fn write_budget(&self, settings: &BudgetSettings) -> Result<(), ApiError> {
        LedgerClient::save_budget(self, settings)
    }
}
