// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side transaction list coordination.
//!
//! The collaborator owns the durable ledger; this store holds the in-memory
//! copy for one session. The list is only ever replaced wholesale by a
//! refresh, mutations go through the collaborator and are followed by an
//! unconditional refresh, and bulk import is a client-local prepend.

use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::models::{NewTransaction, Transaction};

/// Background polling interval for the session loop.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(3 * 60);

pub trait LedgerApi {
    fn fetch_all(&self) -> Result<Vec<Transaction>, ApiError>;
    fn add(&self, draft: &NewTransaction) -> Result<(), ApiError>;
    fn delete(&self, id: &str) -> Result<(), ApiError>;
}

impl<T: LedgerApi> LedgerApi for &T {
    fn fetch_all(&self) -> Result<Vec<Transaction>, ApiError> {
        (**self).fetch_all()
    }

    fn add(&self, draft: &NewTransaction) -> Result<(), ApiError> {
        (**self).add(draft)
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        (**self).delete(id)
    }
}

#[derive(Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    refreshing: bool,
    last_refresh: Option<Instant>,
}

impl TransactionStore {
    pub fn new() -> Self {
        TransactionStore::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Replaces the in-memory list wholesale from the collaborator.
    ///
    /// On failure the existing list is left untouched and the error is
    /// surfaced to the caller; there is no automatic retry beyond the
    /// periodic interval. Re-entrant calls while a refresh is in flight are
    /// dropped rather than queued.
    pub fn refresh(&mut self, api: &impl LedgerApi, now: Instant) -> Result<(), ApiError> {
        if self.refreshing {
            return Ok(());
        }

        self.refreshing = true;
        let outcome = api.fetch_all();
        self.refreshing = false;

        let list = outcome?;
        self.transactions = list;
        self.last_refresh = Some(now);
        Ok(())
    }

    /// Whether the background interval should trigger another refresh.
    pub fn refresh_due(&self, now: Instant) -> bool {
        match self.last_refresh {
            None => true,
            Some(at) => now.duration_since(at) >= REFRESH_INTERVAL,
        }
    }

    /// Adds a transaction, or replaces one when `editing_id` is set.
    ///
    /// The collaborator has no edit endpoint, so an edit is a delete of the
    /// old id followed by an add. The two calls are not atomic: if the add
    /// fails after the delete succeeded, the record is gone. Either path ends
    /// with an unconditional refresh to converge on the remote state.
    pub fn add_or_edit(
        &mut self,
        api: &impl LedgerApi,
        draft: &NewTransaction,
        editing_id: Option<&str>,
        now: Instant,
    ) -> Result<(), ApiError> {
        if let Some(id) = editing_id {
            api.delete(id)?;
        }
        api.add(draft)?;
        self.refresh(api, now)
    }

    /// Deletes a transaction and refreshes. Callers must have confirmed the
    /// deletion with the user first; it is irreversible from the client.
    pub fn delete(
        &mut self,
        api: &impl LedgerApi,
        id: &str,
        now: Instant,
    ) -> Result<(), ApiError> {
        api.delete(id)?;
        self.refresh(api, now)
    }

    /// Prepends imported records to the in-memory list without contacting the
    /// collaborator. They disappear on the next refresh; that is a known
    /// limitation of the import feature, not something to converge on.
    pub fn import(&mut self, items: Vec<Transaction>) -> usize {
        let count = items.len();
        let mut merged = items;
        merged.append(&mut self.transactions);
        self.transactions = merged;
        count
    }
}
