// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local fallback cache for budget settings: one JSON file holding the
//! serialized value, read at hydration and rewritten on every mutation. Cache
//! I/O is best effort; a missing or malformed file falls through to defaults.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;

use crate::budget::BudgetCache;
use crate::models::BudgetSettings;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("io.brightledger", "BrightLedger", "brightledger"));

const CACHE_FILE: &str = "brightledger_budget.json";

pub struct BudgetFileCache {
    path: PathBuf,
}

impl BudgetFileCache {
    pub fn open_default() -> Result<Self> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific data dir")?;
        let data_dir = proj.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data dir")?;
        Ok(BudgetFileCache {
            path: data_dir.join(CACHE_FILE),
        })
    }

    /// Cache rooted at an explicit path, for tests and unusual setups.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        BudgetFileCache { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl BudgetCache for BudgetFileCache {
    fn load(&self) -> Option<BudgetSettings> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(settings) => Some(settings),
            Err(err) => {
                tracing::warn!("discarding malformed budget cache: {err}");
                None
            }
        }
    }

    fn store(&self, settings: &BudgetSettings) {
        let serialized = match serde_json::to_string_pretty(settings) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!("could not serialize budget settings: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, serialized) {
            tracing::warn!("could not write budget cache {}: {err}", self.path.display());
        }
    }
}
