// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget reconciliation between the remote store and the local cache.
//!
//! One `BudgetSettings` value is live at a time. Hydration reads the remote
//! store first and falls back to the local cache, then to defaults. After
//! hydration every mutation mirrors into the local cache immediately, while
//! remote writes are debounced behind a 500ms quiet period and gated on a
//! 4-digit year so half-typed values are never durably persisted remotely.

use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::models::BudgetSettings;

/// Quiet period with no further mutation before a remote write fires.
pub const QUIET_PERIOD: Duration = Duration::from_millis(500);

pub trait RemoteBudget {
    fn read_budget(&self) -> Result<Option<BudgetSettings>, ApiError>;
    fn write_budget(&self, settings: &BudgetSettings) -> Result<(), ApiError>;
}

impl<T: RemoteBudget> RemoteBudget for &T {
    fn read_budget(&self) -> Result<Option<BudgetSettings>, ApiError> {
        (**self).read_budget()
    }

    fn write_budget(&self, settings: &BudgetSettings) -> Result<(), ApiError> {
        (**self).write_budget(settings)
    }
}

pub trait BudgetCache {
    fn load(&self) -> Option<BudgetSettings>;
    fn store(&self, settings: &BudgetSettings);
}

impl<T: BudgetCache> BudgetCache for &T {
    fn load(&self) -> Option<BudgetSettings> {
        (**self).load()
    }

    fn store(&self, settings: &BudgetSettings) {
        (**self).store(settings)
    }
}

/// Where the live settings value came from at hydration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    Remote,
    LocalCache,
    Default,
}

impl std::fmt::Display for HydrationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HydrationSource::Remote => write!(f, "remote store"),
            HydrationSource::LocalCache => write!(f, "local cache"),
            HydrationSource::Default => write!(f, "defaults"),
        }
    }
}

#[derive(Debug)]
enum Phase {
    Uninitialized,
    Hydrating,
    Hydrated {
        source: HydrationSource,
        echo_consumed: bool,
    },
}

pub struct BudgetReconciler<R, C> {
    remote: R,
    cache: C,
    settings: BudgetSettings,
    phase: Phase,
    write_deadline: Option<Instant>,
}

impl<R: RemoteBudget, C: BudgetCache> BudgetReconciler<R, C> {
    pub fn new(remote: R, cache: C) -> Self {
        BudgetReconciler {
            remote,
            cache,
            settings: BudgetSettings::current_defaults(),
            phase: Phase::Uninitialized,
            write_deadline: None,
        }
    }

    pub fn settings(&self) -> &BudgetSettings {
        &self.settings
    }

    pub fn source(&self) -> Option<HydrationSource> {
        match self.phase {
            Phase::Hydrated { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Populates the live settings: remote store first, local cache second,
    /// in-memory defaults last. A remote value is mirrored into the cache so
    /// a later offline reload still sees it.
    pub fn hydrate(&mut self) -> HydrationSource {
        self.phase = Phase::Hydrating;

        let source = match self.remote.read_budget() {
            Ok(Some(remote)) => {
                self.cache.store(&remote);
                self.settings = remote;
                HydrationSource::Remote
            }
            Ok(None) => self.hydrate_from_cache(),
            Err(err) => {
                tracing::warn!("failed to load budget from collaborator: {err}");
                self.hydrate_from_cache()
            }
        };

        self.phase = Phase::Hydrated {
            source,
            echo_consumed: false,
        };
        source
    }

    fn hydrate_from_cache(&mut self) -> HydrationSource {
        match self.cache.load() {
            Some(cached) => {
                self.settings = cached;
                HydrationSource::LocalCache
            }
            None => HydrationSource::Default,
        }
    }

    /// Applies a settings change.
    ///
    /// After hydration the value is mirrored into the local cache
    /// unconditionally and synchronously. The first mutation after reaching
    /// the hydrated state is the hydration echo (the re-set of the value that
    /// was just adopted) and never schedules a remote write. Every later
    /// mutation cancels and restarts the debounce deadline; a non-4-digit
    /// year cancels without rescheduling.
    pub fn mutate(&mut self, settings: BudgetSettings, now: Instant) {
        self.settings = settings;

        match &mut self.phase {
            Phase::Uninitialized | Phase::Hydrating => {}
            Phase::Hydrated { echo_consumed, .. } => {
                self.cache.store(&self.settings);

                if !*echo_consumed {
                    *echo_consumed = true;
                    return;
                }

                self.write_deadline = if self.settings.has_valid_year() {
                    Some(now + QUIET_PERIOD)
                } else {
                    None
                };
            }
        }
    }

    pub fn write_pending(&self) -> bool {
        self.write_deadline.is_some()
    }

    /// Fires the debounced remote write once the quiet period has elapsed.
    ///
    /// Returns `None` while nothing is due. A failed write does not revert
    /// the in-memory value and is not retried; the next mutation starts a
    /// fresh debounce cycle with then-current data.
    pub fn poll(&mut self, now: Instant) -> Option<Result<(), ApiError>> {
        match self.write_deadline {
            Some(deadline) if now >= deadline => {
                self.write_deadline = None;
                Some(self.remote.write_budget(&self.settings))
            }
            _ => None,
        }
    }
}
