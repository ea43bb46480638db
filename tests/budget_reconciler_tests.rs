// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use brightledger::api::ApiError;
use brightledger::budget::{
    BudgetCache, BudgetReconciler, HydrationSource, QUIET_PERIOD, RemoteBudget,
};
use brightledger::models::BudgetSettings;

#[derive(Default)]
struct FakeRemote {
    value: RefCell<Option<BudgetSettings>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: RefCell<Vec<BudgetSettings>>,
}

impl RemoteBudget for FakeRemote {
    fn read_budget(&self) -> Result<Option<BudgetSettings>, ApiError> {
        if self.fail_reads.get() {
            return Err(ApiError::Status("unavailable".into()));
        }
        Ok(self.value.borrow().clone())
    }

    fn write_budget(&self, settings: &BudgetSettings) -> Result<(), ApiError> {
        if self.fail_writes.get() {
            return Err(ApiError::Status("unavailable".into()));
        }
        self.writes.borrow_mut().push(settings.clone());
        Ok(())
    }
}

#[derive(Default)]
struct FakeCache {
    stored: RefCell<Option<BudgetSettings>>,
    store_count: Cell<usize>,
}

impl BudgetCache for FakeCache {
    fn load(&self) -> Option<BudgetSettings> {
        self.stored.borrow().clone()
    }

    fn store(&self, settings: &BudgetSettings) {
        self.store_count.set(self.store_count.get() + 1);
        *self.stored.borrow_mut() = Some(settings.clone());
    }
}

fn settings(year: i32, limit: i64) -> BudgetSettings {
    BudgetSettings {
        year,
        month: 6,
        monthly_limit: Decimal::from(limit),
        enabled: true,
    }
}

#[test]
fn hydrate_prefers_remote_and_mirrors_it_into_cache() {
    let remote = FakeRemote::default();
    *remote.value.borrow_mut() = Some(settings(2025, 1500));
    let cache = FakeCache::default();
    *cache.stored.borrow_mut() = Some(settings(2020, 999));

    let mut rec = BudgetReconciler::new(&remote, &cache);
    let source = rec.hydrate();

    assert_eq!(source, HydrationSource::Remote);
    assert_eq!(rec.settings(), &settings(2025, 1500));
    assert_eq!(cache.stored.borrow().as_ref(), Some(&settings(2025, 1500)));
}

#[test]
fn hydrate_falls_back_to_cache_when_remote_fails() {
    let remote = FakeRemote::default();
    remote.fail_reads.set(true);
    let cache = FakeCache::default();
    *cache.stored.borrow_mut() = Some(settings(2024, 800));

    let mut rec = BudgetReconciler::new(&remote, &cache);
    let source = rec.hydrate();

    assert_eq!(source, HydrationSource::LocalCache);
    assert_eq!(rec.settings(), &settings(2024, 800));
}

#[test]
fn hydrate_falls_back_to_defaults_when_both_sources_are_empty() {
    let remote = FakeRemote::default();
    let cache = FakeCache::default();

    let mut rec = BudgetReconciler::new(&remote, &cache);
    let source = rec.hydrate();

    assert_eq!(source, HydrationSource::Default);
    assert_eq!(rec.settings(), &BudgetSettings::current_defaults());
}

#[test]
fn mutation_before_hydration_neither_caches_nor_schedules() {
    let remote = FakeRemote::default();
    let cache = FakeCache::default();

    let mut rec = BudgetReconciler::new(&remote, &cache);
    rec.mutate(settings(2025, 1200), Instant::now());

    assert_eq!(cache.store_count.get(), 0);
    assert!(!rec.write_pending());
    // The in-memory value still moves so the caller sees what it set.
    assert_eq!(rec.settings(), &settings(2025, 1200));
}

#[test]
fn first_mutation_after_hydrate_is_the_echo_and_does_not_schedule() {
    let remote = FakeRemote::default();
    *remote.value.borrow_mut() = Some(settings(2025, 1500));
    let cache = FakeCache::default();

    let mut rec = BudgetReconciler::new(&remote, &cache);
    rec.hydrate();
    let stores_after_hydrate = cache.store_count.get();

    rec.mutate(settings(2025, 1500), Instant::now());

    assert!(!rec.write_pending());
    assert_eq!(cache.store_count.get(), stores_after_hydrate + 1);
}

#[test]
fn debounced_write_fires_once_after_the_quiet_period() {
    let remote = FakeRemote::default();
    let cache = FakeCache::default();
    let mut rec = BudgetReconciler::new(&remote, &cache);
    rec.hydrate();

    let t0 = Instant::now();
    rec.mutate(rec.settings().clone(), t0); // echo
    rec.mutate(settings(2025, 1800), t0);

    assert!(rec.write_pending());
    assert!(rec.poll(t0 + QUIET_PERIOD - Duration::from_millis(1)).is_none());

    let outcome = rec.poll(t0 + QUIET_PERIOD);
    assert!(matches!(outcome, Some(Ok(()))));
    assert_eq!(remote.writes.borrow().as_slice(), &[settings(2025, 1800)]);

    // Fired once; the deadline is consumed.
    assert!(rec.poll(t0 + QUIET_PERIOD * 2).is_none());
}

#[test]
fn rapid_mutations_collapse_into_one_write_of_the_latest_value() {
    let remote = FakeRemote::default();
    let cache = FakeCache::default();
    let mut rec = BudgetReconciler::new(&remote, &cache);
    rec.hydrate();

    let t0 = Instant::now();
    rec.mutate(rec.settings().clone(), t0); // echo
    rec.mutate(settings(2025, 100), t0);
    rec.mutate(settings(2025, 200), t0 + Duration::from_millis(300));
    rec.mutate(settings(2025, 300), t0 + Duration::from_millis(600));

    // First deadline would have been t0 + 500ms; the restarts pushed it out.
    assert!(rec.poll(t0 + Duration::from_millis(900)).is_none());

    let outcome = rec.poll(t0 + Duration::from_millis(600) + QUIET_PERIOD);
    assert!(matches!(outcome, Some(Ok(()))));
    assert_eq!(remote.writes.borrow().as_slice(), &[settings(2025, 300)]);
}

#[test]
fn short_year_cancels_the_pending_write_without_rescheduling() {
    let remote = FakeRemote::default();
    let cache = FakeCache::default();
    let mut rec = BudgetReconciler::new(&remote, &cache);
    rec.hydrate();

    let t0 = Instant::now();
    rec.mutate(rec.settings().clone(), t0); // echo
    rec.mutate(settings(2025, 500), t0);
    assert!(rec.write_pending());

    // A year being retyped passes through a 3-digit state.
    rec.mutate(settings(202, 500), t0 + Duration::from_millis(100));
    assert!(!rec.write_pending());
    assert!(rec.poll(t0 + QUIET_PERIOD * 4).is_none());
    assert!(remote.writes.borrow().is_empty());

    // The cache still mirrors the invalid value; only remote writes are gated.
    assert_eq!(cache.stored.borrow().as_ref(), Some(&settings(202, 500)));
}

#[test]
fn failed_remote_write_is_not_retried() {
    let remote = FakeRemote::default();
    remote.fail_writes.set(true);
    let cache = FakeCache::default();
    let mut rec = BudgetReconciler::new(&remote, &cache);
    rec.hydrate();

    let t0 = Instant::now();
    rec.mutate(rec.settings().clone(), t0); // echo
    rec.mutate(settings(2025, 700), t0);

    let outcome = rec.poll(t0 + QUIET_PERIOD);
    assert!(matches!(outcome, Some(Err(_))));

    // No retry, and the in-memory value is not reverted.
    assert!(rec.poll(t0 + QUIET_PERIOD * 2).is_none());
    assert_eq!(rec.settings(), &settings(2025, 700));
}
