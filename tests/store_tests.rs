// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use brightledger::api::ApiError;
use brightledger::models::{NewTransaction, Transaction, TransactionType};
use brightledger::store::{LedgerApi, REFRESH_INTERVAL, TransactionStore};

fn tx(id: &str, date: &str, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        event: format!("event-{id}"),
        amount: Decimal::from(amount),
        r#type: TransactionType::Expense,
        category: "General".to_string(),
        remark: None,
    }
}

fn draft(date: &str, amount: i64) -> NewTransaction {
    NewTransaction {
        date: date.to_string(),
        event: "groceries".to_string(),
        amount: Decimal::from(amount),
        r#type: TransactionType::Expense,
        category: "Food".to_string(),
        remark: String::new(),
    }
}

/// Records every call in order so tests can assert on sequencing, not just
/// final state.
#[derive(Default)]
struct FakeLedger {
    data: RefCell<Vec<Transaction>>,
    calls: RefCell<Vec<String>>,
    fail_fetch: Cell<bool>,
}

impl LedgerApi for FakeLedger {
    fn fetch_all(&self) -> Result<Vec<Transaction>, ApiError> {
        self.calls.borrow_mut().push("fetch".to_string());
        if self.fail_fetch.get() {
            return Err(ApiError::Status("unavailable".into()));
        }
        Ok(self.data.borrow().clone())
    }

    fn add(&self, d: &NewTransaction) -> Result<(), ApiError> {
        self.calls.borrow_mut().push("add".to_string());
        let id = format!("srv-{}", self.data.borrow().len() + 1);
        self.data.borrow_mut().push(Transaction {
            id,
            date: d.date.clone(),
            event: d.event.clone(),
            amount: d.amount,
            r#type: d.r#type,
            category: d.category.clone(),
            remark: (!d.remark.is_empty()).then(|| d.remark.clone()),
        });
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("delete {id}"));
        self.data.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }
}

#[test]
fn refresh_replaces_the_list_wholesale() {
    let api = FakeLedger::default();
    *api.data.borrow_mut() = vec![tx("1", "2025-06-01", 10)];

    let mut store = TransactionStore::new();
    store.refresh(&api, Instant::now()).unwrap();
    assert_eq!(store.transactions().len(), 1);

    *api.data.borrow_mut() = vec![tx("2", "2025-06-02", 20), tx("3", "2025-06-03", 30)];
    store.refresh(&api, Instant::now()).unwrap();

    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["2", "3"]);
}

#[test]
fn failed_refresh_keeps_the_previous_list() {
    let api = FakeLedger::default();
    *api.data.borrow_mut() = vec![tx("1", "2025-06-01", 10)];

    let mut store = TransactionStore::new();
    store.refresh(&api, Instant::now()).unwrap();

    api.fail_fetch.set(true);
    assert!(store.refresh(&api, Instant::now()).is_err());
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].id, "1");
}

#[test]
fn edit_deletes_the_old_record_before_adding_the_replacement() {
    let api = FakeLedger::default();
    *api.data.borrow_mut() = vec![tx("1", "2025-06-01", 10)];

    let mut store = TransactionStore::new();
    store
        .add_or_edit(&api, &draft("2025-06-05", 42), Some("1"), Instant::now())
        .unwrap();

    assert_eq!(
        api.calls.borrow().as_slice(),
        ["delete 1", "add", "fetch"]
    );
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].event, "groceries");
}

#[test]
fn add_without_editing_id_skips_the_delete() {
    let api = FakeLedger::default();

    let mut store = TransactionStore::new();
    store
        .add_or_edit(&api, &draft("2025-06-05", 42), None, Instant::now())
        .unwrap();

    assert_eq!(api.calls.borrow().as_slice(), ["add", "fetch"]);
}

#[test]
fn delete_refreshes_afterwards() {
    let api = FakeLedger::default();
    *api.data.borrow_mut() = vec![tx("1", "2025-06-01", 10), tx("2", "2025-06-02", 20)];

    let mut store = TransactionStore::new();
    store.refresh(&api, Instant::now()).unwrap();
    store.delete(&api, "1", Instant::now()).unwrap();

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].id, "2");
}

#[test]
fn import_prepends_and_the_next_refresh_discards_it() {
    let api = FakeLedger::default();
    *api.data.borrow_mut() = vec![tx("srv", "2025-06-01", 10)];

    let mut store = TransactionStore::new();
    store.refresh(&api, Instant::now()).unwrap();

    let count = store.import(vec![tx("imp-a", "2025-05-01", 5), tx("imp-b", "2025-05-02", 6)]);
    assert_eq!(count, 2);

    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["imp-a", "imp-b", "srv"]);

    // Imported rows are session-local; a refresh converges on the remote list.
    store.refresh(&api, Instant::now()).unwrap();
    let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["srv"]);
}

#[test]
fn adding_an_expense_raises_the_monthly_total_by_at_least_that_amount() {
    let api = FakeLedger::default();
    *api.data.borrow_mut() = vec![tx("1", "2025-06-01", 10)];

    let mut store = TransactionStore::new();
    store.refresh(&api, Instant::now()).unwrap();
    let before = brightledger::aggregate::monthly_totals(store.transactions(), "2025-06");

    store
        .add_or_edit(&api, &draft("2025-06-05", 42), None, Instant::now())
        .unwrap();
    let after = brightledger::aggregate::monthly_totals(store.transactions(), "2025-06");

    assert!(after.expense >= before.expense + Decimal::from(42));
}

#[test]
fn refresh_due_honors_the_polling_interval() {
    let api = FakeLedger::default();
    let mut store = TransactionStore::new();

    let t0 = Instant::now();
    assert!(store.refresh_due(t0));

    store.refresh(&api, t0).unwrap();
    assert!(!store.refresh_due(t0 + REFRESH_INTERVAL - Duration::from_secs(1)));
    assert!(store.refresh_due(t0 + REFRESH_INTERVAL));
}
