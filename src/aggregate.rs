// Copyright (c) 2025 BrightLedger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard statistics derived from the raw transaction list.
//!
//! Pure functions of (transactions, month key, budget); no state, no I/O.
//! Month keys are `YYYY-MM` and matched lexically against transaction dates,
//! so a malformed date simply fails to match rather than raising.

use rust_decimal::Decimal;

use crate::models::{BudgetSettings, Transaction, TransactionType};
use crate::utils::{days_in_month, split_month_key};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Sums `amount` per type over the transactions whose date falls in the month.
pub fn monthly_totals(transactions: &[Transaction], month_key: &str) -> MonthlyTotals {
    let mut totals = MonthlyTotals {
        income: Decimal::ZERO,
        expense: Decimal::ZERO,
    };

    for t in transactions.iter().filter(|t| t.date.starts_with(month_key)) {
        match t.r#type {
            TransactionType::Income => totals.income += t.amount,
            TransactionType::Expense => totals.expense += t.amount,
        }
    }

    totals
}

/// Expense total for every calendar day of the month, in ascending day order.
///
/// Produces exactly one entry per real calendar day (leap years respected);
/// days without expenses report zero. A malformed month key yields an empty
/// series.
pub fn daily_series(transactions: &[Transaction], month_key: &str) -> Vec<(u32, Decimal)> {
    let Some((year, month)) = split_month_key(month_key) else {
        return Vec::new();
    };

    (1..=days_in_month(year, month))
        .map(|day| {
            let date = format!("{month_key}-{day:02}");
            let total = transactions
                .iter()
                .filter(|t| t.r#type == TransactionType::Expense && t.date == date)
                .map(|t| t.amount)
                .sum();
            (day, total)
        })
        .collect()
}

/// Expense totals grouped by category, in first-encountered order.
pub fn category_breakdown(transactions: &[Transaction], month_key: &str) -> Vec<(String, Decimal)> {
    let mut breakdown: Vec<(String, Decimal)> = Vec::new();

    let expenses = transactions
        .iter()
        .filter(|t| t.r#type == TransactionType::Expense && t.date.starts_with(month_key));
    for t in expenses {
        match breakdown.iter_mut().find(|(name, _)| *name == t.category) {
            Some((_, total)) => *total += t.amount,
            None => breakdown.push((t.category.clone(), t.amount)),
        }
    }

    breakdown
}

#[derive(Debug, Clone, PartialEq)]
pub enum BudgetStatus {
    /// Budget gate is off; no threshold comparison is surfaced.
    Disabled,
    Enabled {
        /// Display percentage, clamped to 100.
        percent_used: Decimal,
        /// Computed on the unclamped ratio so it stays true past 100%.
        is_over: bool,
    },
}

/// Compares monthly expense against the budget threshold.
///
/// A non-positive `monthly_limit` is a guarded edge case: the percent pins at
/// 100 and any positive spend counts as over, so no division by zero can leak
/// a non-finite value into the display layer.
pub fn budget_status(totals: &MonthlyTotals, budget: &BudgetSettings) -> BudgetStatus {
    if !budget.enabled {
        return BudgetStatus::Disabled;
    }

    if budget.monthly_limit <= Decimal::ZERO {
        return BudgetStatus::Enabled {
            percent_used: Decimal::ONE_HUNDRED,
            is_over: totals.expense > Decimal::ZERO,
        };
    }

    let ratio = totals.expense / budget.monthly_limit * Decimal::ONE_HUNDRED;
    BudgetStatus::Enabled {
        percent_used: ratio.min(Decimal::ONE_HUNDRED),
        is_over: totals.expense > budget.monthly_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionType};
    use rust_decimal::Decimal;

    fn tx(date: &str, amount: &str, r#type: TransactionType, category: &str) -> Transaction {
        Transaction {
            id: "1".to_string(),
            date: date.to_string(),
            event: "test".to_string(),
            amount: amount.parse().unwrap(),
            r#type,
            category: category.to_string(),
            remark: None,
        }
    }

    fn budget(limit: &str, enabled: bool) -> BudgetSettings {
        BudgetSettings {
            year: 2024,
            month: 3,
            monthly_limit: limit.parse().unwrap(),
            enabled,
        }
    }

    #[test]
    fn monthly_totals_sums_per_type() {
        let transactions = vec![
            tx("2024-03-05", "100.50", TransactionType::Income, "Salary"),
            tx("2024-03-10", "20.25", TransactionType::Expense, "Food"),
            tx("2024-03-20", "9.75", TransactionType::Expense, "Food"),
            tx("2024-04-01", "999", TransactionType::Expense, "Rent"),
        ];

        let totals = monthly_totals(&transactions, "2024-03");

        assert_eq!(totals.income, "100.50".parse::<Decimal>().unwrap());
        assert_eq!(totals.expense, Decimal::from(30));
    }

    #[test]
    fn monthly_totals_partition_covers_month_sum() {
        let transactions = vec![
            tx("2024-03-05", "10", TransactionType::Income, "A"),
            tx("2024-03-06", "20", TransactionType::Expense, "B"),
            tx("2024-03-07", "30", TransactionType::Income, "C"),
            tx("2024-05-01", "40", TransactionType::Expense, "D"),
        ];

        let totals = monthly_totals(&transactions, "2024-03");
        let month_sum: Decimal = transactions
            .iter()
            .filter(|t| t.date.starts_with("2024-03"))
            .map(|t| t.amount)
            .sum();

        assert_eq!(totals.income + totals.expense, month_sum);
    }

    #[test]
    fn monthly_totals_ignores_malformed_dates() {
        let transactions = vec![
            tx("not-a-date", "50", TransactionType::Expense, "Food"),
            tx("2024-03-10", "5", TransactionType::Expense, "Food"),
        ];

        let totals = monthly_totals(&transactions, "2024-03");

        assert_eq!(totals.expense, Decimal::from(5));
    }

    #[test]
    fn daily_series_has_one_entry_per_calendar_day() {
        assert_eq!(daily_series(&[], "2024-02").len(), 29); // leap year
        assert_eq!(daily_series(&[], "2023-02").len(), 28);
        assert_eq!(daily_series(&[], "2024-04").len(), 30);
        assert_eq!(daily_series(&[], "2024-01").len(), 31);
    }

    #[test]
    fn daily_series_zero_fills_and_sums() {
        let transactions = vec![
            tx("2024-02-03", "4.50", TransactionType::Expense, "Food"),
            tx("2024-02-03", "1.50", TransactionType::Expense, "Food"),
            tx("2024-02-03", "100", TransactionType::Income, "Salary"),
            tx("2024-02-29", "7", TransactionType::Expense, "Food"),
        ];

        let series = daily_series(&transactions, "2024-02");

        assert_eq!(series[0], (1, Decimal::ZERO));
        assert_eq!(series[2], (3, Decimal::from(6)));
        assert_eq!(series[28], (29, Decimal::from(7)));
    }

    #[test]
    fn daily_series_rejects_malformed_month_key() {
        assert!(daily_series(&[], "2024-2").is_empty());
        assert!(daily_series(&[], "2024-13").is_empty());
        assert!(daily_series(&[], "garbage").is_empty());
    }

    #[test]
    fn category_breakdown_keeps_first_encounter_order() {
        let transactions = vec![
            tx("2024-03-01", "10", TransactionType::Expense, "Food"),
            tx("2024-03-02", "20", TransactionType::Expense, "Transport"),
            tx("2024-03-03", "5", TransactionType::Expense, "Food"),
            tx("2024-03-04", "99", TransactionType::Income, "Salary"),
        ];

        let breakdown = category_breakdown(&transactions, "2024-03");

        assert_eq!(
            breakdown,
            vec![
                ("Food".to_string(), Decimal::from(15)),
                ("Transport".to_string(), Decimal::from(20)),
            ]
        );
    }

    #[test]
    fn budget_status_disabled_surfaces_nothing() {
        let totals = MonthlyTotals {
            income: Decimal::ZERO,
            expense: Decimal::from(5000),
        };

        assert_eq!(budget_status(&totals, &budget("100", false)), BudgetStatus::Disabled);
    }

    #[test]
    fn budget_status_clamps_percent_but_not_alert() {
        let totals = MonthlyTotals {
            income: Decimal::ZERO,
            expense: Decimal::from(300),
        };

        let status = budget_status(&totals, &budget("200", true));

        assert_eq!(
            status,
            BudgetStatus::Enabled {
                percent_used: Decimal::ONE_HUNDRED,
                is_over: true,
            }
        );
    }

    #[test]
    fn budget_status_under_limit() {
        let totals = MonthlyTotals {
            income: Decimal::ZERO,
            expense: Decimal::from(50),
        };

        let status = budget_status(&totals, &budget("200", true));

        assert_eq!(
            status,
            BudgetStatus::Enabled {
                percent_used: Decimal::from(25),
                is_over: false,
            }
        );
    }

    #[test]
    fn budget_status_zero_limit_guard() {
        let totals = MonthlyTotals {
            income: Decimal::ZERO,
            expense: Decimal::from(1),
        };

        let status = budget_status(&totals, &budget("0", true));

        assert_eq!(
            status,
            BudgetStatus::Enabled {
                percent_used: Decimal::ONE_HUNDRED,
                is_over: true,
            }
        );

        let idle = MonthlyTotals {
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        };
        assert_eq!(
            budget_status(&idle, &budget("0", true)),
            BudgetStatus::Enabled {
                percent_used: Decimal::ONE_HUNDRED,
                is_over: false,
            }
        );
    }
}
