//! Chart-ready series derived from the finance ledgers.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entry::FinanceEntry;
use crate::metrics::FinanceLedgers;

/// Parallel series for a time chart.
///
/// `labels` is the sorted union of every date present in any ledger; each series holds
/// one value per label, zero where that ledger has nothing on the date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<NaiveDate>,
    pub income: Vec<Decimal>,
    pub cogs: Vec<Decimal>,
    pub expenses: Vec<Decimal>,
}

fn daily_totals(entries: &[FinanceEntry]) -> BTreeMap<NaiveDate, Decimal> {
    let mut totals = BTreeMap::new();
    for e in entries {
        *totals.entry(e.date).or_insert(Decimal::ZERO) += e.amount;
    }
    totals
}

impl ChartData {
    pub fn from_ledgers(ledgers: &FinanceLedgers) -> Self {
        let income = daily_totals(&ledgers.income);
        let cogs = daily_totals(&ledgers.cogs);
        let expenses = daily_totals(&ledgers.expenses);

        let labels: Vec<NaiveDate> = income
            .keys()
            .chain(cogs.keys())
            .chain(expenses.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let series = |totals: &BTreeMap<NaiveDate, Decimal>| -> Vec<Decimal> {
            labels
                .iter()
                .map(|d| totals.get(d).copied().unwrap_or(Decimal::ZERO))
                .collect()
        };

        Self {
            income: series(&income),
            cogs: series(&cogs),
            expenses: series(&expenses),
            labels,
        }
    }
}

/// One slice of the expense pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Percentage of total expenses, two decimal places; zero when there are no expenses.
    pub share: Decimal,
}

/// Expenses summed per category, largest first (ties by category name).
pub fn expense_breakdown(expenses: &[FinanceEntry]) -> Vec<CategoryShare> {
    let mut per_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for e in expenses {
        *per_category.entry(e.category.as_str()).or_insert(Decimal::ZERO) += e.amount;
    }
    let total: Decimal = per_category.values().copied().sum();

    let mut shares: Vec<CategoryShare> = per_category
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.to_string(),
            amount,
            share: if total.is_zero() {
                Decimal::ZERO
            } else {
                (amount * Decimal::ONE_HUNDRED / total).round_dp(2)
            },
        })
        .collect();
    shares.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    shares
}
