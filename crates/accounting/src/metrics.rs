//! Revenue / profit aggregation over the three finance ledgers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use bakeledger_core::{PeriodFilter, RollingPeriod};

use crate::entry::{EntryKind, FinanceEntry};

/// The three finance ledgers, as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinanceLedgers {
    pub income: Vec<FinanceEntry>,
    pub cogs: Vec<FinanceEntry>,
    pub expenses: Vec<FinanceEntry>,
}

impl FinanceLedgers {
    pub fn new(
        income: Vec<FinanceEntry>,
        cogs: Vec<FinanceEntry>,
        expenses: Vec<FinanceEntry>,
    ) -> Self {
        Self {
            income,
            cogs,
            expenses,
        }
    }

    pub fn ledger(&self, kind: EntryKind) -> &[FinanceEntry] {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Cogs => &self.cogs,
            EntryKind::Expense => &self.expenses,
        }
    }

    /// Restrict every ledger to a calendar year/month selection.
    pub fn filtered(&self, filter: &PeriodFilter) -> Self {
        let date_of = |e: &FinanceEntry| e.date;
        Self {
            income: filter.apply(&self.income, date_of),
            cogs: filter.apply(&self.cogs, date_of),
            expenses: filter.apply(&self.expenses, date_of),
        }
    }

    /// Restrict every ledger to a trailing window ending `today`.
    pub fn within(&self, period: RollingPeriod, today: NaiveDate) -> Self {
        let keep = |entries: &[FinanceEntry]| -> Vec<FinanceEntry> {
            entries
                .iter()
                .filter(|e| period.contains(e.date, today))
                .cloned()
                .collect()
        };
        Self {
            income: keep(&self.income),
            cogs: keep(&self.cogs),
            expenses: keep(&self.expenses),
        }
    }

    pub fn metrics(&self) -> FinancialMetrics {
        FinancialMetrics::from_totals(total(&self.income), total(&self.cogs), total(&self.expenses))
    }
}

fn total(entries: &[FinanceEntry]) -> Decimal {
    entries.iter().map(|e| e.amount).sum()
}

/// Headline figures for a period.
///
/// `gross_profit = revenue - cogs` and `net_profit = gross_profit - expenses`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub expenses: Decimal,
    pub net_profit: Decimal,
}

impl FinancialMetrics {
    pub fn from_totals(revenue: Decimal, cogs: Decimal, expenses: Decimal) -> Self {
        let gross_profit = revenue - cogs;
        Self {
            revenue,
            cogs,
            gross_profit,
            expenses,
            net_profit: gross_profit - expenses,
        }
    }
}

/// Metrics for the entries matching `filter`.
pub fn aggregate(ledgers: &FinanceLedgers, filter: &PeriodFilter) -> FinancialMetrics {
    if filter.is_all() {
        return ledgers.metrics();
    }
    ledgers.filtered(filter).metrics()
}
