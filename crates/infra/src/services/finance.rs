use tracing::{debug, info};

use bakeledger_accounting::{
    CategoryShare, ChartData, EntryId, EntryKind, FinanceEntry, FinanceLedgers, FinancialMetrics,
    NewFinanceEntry, aggregate, expense_breakdown,
};
use bakeledger_core::{PeriodFilter, RollingPeriod};

use super::{COGS, EXPENSES, INCOME};
use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::store::{Collection, KeyValueStore};

/// Income, cost-of-goods and expense ledgers.
#[derive(Debug, Clone)]
pub struct FinanceService<S, C> {
    store: S,
    clock: C,
}

fn collection(kind: EntryKind) -> Collection<FinanceEntry> {
    match kind {
        EntryKind::Income => INCOME,
        EntryKind::Cogs => COGS,
        EntryKind::Expense => EXPENSES,
    }
}

impl<S, C> FinanceService<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Book an entry. Only dates in the current month are accepted.
    pub fn add_entry(&self, kind: EntryKind, new: NewFinanceEntry) -> ServiceResult<FinanceEntry> {
        let entry =
            FinanceEntry::record(EntryId::new(), new, self.clock.today(), self.clock.now())?;
        let entry = collection(kind).append(&self.store, entry)?;
        info!(
            kind = kind.label(),
            entry_id = %entry.id,
            amount = %entry.amount,
            "finance entry added"
        );
        Ok(entry)
    }

    pub fn entries(&self, kind: EntryKind) -> ServiceResult<Vec<FinanceEntry>> {
        Ok(collection(kind).load(&self.store)?)
    }

    pub fn ledgers(&self) -> ServiceResult<FinanceLedgers> {
        Ok(FinanceLedgers::new(
            INCOME.load(&self.store)?,
            COGS.load(&self.store)?,
            EXPENSES.load(&self.store)?,
        ))
    }

    /// Headline metrics for a calendar year/month selection.
    pub fn metrics(&self, filter: &PeriodFilter) -> ServiceResult<FinancialMetrics> {
        let ledgers = self.ledgers()?;
        debug!(year = ?filter.year(), month = ?filter.month(), "aggregating finance metrics");
        Ok(aggregate(&ledgers, filter))
    }

    /// Headline metrics over a trailing window ending today.
    pub fn rolling_metrics(&self, period: RollingPeriod) -> ServiceResult<FinancialMetrics> {
        Ok(self.ledgers()?.within(period, self.clock.today()).metrics())
    }

    pub fn chart(&self, period: RollingPeriod) -> ServiceResult<ChartData> {
        let ledgers = self.ledgers()?.within(period, self.clock.today());
        Ok(ChartData::from_ledgers(&ledgers))
    }

    pub fn expense_breakdown(&self, filter: &PeriodFilter) -> ServiceResult<Vec<CategoryShare>> {
        let expenses = EXPENSES.load(&self.store)?;
        Ok(expense_breakdown(&filter.apply(&expenses, |e| e.date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::clock::FixedClock;
    use crate::store::InMemoryStore;

    fn service() -> FinanceService<InMemoryStore, FixedClock> {
        FinanceService::new(
            InMemoryStore::new(),
            FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()),
        )
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn book(
        svc: &FinanceService<InMemoryStore, FixedClock>,
        kind: EntryKind,
        date: NaiveDate,
        amount: Decimal,
        description: &str,
        category: &str,
    ) {
        svc.add_entry(kind, NewFinanceEntry::new(date, amount, description, category))
            .unwrap();
    }

    #[test]
    fn metrics_over_booked_entries() {
        let svc = service();
        book(&svc, EntryKind::Income, march(1), dec!(100), "Counter sales", "sales");
        book(&svc, EntryKind::Income, march(2), dec!(200), "Catering", "sales");
        book(&svc, EntryKind::Cogs, march(2), dec!(50), "Flour", "ingredients");
        book(&svc, EntryKind::Expense, march(3), dec!(30), "Gas", "utilities");

        let m = svc.metrics(&PeriodFilter::all()).unwrap();
        assert_eq!(m.revenue, dec!(300));
        assert_eq!(m.gross_profit, dec!(250));
        assert_eq!(m.net_profit, dec!(220));

        let feb = PeriodFilter::new(Some(2024), Some(2)).unwrap();
        assert_eq!(svc.metrics(&feb).unwrap(), FinancialMetrics::default());
    }

    #[test]
    fn entries_outside_current_month_are_rejected() {
        let svc = service();
        let err = svc
            .add_entry(
                EntryKind::Expense,
                NewFinanceEntry::new(
                    NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                    dec!(5),
                    "Rent",
                    "rent",
                ),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(svc.entries(EntryKind::Expense).unwrap().is_empty());
    }

    #[test]
    fn weekly_chart_and_breakdown() {
        let svc = service();
        book(&svc, EntryKind::Income, march(2), dec!(10), "Old", "sales");
        book(&svc, EntryKind::Income, march(18), dec!(20), "Recent", "sales");
        book(&svc, EntryKind::Expense, march(19), dec!(30), "Power", "utilities");

        let chart = svc.chart(RollingPeriod::Weekly).unwrap();
        assert_eq!(chart.labels, vec![march(18), march(19)]);
        assert_eq!(chart.income, vec![dec!(20), dec!(0)]);
        assert_eq!(svc.rolling_metrics(RollingPeriod::Weekly).unwrap().revenue, dec!(20));

        let shares = svc.expense_breakdown(&PeriodFilter::all()).unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].share, dec!(100));
    }
}
