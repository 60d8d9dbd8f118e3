//! Settlement summaries and "latest per group" views.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use bakeledger_core::{DateRange, Dated, PaymentStatus, latest};
use bakeledger_inventory::PurchaseRecord;

use crate::bill::Bill;
use crate::salary::Salary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillsSummary {
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub partially_paid_amount: Decimal,
    pub count: usize,
}

impl BillsSummary {
    pub fn from_bills(bills: &[Bill]) -> Self {
        bills.iter().fold(Self::default(), |mut acc, b| {
            acc.total_amount += b.amount;
            match b.payment_status {
                PaymentStatus::Paid => acc.paid_amount += b.amount,
                PaymentStatus::Unpaid => acc.unpaid_amount += b.amount,
                PaymentStatus::Partial => acc.partially_paid_amount += b.amount,
            }
            acc.count += 1;
            acc
        })
    }
}

/// Salary totals. Partially paid salaries count towards the total only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalariesSummary {
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub count: usize,
}

impl SalariesSummary {
    pub fn from_salaries(salaries: &[Salary]) -> Self {
        salaries.iter().fold(Self::default(), |mut acc, s| {
            acc.total_amount += s.amount;
            match s.payment_status {
                PaymentStatus::Paid => acc.paid_amount += s.amount,
                PaymentStatus::Unpaid => acc.unpaid_amount += s.amount,
                PaymentStatus::Partial => {}
            }
            acc.count += 1;
            acc
        })
    }
}

/// Purchase cost totals split by whether a payment method has been recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasesSummary {
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub count: usize,
}

impl PurchasesSummary {
    pub fn from_purchases(purchases: &[PurchaseRecord]) -> Self {
        purchases.iter().fold(Self::default(), |mut acc, p| {
            acc.total_amount += p.cost;
            if p.is_paid() {
                acc.paid_amount += p.cost;
            } else {
                acc.unpaid_amount += p.cost;
            }
            acc.count += 1;
            acc
        })
    }
}

/// Records dated within `range` (inclusive), in stored order.
pub fn within_range<T: Dated + Clone>(records: &[T], range: DateRange) -> Vec<T> {
    records
        .iter()
        .filter(|r| range.contains(r.date()))
        .cloned()
        .collect()
}

fn latest_per<T, F>(records: &[T], key: F) -> BTreeMap<String, T>
where
    T: Dated + Clone,
    F: Fn(&T) -> &str,
{
    let mut groups: BTreeMap<String, Vec<&T>> = BTreeMap::new();
    for r in records {
        groups.entry(key(r).to_string()).or_default().push(r);
    }
    groups
        .into_iter()
        .filter_map(|(k, group)| latest(group).map(|r| (k, r.clone())))
        .collect()
}

/// Most recent bill in each category.
pub fn latest_bill_per_category(bills: &[Bill]) -> BTreeMap<String, Bill> {
    latest_per(bills, |b| b.category.as_str())
}

/// Most recent salary payment for each employee.
pub fn latest_salary_per_employee(salaries: &[Salary]) -> BTreeMap<String, Salary> {
    latest_per(salaries, |s| s.employee_name.as_str())
}
