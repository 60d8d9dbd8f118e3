//! Historical views over the ledgers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use bakeledger_core::{DateRange, sort_newest_first};

use crate::balance::ItemSummary;
use crate::item::ItemId;
use crate::purchase::PurchaseRecord;
use crate::usage::UsageRecord;

/// Quantity consumed on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyQuantity {
    pub date: NaiveDate,
    pub quantity: Decimal,
}

/// One row of an item's purchase history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseHistoryEntry {
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub cost: Decimal,
    pub supplier: String,
}

/// Usage of one item summed per date, most recent date first.
pub fn usage_by_date(item_id: ItemId, usage: &[UsageRecord]) -> Vec<DailyQuantity> {
    let mut per_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in usage.iter().filter(|u| u.item_id == item_id) {
        *per_day.entry(record.date).or_default() += record.quantity;
    }
    per_day
        .into_iter()
        .rev()
        .map(|(date, quantity)| DailyQuantity { date, quantity })
        .collect()
}

/// Purchases of one item, latest first.
pub fn purchase_history(
    item_id: ItemId,
    purchases: &[PurchaseRecord],
) -> Vec<PurchaseHistoryEntry> {
    let mut own: Vec<PurchaseRecord> = purchases
        .iter()
        .filter(|p| p.item_id == item_id)
        .cloned()
        .collect();
    sort_newest_first(&mut own);
    own.into_iter()
        .map(|p| PurchaseHistoryEntry {
            date: p.date,
            quantity: p.quantity,
            cost: p.cost,
            supplier: p.supplier,
        })
        .collect()
}

pub fn purchases_in_range(purchases: &[PurchaseRecord], range: DateRange) -> Vec<PurchaseRecord> {
    purchases
        .iter()
        .filter(|p| range.contains(p.date))
        .cloned()
        .collect()
}

pub fn usage_in_range(usage: &[UsageRecord], range: DateRange) -> Vec<UsageRecord> {
    usage
        .iter()
        .filter(|u| range.contains(u.date))
        .cloned()
        .collect()
}

/// Summaries keyed by supplier company, companies in alphabetical order.
pub fn group_by_company(summaries: &[ItemSummary]) -> BTreeMap<String, Vec<ItemSummary>> {
    let mut grouped: BTreeMap<String, Vec<ItemSummary>> = BTreeMap::new();
    for s in summaries {
        grouped
            .entry(s.item.company_name.clone())
            .or_default()
            .push(s.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use crate::balance::summarize_all;
    use crate::item::{InventoryItem, ItemCategory, NewInventoryItem};
    use crate::purchase::{NewPurchase, PurchaseId};
    use crate::usage::{NewUsage, UsageId};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn used(item_id: ItemId, qty: Decimal, d: u32) -> UsageRecord {
        let new = NewUsage::new(item_id, qty).on(day(d));
        UsageRecord::record(UsageId::new(), new, day(d), Utc::now()).unwrap()
    }

    fn bought(item_id: ItemId, qty: Decimal, d: u32, supplier: &str) -> PurchaseRecord {
        PurchaseRecord::record(
            PurchaseId::new(),
            NewPurchase::new(item_id, qty).on(day(d)).from_supplier(supplier),
            day(d),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn usage_is_summed_per_day_newest_first() {
        let item = ItemId::new();
        let other = ItemId::new();
        let usage = vec![
            used(item, dec!(1), 3),
            used(item, dec!(2), 5),
            used(item, dec!(0.5), 3),
            used(other, dec!(9), 3),
        ];

        let history = usage_by_date(item, &usage);
        assert_eq!(
            history,
            vec![
                DailyQuantity { date: day(5), quantity: dec!(2) },
                DailyQuantity { date: day(3), quantity: dec!(1.5) },
            ]
        );
    }

    #[test]
    fn purchase_history_is_latest_first() {
        let item = ItemId::new();
        let purchases = vec![
            bought(item, dec!(1), 1, "Mill A"),
            bought(item, dec!(4), 9, "Mill B"),
        ];
        let history = purchase_history(item, &purchases);
        assert_eq!(history[0].supplier, "Mill B");
        assert_eq!(history[1].date, day(1));
    }

    #[test]
    fn range_filters_are_inclusive() {
        let item = ItemId::new();
        let purchases = vec![
            bought(item, dec!(1), 1, ""),
            bought(item, dec!(1), 10, ""),
            bought(item, dec!(1), 20, ""),
        ];
        let range = DateRange::new(day(1), day(10)).unwrap();
        assert_eq!(purchases_in_range(&purchases, range).len(), 2);

        let usage = vec![used(item, dec!(1), 11)];
        assert!(usage_in_range(&usage, range).is_empty());
    }

    #[test]
    fn summaries_group_by_company() {
        let mk = |name: &str, company: &str| {
            InventoryItem::create(
                ItemId::new(),
                NewInventoryItem::new(name, company, ItemCategory::Packaging),
                Utc::now(),
            )
            .unwrap()
        };
        let items = vec![mk("Box", "Cartons Co"), mk("Ribbon", "Acme"), mk("Bag", "Cartons Co")];
        let grouped = group_by_company(&summarize_all(&items, &[], &[]));

        let companies: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(companies, vec!["Acme", "Cartons Co"]);
        assert_eq!(grouped["Cartons Co"].len(), 2);
    }
}
