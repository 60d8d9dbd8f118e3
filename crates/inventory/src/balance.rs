//! Derived per-item balances over the purchase and usage ledgers.
//!
//! Nothing here is persisted: balances are recomputed from the full ledgers every
//! time they are asked for.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use bakeledger_core::{Dated, latest, sort_newest_first};

use crate::item::{InventoryItem, ItemId};
use crate::purchase::PurchaseRecord;
use crate::stock::{StockStatus, classify};
use crate::usage::UsageRecord;

/// A ledger line that moves stock of one item.
pub trait LedgerEntry: Dated {
    fn item_id(&self) -> ItemId;
    fn quantity(&self) -> Decimal;
}

/// Totals and latest entries for one item.
///
/// Invariant: `remaining == total_purchased - total_used`. `remaining` may be negative
/// when more was used than purchased; nothing prevents over-consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBalance {
    pub total_purchased: Decimal,
    pub total_used: Decimal,
    pub remaining: Decimal,
    pub latest_purchase: Option<PurchaseRecord>,
    pub latest_usage: Option<UsageRecord>,
}

impl ItemBalance {
    fn from_entries(purchases: &[&PurchaseRecord], usage: &[&UsageRecord]) -> Self {
        let total_purchased = sum_quantities(purchases);
        let total_used = sum_quantities(usage);

        Self {
            total_purchased,
            total_used,
            remaining: total_purchased - total_used,
            latest_purchase: latest(purchases.iter().copied()).cloned(),
            latest_usage: latest(usage.iter().copied()).cloned(),
        }
    }
}

fn sum_quantities<T: LedgerEntry>(entries: &[&T]) -> Decimal {
    entries.iter().map(|e| e.quantity()).sum()
}

fn entries_for<T: LedgerEntry>(item_id: ItemId, records: &[T]) -> Vec<&T> {
    records.iter().filter(|r| r.item_id() == item_id).collect()
}

fn group_by_item<T: LedgerEntry>(records: &[T]) -> HashMap<ItemId, Vec<&T>> {
    let mut grouped: HashMap<ItemId, Vec<&T>> = HashMap::new();
    for r in records {
        grouped.entry(r.item_id()).or_default().push(r);
    }
    grouped
}

/// Balance of one item over the full ledgers.
///
/// An item with no entries gets zero totals and no latest records.
pub fn compute_balance(
    item_id: ItemId,
    purchases: &[PurchaseRecord],
    usage: &[UsageRecord],
) -> ItemBalance {
    ItemBalance::from_entries(&entries_for(item_id, purchases), &entries_for(item_id, usage))
}

/// Item definition together with its derived balance and stock status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[serde(flatten)]
    pub item: InventoryItem,
    #[serde(flatten)]
    pub balance: ItemBalance,
    pub status: StockStatus,
}

impl ItemSummary {
    fn new(item: InventoryItem, balance: ItemBalance) -> Self {
        let status = classify(balance.remaining, item.min_level);
        Self {
            item,
            balance,
            status,
        }
    }

    pub fn remaining(&self) -> Decimal {
        self.balance.remaining
    }
}

/// Summary plus the item's own ledger entries, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    #[serde(flatten)]
    pub summary: ItemSummary,
    pub purchases: Vec<PurchaseRecord>,
    pub usage: Vec<UsageRecord>,
}

/// Summaries for every active item, in item order.
///
/// Ledgers are grouped once up front instead of being rescanned per item.
pub fn summarize_all(
    items: &[InventoryItem],
    purchases: &[PurchaseRecord],
    usage: &[UsageRecord],
) -> Vec<ItemSummary> {
    let purchases_by_item = group_by_item(purchases);
    let usage_by_item = group_by_item(usage);

    items
        .iter()
        .filter(|item| item.active)
        .map(|item| {
            let p = purchases_by_item.get(&item.id).map(Vec::as_slice).unwrap_or(&[]);
            let u = usage_by_item.get(&item.id).map(Vec::as_slice).unwrap_or(&[]);
            ItemSummary::new(item.clone(), ItemBalance::from_entries(p, u))
        })
        .collect()
}

/// Full detail for one item, active or not.
pub fn item_detail(
    item: &InventoryItem,
    purchases: &[PurchaseRecord],
    usage: &[UsageRecord],
) -> ItemDetail {
    let own_purchases = entries_for(item.id, purchases);
    let own_usage = entries_for(item.id, usage);
    let balance = ItemBalance::from_entries(&own_purchases, &own_usage);

    let mut purchases: Vec<PurchaseRecord> = own_purchases.into_iter().cloned().collect();
    let mut usage: Vec<UsageRecord> = own_usage.into_iter().cloned().collect();
    sort_newest_first(&mut purchases);
    sort_newest_first(&mut usage);

    ItemDetail {
        summary: ItemSummary::new(item.clone(), balance),
        purchases,
        usage,
    }
}
