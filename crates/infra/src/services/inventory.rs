use std::collections::BTreeMap;

use tracing::{debug, info};

use bakeledger_core::DateRange;
use bakeledger_inventory::{
    DailyQuantity, InventoryItem, ItemDetail, ItemId, ItemSummary, ItemUpdate, NewInventoryItem,
    NewPurchase, NewUsage, PurchaseHistoryEntry, PurchaseId, PurchaseRecord, StockOverview, UsageId,
    UsageRecord, group_by_company, item_detail, purchase_history, purchases_in_range,
    reorder_alerts, summarize_all, usage_by_date, usage_in_range,
};

use bakeledger_core::DomainError;

use super::{ITEMS, PURCHASES, USAGE};
use crate::clock::Clock;
use crate::error::ServiceResult;
use crate::store::KeyValueStore;

/// Item definitions plus the purchase and usage ledgers.
#[derive(Debug, Clone)]
pub struct InventoryService<S, C> {
    store: S,
    clock: C,
}

/// What a hard delete removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedItem {
    pub item: InventoryItem,
    pub purchases_removed: usize,
    pub usage_removed: usize,
}

impl<S, C> InventoryService<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn add_item(&self, new: NewInventoryItem) -> ServiceResult<InventoryItem> {
        new.validate()?;
        let existing = ITEMS.load(&self.store)?;
        if existing
            .iter()
            .any(|i| i.active && i.is_same_item(&new.name, &new.company_name, new.category))
        {
            return Err(DomainError::conflict(format!(
                "an item named '{}' from '{}' already exists in this category",
                new.name.trim(),
                new.company_name.trim()
            ))
            .into());
        }

        let item = InventoryItem::create(ItemId::new(), new, self.clock.now())?;
        let item = ITEMS.append(&self.store, item)?;
        info!(item_id = %item.id, name = %item.name, "inventory item added");
        Ok(item)
    }

    pub fn items(&self) -> ServiceResult<Vec<InventoryItem>> {
        Ok(ITEMS.load(&self.store)?)
    }

    pub fn active_items(&self) -> ServiceResult<Vec<InventoryItem>> {
        let mut items = ITEMS.load(&self.store)?;
        items.retain(|i| i.active);
        Ok(items)
    }

    pub fn update_item(&self, id: ItemId, update: ItemUpdate) -> ServiceResult<InventoryItem> {
        let now = self.clock.now();
        let item = ITEMS.update(&self.store, &id, |item| item.apply_update(update, now))?;
        info!(item_id = %id, "inventory item updated");
        Ok(item)
    }

    pub fn deactivate_item(&self, id: ItemId) -> ServiceResult<InventoryItem> {
        let now = self.clock.now();
        let item = ITEMS.update(&self.store, &id, |item| {
            item.deactivate(now);
            Ok(())
        })?;
        info!(item_id = %id, "inventory item deactivated");
        Ok(item)
    }

    /// Hard delete. The item's purchases and usage go first and the item row last,
    /// so a failed write never leaves ledger entries pointing at a missing item.
    pub fn delete_item(&self, id: ItemId) -> ServiceResult<DeletedItem> {
        ITEMS.find(&self.store, &id)?;
        let purchases_removed = PURCHASES.retain(&self.store, |p| p.item_id != id)?;
        let usage_removed = USAGE.retain(&self.store, |u| u.item_id != id)?;
        let item = ITEMS.remove(&self.store, &id)?;
        info!(item_id = %id, purchases_removed, usage_removed, "inventory item deleted");
        Ok(DeletedItem {
            item,
            purchases_removed,
            usage_removed,
        })
    }

    pub fn add_purchase(&self, new: NewPurchase) -> ServiceResult<PurchaseRecord> {
        ITEMS.find(&self.store, &new.item_id)?;
        let record =
            PurchaseRecord::record(PurchaseId::new(), new, self.clock.today(), self.clock.now())?;
        let record = PURCHASES.append(&self.store, record)?;
        info!(
            purchase_id = %record.id,
            item_id = %record.item_id,
            quantity = %record.quantity,
            "purchase recorded"
        );
        Ok(record)
    }

    pub fn purchases(&self) -> ServiceResult<Vec<PurchaseRecord>> {
        Ok(PURCHASES.load(&self.store)?)
    }

    pub fn purchases_for_item(&self, id: ItemId) -> ServiceResult<Vec<PurchaseRecord>> {
        let mut purchases = PURCHASES.load(&self.store)?;
        purchases.retain(|p| p.item_id == id);
        Ok(purchases)
    }

    pub fn delete_purchase(&self, id: PurchaseId) -> ServiceResult<PurchaseRecord> {
        let removed = PURCHASES.remove(&self.store, &id)?;
        info!(purchase_id = %id, "purchase deleted");
        Ok(removed)
    }

    pub fn add_usage(&self, new: NewUsage) -> ServiceResult<UsageRecord> {
        ITEMS.find(&self.store, &new.item_id)?;
        let record =
            UsageRecord::record(UsageId::new(), new, self.clock.today(), self.clock.now())?;
        let record = USAGE.append(&self.store, record)?;
        info!(
            usage_id = %record.id,
            item_id = %record.item_id,
            quantity = %record.quantity,
            "usage recorded"
        );
        Ok(record)
    }

    pub fn usage(&self) -> ServiceResult<Vec<UsageRecord>> {
        Ok(USAGE.load(&self.store)?)
    }

    pub fn usage_for_item(&self, id: ItemId) -> ServiceResult<Vec<UsageRecord>> {
        let mut usage = USAGE.load(&self.store)?;
        usage.retain(|u| u.item_id == id);
        Ok(usage)
    }

    pub fn delete_usage(&self, id: UsageId) -> ServiceResult<UsageRecord> {
        let removed = USAGE.remove(&self.store, &id)?;
        info!(usage_id = %id, "usage record deleted");
        Ok(removed)
    }

    /// Balance and stock status of every active item.
    pub fn summaries(&self) -> ServiceResult<Vec<ItemSummary>> {
        let items = ITEMS.load(&self.store)?;
        let purchases = PURCHASES.load(&self.store)?;
        let usage = USAGE.load(&self.store)?;
        debug!(
            items = items.len(),
            purchases = purchases.len(),
            usage = usage.len(),
            "summarizing inventory"
        );
        Ok(summarize_all(&items, &purchases, &usage))
    }

    pub fn item_detail(&self, id: ItemId) -> ServiceResult<ItemDetail> {
        let item = ITEMS.find(&self.store, &id)?;
        let purchases = PURCHASES.load(&self.store)?;
        let usage = USAGE.load(&self.store)?;
        Ok(item_detail(&item, &purchases, &usage))
    }

    pub fn overview(&self) -> ServiceResult<StockOverview> {
        Ok(StockOverview::from_summaries(&self.summaries()?))
    }

    pub fn reorder_alerts(&self) -> ServiceResult<Vec<ItemSummary>> {
        let summaries = self.summaries()?;
        Ok(reorder_alerts(&summaries).into_iter().cloned().collect())
    }

    pub fn usage_history(&self, id: ItemId) -> ServiceResult<Vec<DailyQuantity>> {
        Ok(usage_by_date(id, &USAGE.load(&self.store)?))
    }

    pub fn purchase_history(&self, id: ItemId) -> ServiceResult<Vec<PurchaseHistoryEntry>> {
        Ok(purchase_history(id, &PURCHASES.load(&self.store)?))
    }

    pub fn purchases_between(&self, range: DateRange) -> ServiceResult<Vec<PurchaseRecord>> {
        Ok(purchases_in_range(&PURCHASES.load(&self.store)?, range))
    }

    pub fn usage_between(&self, range: DateRange) -> ServiceResult<Vec<UsageRecord>> {
        Ok(usage_in_range(&USAGE.load(&self.store)?, range))
    }

    pub fn by_company(&self) -> ServiceResult<BTreeMap<String, Vec<ItemSummary>>> {
        Ok(group_by_company(&self.summaries()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use bakeledger_core::PaymentMethod;
    use bakeledger_inventory::{ItemCategory, StockStatus};

    use crate::clock::FixedClock;
    use crate::store::failing::FailingStore;
    use crate::store::{InMemoryStore, keys};

    fn service() -> InventoryService<InMemoryStore, FixedClock> {
        InventoryService::new(
            InMemoryStore::new(),
            FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()),
        )
    }

    fn flour(svc: &InventoryService<InMemoryStore, FixedClock>) -> InventoryItem {
        let new = NewInventoryItem::new("Flour", "Acme Mills", ItemCategory::RawMaterials)
            .with_min_level(dec!(5));
        svc.add_item(new).unwrap()
    }

    #[test]
    fn purchase_and_usage_flow_into_summary() {
        let svc = service();
        let item = flour(&svc);
        let jan_first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        svc.add_purchase(NewPurchase::new(item.id, dec!(10)).on(jan_first)).unwrap();
        svc.add_usage(NewUsage::new(item.id, dec!(3))).unwrap();

        let summaries = svc.summaries().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].remaining(), dec!(7));
        assert_eq!(summaries[0].status, StockStatus::InStock);

        let usage = svc.usage().unwrap();
        assert_eq!(usage[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn duplicate_item_is_a_conflict() {
        let svc = service();
        flour(&svc);
        let err = svc
            .add_item(NewInventoryItem::new(" flour ", "ACME MILLS", ItemCategory::RawMaterials))
            .unwrap_err();
        assert!(matches!(err, crate::error::ServiceError::Domain(DomainError::Conflict(_))));

        svc.add_item(NewInventoryItem::new("Flour", "Acme Mills", ItemCategory::Supplies))
            .unwrap();
    }

    #[test]
    fn ledger_entries_need_an_existing_item() {
        let svc = service();
        let err = svc.add_purchase(NewPurchase::new(ItemId::new(), dec!(1))).unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.purchases().unwrap().is_empty());
    }

    #[test]
    fn delete_cascades_and_leaves_no_orphans() {
        let svc = service();
        let doomed = flour(&svc);
        let kept = svc
            .add_item(NewInventoryItem::new("Sugar", "Acme Mills", ItemCategory::RawMaterials))
            .unwrap();
        for item in [&doomed, &kept] {
            svc.add_purchase(NewPurchase::new(item.id, dec!(4))).unwrap();
            svc.add_purchase(NewPurchase::new(item.id, dec!(1))).unwrap();
            svc.add_usage(NewUsage::new(item.id, dec!(2))).unwrap();
        }

        let deleted = svc.delete_item(doomed.id).unwrap();
        assert_eq!(deleted.purchases_removed, 2);
        assert_eq!(deleted.usage_removed, 1);

        let item_ids: Vec<ItemId> = svc.items().unwrap().iter().map(|i| i.id).collect();
        assert!(svc.purchases().unwrap().iter().all(|p| item_ids.contains(&p.item_id)));
        assert!(svc.usage().unwrap().iter().all(|u| item_ids.contains(&u.item_id)));
        assert_eq!(svc.purchases().unwrap().len(), 2);

        assert!(svc.delete_item(doomed.id).unwrap_err().is_not_found());
    }

    #[test]
    fn overview_counts_tiers() {
        let svc = service();
        let low = flour(&svc);
        svc.add_purchase(NewPurchase::new(low.id, dec!(5))).unwrap();
        svc.add_item(NewInventoryItem::new("Boxes", "Cartons Co", ItemCategory::Packaging))
            .unwrap();
        let plenty = svc
            .add_item(NewInventoryItem::new("Butter", "Dairy Co", ItemCategory::RawMaterials))
            .unwrap();
        svc.add_purchase(NewPurchase::new(plenty.id, dec!(50))).unwrap();

        let overview = svc.overview().unwrap();
        assert_eq!(
            overview,
            StockOverview {
                total_items: 3,
                low_stock: 1,
                out_of_stock: 1,
            }
        );
        assert_eq!(svc.reorder_alerts().unwrap().len(), 2);
    }

    #[test]
    fn deactivated_items_drop_out_of_summaries_but_keep_detail() {
        let svc = service();
        let item = flour(&svc);
        svc.add_purchase(NewPurchase::new(item.id, dec!(2)).paid_by(PaymentMethod::Cash))
            .unwrap();
        svc.deactivate_item(item.id).unwrap();

        assert!(svc.summaries().unwrap().is_empty());
        assert!(svc.active_items().unwrap().is_empty());
        assert_eq!(svc.item_detail(item.id).unwrap().purchases.len(), 1);
    }

    #[test]
    fn latest_purchase_breaks_same_day_ties_by_entry_time() {
        let svc = service();
        let item = flour(&svc);
        svc.add_purchase(NewPurchase::new(item.id, dec!(1))).unwrap();
        svc.clock.advance(Duration::minutes(5));
        let second = svc.add_purchase(NewPurchase::new(item.id, dec!(2))).unwrap();

        let detail = svc.item_detail(item.id).unwrap();
        assert_eq!(detail.summary.balance.latest_purchase, Some(second));
        assert_eq!(detail.summary.balance.total_purchased, dec!(3));
    }

    #[test]
    fn update_and_delete_single_records() {
        let svc = service();
        let item = flour(&svc);
        let updated = svc
            .update_item(
                item.id,
                ItemUpdate {
                    min_level: Some(None),
                    ..ItemUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.min_level, None);

        let usage = svc.add_usage(NewUsage::new(item.id, dec!(1))).unwrap();
        svc.delete_usage(usage.id).unwrap();
        assert!(svc.delete_usage(usage.id).unwrap_err().is_not_found());
        assert_eq!(svc.item_detail(item.id).unwrap().summary.remaining(), Decimal::ZERO);
    }

    #[test]
    fn history_views() {
        let svc = service();
        let item = flour(&svc);
        svc.add_usage(NewUsage::new(item.id, dec!(1))).unwrap();
        svc.add_usage(NewUsage::new(item.id, dec!(2))).unwrap();
        let history = svc.usage_history(item.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].quantity, dec!(3));

        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let range = DateRange::new(day, day).unwrap();
        assert_eq!(svc.usage_between(range).unwrap().len(), 2);
        assert!(svc.purchases_between(range).unwrap().is_empty());
        assert_eq!(svc.by_company().unwrap()["Acme Mills"].len(), 1);
    }

    #[test]
    fn failed_cascade_keeps_item_and_ledger_together() {
        let svc = InventoryService::new(
            FailingStore::new(),
            FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()),
        );
        let item = svc
            .add_item(NewInventoryItem::new("Flour", "Acme Mills", ItemCategory::RawMaterials))
            .unwrap();
        svc.add_purchase(NewPurchase::new(item.id, dec!(10))).unwrap();
        svc.add_usage(NewUsage::new(item.id, dec!(2))).unwrap();

        svc.store.break_key(keys::INVENTORY_PURCHASES);
        let err = svc.delete_item(item.id).unwrap_err();
        assert!(matches!(err, crate::error::ServiceError::Store(_)));

        assert_eq!(svc.items().unwrap().len(), 1);
        assert_eq!(svc.purchases_for_item(item.id).unwrap().len(), 1);
        assert_eq!(svc.usage_for_item(item.id).unwrap().len(), 1);
    }

    #[test]
    fn oversized_purchases_never_reach_the_ledger() {
        let svc = service();
        let item = flour(&svc);
        for _ in 0..2 {
            let err = svc.add_purchase(NewPurchase::new(item.id, Decimal::MAX)).unwrap_err();
            assert!(err.is_validation());
        }
        svc.add_purchase(NewPurchase::new(item.id, bakeledger_core::MAX_MAGNITUDE)).unwrap();
        svc.add_purchase(NewPurchase::new(item.id, bakeledger_core::MAX_MAGNITUDE)).unwrap();
        assert_eq!(svc.summaries().unwrap()[0].remaining(), dec!(2_000_000_000_000));
    }
}
