//! Purchase history joined with the item catalog.

use std::collections::HashMap;

use serde::Serialize;

use bakeledger_inventory::{InventoryItem, ItemId, PurchaseRecord};

pub const UNKNOWN_ITEM: &str = "Unknown Item";
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// A purchase with the name and category of the item it bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseHistoryLine {
    #[serde(flatten)]
    pub purchase: PurchaseRecord,
    pub item_name: String,
    pub item_category: String,
}

/// Every purchase, in stored order, labelled with its item. Purchases whose item no
/// longer exists get placeholder labels.
pub fn purchase_history(
    purchases: &[PurchaseRecord],
    items: &[InventoryItem],
) -> Vec<PurchaseHistoryLine> {
    let by_id: HashMap<ItemId, &InventoryItem> = items.iter().map(|i| (i.id, i)).collect();
    purchases
        .iter()
        .map(|p| {
            let item = by_id.get(&p.item_id);
            PurchaseHistoryLine {
                purchase: p.clone(),
                item_name: item.map_or_else(|| UNKNOWN_ITEM.to_string(), |i| i.name.clone()),
                item_category: item
                    .map_or(UNKNOWN_CATEGORY, |i| i.category.as_str())
                    .to_string(),
            }
        })
        .collect()
}
