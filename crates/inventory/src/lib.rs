//! Inventory domain module.
//!
//! Item definitions, the purchase and usage ledgers, and the derived views over
//! them (balances, stock status, history). Everything here is deterministic domain
//! logic: no IO, no storage.

pub mod balance;
pub mod history;
pub mod item;
pub mod purchase;
pub mod stock;
pub mod usage;

pub use balance::{
    ItemBalance, ItemDetail, ItemSummary, LedgerEntry, compute_balance, item_detail, summarize_all,
};
pub use history::{
    DailyQuantity, PurchaseHistoryEntry, group_by_company, purchase_history, purchases_in_range,
    usage_by_date, usage_in_range,
};
pub use item::{InventoryItem, ItemCategory, ItemId, ItemUpdate, NewInventoryItem, Unit};
pub use purchase::{NewPurchase, PurchaseId, PurchaseRecord};
pub use stock::{StockOverview, StockStatus, classify, reorder_alerts};
pub use usage::{NewUsage, UsageId, UsageRecord};
