//! Application services: every dashboard operation as a read-modify-write over the
//! injected store.
//!
//! Services are generic over the store and the clock so tests can run against
//! [`InMemoryStore`](crate::store::InMemoryStore) with a [`FixedClock`](crate::clock::FixedClock).

pub mod finance;
pub mod inventory;
pub mod invoices;
pub mod payables;
pub mod products;
pub mod session;

use bakeledger_accounting::FinanceEntry;
use bakeledger_inventory::{InventoryItem, PurchaseRecord, UsageRecord};
use bakeledger_payables::{Bill, Salary};
use bakeledger_products::{Product, ProductCategory};

use crate::clock::Clock;
use crate::store::{Collection, KeyValueStore, keys};

pub use finance::FinanceService;
pub use inventory::InventoryService;
pub use invoices::InvoiceService;
pub use payables::PayablesService;
pub use products::ProductService;
pub use session::SessionService;

pub(crate) const ITEMS: Collection<InventoryItem> = Collection::new(keys::INVENTORY_ITEMS, "Item");
pub(crate) const PURCHASES: Collection<PurchaseRecord> =
    Collection::new(keys::INVENTORY_PURCHASES, "Purchase");
pub(crate) const USAGE: Collection<UsageRecord> =
    Collection::new(keys::INVENTORY_USAGE, "Usage record");
pub(crate) const INCOME: Collection<FinanceEntry> =
    Collection::new(keys::FINANCE_INCOME, "Income entry");
pub(crate) const COGS: Collection<FinanceEntry> = Collection::new(keys::FINANCE_COGS, "COGS entry");
pub(crate) const EXPENSES: Collection<FinanceEntry> =
    Collection::new(keys::FINANCE_EXPENSES, "Expense entry");
pub(crate) const BILLS: Collection<Bill> = Collection::new(keys::BILLS, "Bill");
pub(crate) const SALARIES: Collection<Salary> = Collection::new(keys::SALARIES, "Salary record");
pub(crate) const PRODUCTS: Collection<Product> = Collection::new(keys::PRODUCTS, "Product");
pub(crate) const CATEGORIES: Collection<ProductCategory> =
    Collection::new(keys::PRODUCT_CATEGORIES, "Category");

/// All services sharing one store and one clock.
#[derive(Debug, Clone)]
pub struct Services<S, C> {
    pub inventory: InventoryService<S, C>,
    pub finance: FinanceService<S, C>,
    pub products: ProductService<S, C>,
    pub payables: PayablesService<S, C>,
    pub invoices: InvoiceService<S, C>,
    pub session: SessionService<S, C>,
}

impl<S, C> Services<S, C>
where
    S: KeyValueStore + Clone,
    C: Clock + Clone,
{
    pub fn new(store: S, clock: C, business_name: impl Into<String>) -> Self {
        Self {
            inventory: InventoryService::new(store.clone(), clock.clone()),
            finance: FinanceService::new(store.clone(), clock.clone()),
            products: ProductService::new(store.clone(), clock.clone()),
            payables: PayablesService::new(store.clone(), clock.clone()),
            invoices: InvoiceService::new(store.clone(), clock.clone(), business_name),
            session: SessionService::new(store, clock),
        }
    }
}
