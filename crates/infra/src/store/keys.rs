//! Storage keys. Each collection is one JSON array under its key.

pub const INVENTORY_ITEMS: &str = "inventory_items";
pub const INVENTORY_PURCHASES: &str = "inventory_purchases";
pub const INVENTORY_USAGE: &str = "inventory_usage";
pub const FINANCE_INCOME: &str = "finance_income";
pub const FINANCE_COGS: &str = "finance_cogs";
pub const FINANCE_EXPENSES: &str = "finance_expenses";
pub const BILLS: &str = "bills";
pub const SALARIES: &str = "salaries";
pub const PRODUCTS: &str = "products";
pub const PRODUCT_CATEGORIES: &str = "product_categories";

/// Scalar: the last invoice number handed out, as a decimal string.
pub const LAST_INVOICE_NUMBER: &str = "lastInvoiceNumber";
/// Scalar: the signed-in local user as a JSON object.
pub const USER: &str = "user";
