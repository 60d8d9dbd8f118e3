//! Catalog queries and the demo catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::category::{CategoryId, ProductCategory};
use crate::product::{Product, ProductId};

pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Best sellers first. Equal sales keep their stored order.
pub fn top_selling(products: &[Product], limit: usize) -> Vec<Product> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| b.sales.cmp(&a.sales));
    ranked.truncate(limit);
    ranked
}

pub fn by_category(products: &[Product], category: &CategoryId) -> Vec<Product> {
    products
        .iter()
        .filter(|p| &p.category == category)
        .cloned()
        .collect()
}

pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    products.iter().filter(|p| p.matches(query)).cloned().collect()
}

// (name, category, price, description, sales)
const DEMO_PRODUCTS: [(&str, &str, i64, &str, u64); 10] = [
    (
        "Premium Chocolate Cake",
        "cakes",
        550,
        "Rich chocolate cake with premium cocoa and chocolate ganache",
        42,
    ),
    (
        "Vanilla Bean Cupcakes",
        "cupcakes",
        75,
        "Delicate cupcakes with real vanilla bean frosting",
        128,
    ),
    ("Strawberry Cheesecake", "cakes", 600, "Creamy cheesecake with fresh strawberry topping", 36),
    ("Blueberry Muffins", "muffins", 60, "Soft muffins packed with fresh blueberries", 95),
    ("Red Velvet Cake", "cakes", 650, "Classic red velvet cake with cream cheese frosting", 58),
    ("Namkeen Mix", "snacks", 120, "Savory Indian snack mix with nuts and spices", 75),
    ("Butter Cookies", "cookies", 200, "Traditional buttery cookies, perfect with tea", 62),
    (
        "Chocolate Chip Cookies",
        "cookies",
        250,
        "Classic cookies with chunks of premium chocolate",
        84,
    ),
    ("Pineapple Pastry", "pastries", 85, "Light pastry with fresh pineapple filling", 47),
    ("Fruit Tart", "pastries", 120, "Buttery tart shell filled with custard and fresh fruits", 39),
];

const DEMO_CATEGORIES: [(&str, &str); 6] = [
    ("cakes", "Cakes"),
    ("cupcakes", "Cupcakes"),
    ("muffins", "Muffins"),
    ("cookies", "Cookies"),
    ("pastries", "Pastries"),
    ("snacks", "Snacks"),
];

/// Ten bakery products across six categories, with category counts matching.
pub fn demo_catalog(now: DateTime<Utc>) -> (Vec<Product>, Vec<ProductCategory>) {
    let products: Vec<Product> = DEMO_PRODUCTS
        .iter()
        .map(|(name, category, price, description, sales)| Product {
            id: ProductId::new(),
            name: (*name).to_string(),
            category: CategoryId::from_static(category),
            price: Decimal::from(*price),
            description: (*description).to_string(),
            sales: *sales,
            in_stock: true,
            created_at: now,
            updated_at: None,
        })
        .collect();

    let categories = DEMO_CATEGORIES
        .iter()
        .map(|(id, name)| {
            let id = CategoryId::from_static(id);
            let count = products.iter().filter(|p| p.category == id).count();
            ProductCategory {
                id,
                name: (*name).to_string(),
                count: u32::try_from(count).unwrap_or(u32::MAX),
            }
        })
        .collect();

    (products, categories)
}
