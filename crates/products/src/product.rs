use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::error::require_text;
use bakeledger_core::{DomainError, DomainResult, Entity, require_within_limit, typed_id};

use crate::category::CategoryId;

typed_id!(
    /// Product identifier.
    ProductId
);

/// A product sold over the counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: CategoryId,
    /// Unit selling price; never negative.
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    /// Units sold to date.
    #[serde(default)]
    pub sales: u64,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn in_stock_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: CategoryId,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, category: CategoryId, price: Decimal) -> Self {
        Self {
            name: name.into(),
            category,
            price,
            description: String::new(),
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        validate_price(self.price)
    }
}

/// Partial edit of a product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<CategoryId>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub in_stock: Option<bool>,
}

fn validate_price(price: Decimal) -> DomainResult<()> {
    if price < Decimal::ZERO {
        return Err(DomainError::validation("price cannot be negative"));
    }
    require_within_limit("price", price)
}

impl Product {
    /// New products start with no sales and in stock.
    pub fn create(id: ProductId, new: NewProduct, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            name: new.name.trim().to_string(),
            category: new.category,
            price: new.price,
            description: new.description,
            sales: 0,
            in_stock: true,
            created_at: now,
            updated_at: None,
        })
    }

    /// Apply a patch and return the previous category when it changed.
    pub fn apply_update(
        &mut self,
        update: ProductUpdate,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<CategoryId>> {
        if let Some(name) = &update.name {
            require_text("name", name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let mut previous_category = None;
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            if category != self.category {
                previous_category = Some(core::mem::replace(&mut self.category, category));
            }
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(in_stock) = update.in_stock {
            self.in_stock = in_stock;
        }
        self.updated_at = Some(now);
        Ok(previous_category)
    }

    pub fn record_sale(&mut self, quantity: u64) {
        self.sales = self.sales.saturating_add(quantity);
    }

    /// Case-insensitive substring match over name and description.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
