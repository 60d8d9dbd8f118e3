use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::error::require_text;
use bakeledger_core::{DomainError, DomainResult, Entity, typed_id};

typed_id!(
    /// Inventory item identifier.
    ItemId
);

/// What kind of stock an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    RawMaterials,
    Packaging,
    FinishedGoods,
    Supplies,
    Equipment,
    Other,
}

impl ItemCategory {
    /// Stored name of the category (`raw_materials`).
    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::RawMaterials => "raw_materials",
            ItemCategory::Packaging => "packaging",
            ItemCategory::FinishedGoods => "finished_goods",
            ItemCategory::Supplies => "supplies",
            ItemCategory::Equipment => "equipment",
            ItemCategory::Other => "other",
        }
    }

    pub const ALL: [ItemCategory; 6] = [
        ItemCategory::RawMaterials,
        ItemCategory::Packaging,
        ItemCategory::FinishedGoods,
        ItemCategory::Supplies,
        ItemCategory::Equipment,
        ItemCategory::Other,
    ];
}

impl FromStr for ItemCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| DomainError::validation(format!("unknown item category {s:?}")))
    }
}

/// Unit an item is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    L,
    Ml,
    Pcs,
    Boxes,
    #[default]
    Units,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "L",
            Unit::Ml => "mL",
            Unit::Pcs => "pcs",
            Unit::Boxes => "boxes",
            Unit::Units => "units",
        }
    }

    pub const ALL: [Unit; 7] = [
        Unit::Kg,
        Unit::G,
        Unit::L,
        Unit::Ml,
        Unit::Pcs,
        Unit::Boxes,
        Unit::Units,
    ];
}

impl FromStr for Unit {
    type Err = DomainError;

    /// Case-insensitive on the label, so `L`, `l` and `mL` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|u| u.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::validation(format!("unknown unit {s:?}")))
    }
}

/// Inventory item definition.
///
/// Balances are never stored on the item; they are derived from the purchase and
/// usage ledgers on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub company_name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub description: String,
    /// Reorder threshold; `None` disables the low-stock tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_level: Option<Decimal>,
    #[serde(default)]
    pub notes: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    pub company_name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_level: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewInventoryItem {
    pub fn new(
        name: impl Into<String>,
        company_name: impl Into<String>,
        category: ItemCategory,
    ) -> Self {
        Self {
            name: name.into(),
            company_name: company_name.into(),
            category,
            unit: None,
            description: None,
            min_level: None,
            notes: None,
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_min_level(mut self, min_level: Decimal) -> Self {
        self.min_level = Some(min_level);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("name", &self.name)?;
        require_text("company name", &self.company_name)?;
        validate_min_level(self.min_level)
    }
}

/// Partial edit of an item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub category: Option<ItemCategory>,
    pub unit: Option<Unit>,
    pub description: Option<String>,
    /// `Some(None)` clears the threshold.
    pub min_level: Option<Option<Decimal>>,
    pub notes: Option<String>,
}

fn validate_min_level(min_level: Option<Decimal>) -> DomainResult<()> {
    match min_level {
        Some(level) if level < Decimal::ZERO => {
            Err(DomainError::validation("minimum level cannot be negative"))
        }
        _ => Ok(()),
    }
}

impl InventoryItem {
    /// Build a new active item, applying defaults for omitted fields.
    pub fn create(id: ItemId, new: NewInventoryItem, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            name: new.name.trim().to_string(),
            company_name: new.company_name.trim().to_string(),
            category: new.category,
            unit: new.unit.unwrap_or_default(),
            description: new.description.unwrap_or_default(),
            min_level: new.min_level,
            notes: new.notes.unwrap_or_default(),
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Same name and company (case-insensitive) in the same category.
    pub fn is_same_item(&self, name: &str, company_name: &str, category: ItemCategory) -> bool {
        self.category == category
            && self.name.trim().eq_ignore_ascii_case(name.trim())
            && self.company_name.trim().eq_ignore_ascii_case(company_name.trim())
    }

    pub fn apply_update(&mut self, update: ItemUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = &update.name {
            require_text("name", name)?;
        }
        if let Some(company) = &update.company_name {
            require_text("company name", company)?;
        }
        if let Some(level) = update.min_level {
            validate_min_level(level)?;
        }

        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(company) = update.company_name {
            self.company_name = company.trim().to_string();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(level) = update.min_level {
            self.min_level = level;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Hide the item from summaries without touching its ledgers.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
