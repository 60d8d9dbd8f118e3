use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::{Dated, DomainError, DomainResult, Entity, require_within_limit, typed_id};

use crate::balance::LedgerEntry;
use crate::item::ItemId;

typed_id!(
    /// Usage record identifier.
    UsageId
);

/// One consumption of stock (append-only ledger entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub id: UsageId,
    pub item_id: ItemId,
    /// Always > 0.
    pub quantity: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Input for recording usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUsage {
    pub item_id: ItemId,
    pub quantity: Decimal,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewUsage {
    pub fn new(item_id: ItemId, quantity: Decimal) -> Self {
        Self {
            item_id,
            quantity,
            date: None,
            purpose: None,
            notes: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn for_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        require_within_limit("quantity", self.quantity)
    }
}

impl UsageRecord {
    pub fn record(
        id: UsageId,
        new: NewUsage,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            item_id: new.item_id,
            quantity: new.quantity,
            date: new.date.unwrap_or(today),
            purpose: new.purpose.unwrap_or_default(),
            notes: new.notes.unwrap_or_default(),
            created_at: now,
        })
    }
}

impl Entity for UsageRecord {
    type Id = UsageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Dated for UsageRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl LedgerEntry for UsageRecord {
    fn item_id(&self) -> ItemId {
        self.item_id
    }

    fn quantity(&self) -> Decimal {
        self.quantity
    }
}
