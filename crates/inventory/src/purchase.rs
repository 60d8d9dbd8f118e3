use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::{
    Dated, DomainError, DomainResult, Entity, PaymentMethod, require_within_limit, typed_id,
};

use crate::balance::LedgerEntry;
use crate::item::ItemId;

typed_id!(
    /// Purchase record identifier.
    PurchaseId
);

/// One stock purchase (append-only ledger entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: PurchaseId,
    pub item_id: ItemId,
    /// Always > 0.
    pub quantity: Decimal,
    /// Total paid for this purchase; always >= 0.
    pub cost: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for recording a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchase {
    pub item_id: ItemId,
    pub quantity: Decimal,
    #[serde(default)]
    pub cost: Option<Decimal>,
    /// Defaults to today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl NewPurchase {
    pub fn new(item_id: ItemId, quantity: Decimal) -> Self {
        Self {
            item_id,
            quantity,
            cost: None,
            date: None,
            supplier: None,
            payment_method: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn costing(mut self, cost: Decimal) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn from_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn paid_by(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        if self.cost.is_some_and(|c| c < Decimal::ZERO) {
            return Err(DomainError::validation("cost cannot be negative"));
        }
        require_within_limit("quantity", self.quantity)?;
        require_within_limit("cost", self.cost.unwrap_or_default())
    }
}

impl PurchaseRecord {
    /// Turn validated input into a ledger entry.
    pub fn record(
        id: PurchaseId,
        new: NewPurchase,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            item_id: new.item_id,
            quantity: new.quantity,
            cost: new.cost.unwrap_or(Decimal::ZERO),
            date: new.date.unwrap_or(today),
            supplier: new.supplier.unwrap_or_default(),
            payment_method: new.payment_method.unwrap_or_default(),
            created_at: now,
            updated_at: None,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.payment_method.is_paid()
    }

    /// The only edit a purchase accepts: settling (or unsettling) it.
    pub fn set_payment_method(&mut self, method: PaymentMethod, now: DateTime<Utc>) {
        self.payment_method = method;
        self.updated_at = Some(now);
    }
}

impl Entity for PurchaseRecord {
    type Id = PurchaseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Dated for PurchaseRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl LedgerEntry for PurchaseRecord {
    fn item_id(&self) -> ItemId {
        self.item_id
    }

    fn quantity(&self) -> Decimal {
        self.quantity
    }
}
