use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::error::require_text;
use bakeledger_core::{
    Dated, DomainError, DomainResult, Entity, PaymentMethod, PaymentStatus, require_within_limit,
    typed_id,
};

typed_id!(
    /// Bill identifier.
    BillId
);

/// A utility, rent or other operating bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBill {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl NewBill {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            category: category.into(),
            payment_method: PaymentMethod::default(),
            payment_status: PaymentStatus::default(),
        }
    }

    pub fn settled(mut self, method: PaymentMethod, status: PaymentStatus) -> Self {
        self.payment_method = method;
        self.payment_status = status;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("description", &self.description)?;
        require_text("category", &self.category)?;
        validate_amount(self.amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
}

pub(crate) fn validate_amount(amount: Decimal) -> DomainResult<()> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation("amount must be greater than zero"));
    }
    require_within_limit("amount", amount)
}

impl Bill {
    pub fn create(id: BillId, new: NewBill, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            description: new.description.trim().to_string(),
            amount: new.amount,
            date: new.date,
            category: new.category.trim().to_string(),
            payment_method: new.payment_method,
            payment_status: new.payment_status,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_update(&mut self, update: BillUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(description) = &update.description {
            require_text("description", description)?;
        }
        if let Some(category) = &update.category {
            require_text("category", category)?;
        }
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }

        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(category) = update.category {
            self.category = category.trim().to_string();
        }
        if let Some(method) = update.payment_method {
            self.payment_method = method;
        }
        if let Some(status) = update.payment_status {
            self.payment_status = status;
        }
        self.updated_at = now;
        Ok(())
    }
}

impl Entity for Bill {
    type Id = BillId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Dated for Bill {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
