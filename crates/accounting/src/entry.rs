use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::error::require_text;
use bakeledger_core::{
    Dated, DomainError, DomainResult, Entity, PeriodFilter, require_within_limit, typed_id,
};

typed_id!(
    /// Finance entry identifier.
    EntryId
);

/// Which ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Cogs,
    Expense,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Cogs => "COGS",
            EntryKind::Expense => "expense",
        }
    }
}

/// A single income, COGS or expense line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    /// Always > 0; the ledger the entry lives in decides its sign.
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Input for a new finance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinanceEntry {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
}

impl NewFinanceEntry {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            description: description.into(),
            category: category.into(),
        }
    }

    /// Field checks plus the entry window: transactions may only be booked into the
    /// calendar month containing `today`.
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        require_text("description", &self.description)?;
        require_text("category", &self.category)?;
        if self.amount <= Decimal::ZERO {
            return Err(DomainError::validation("amount must be greater than zero"));
        }
        require_within_limit("amount", self.amount)?;
        if !PeriodFilter::month_of(today).matches(self.date) {
            return Err(DomainError::validation(format!(
                "transactions can only be added for the current month ({})",
                today.format("%B %Y")
            )));
        }
        Ok(())
    }
}

impl FinanceEntry {
    pub fn record(
        id: EntryId,
        new: NewFinanceEntry,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        new.validate(today)?;
        Ok(Self {
            id,
            date: new.date,
            amount: new.amount,
            description: new.description.trim().to_string(),
            category: new.category.trim().to_string(),
            created_at: now,
        })
    }
}

impl Entity for FinanceEntry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Dated for FinanceEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
