use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakeledger_core::error::require_text;
use bakeledger_core::{Dated, DomainResult, Entity, PaymentMethod, PaymentStatus, typed_id};

use crate::bill::validate_amount;

typed_id!(
    /// Salary payment identifier.
    SalaryId
);

/// One salary payment to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: SalaryId,
    pub employee_name: String,
    #[serde(default)]
    pub role: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSalary {
    pub employee_name: String,
    #[serde(default)]
    pub role: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl NewSalary {
    pub fn new(
        employee_name: impl Into<String>,
        role: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            role: role.into(),
            amount,
            date,
            payment_method: PaymentMethod::default(),
            payment_status: PaymentStatus::default(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("employee name", &self.employee_name)?;
        validate_amount(self.amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryUpdate {
    pub employee_name: Option<String>,
    pub role: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>,
}

impl Salary {
    pub fn create(id: SalaryId, new: NewSalary, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        Ok(Self {
            id,
            employee_name: new.employee_name.trim().to_string(),
            role: new.role.trim().to_string(),
            amount: new.amount,
            date: new.date,
            payment_method: new.payment_method,
            payment_status: new.payment_status,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_update(&mut self, update: SalaryUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = &update.employee_name {
            require_text("employee name", name)?;
        }
        if let Some(amount) = update.amount {
            validate_amount(amount)?;
        }

        if let Some(name) = update.employee_name {
            self.employee_name = name.trim().to_string();
        }
        if let Some(role) = update.role {
            self.role = role.trim().to_string();
        }
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(date) = update.date {
            self.date = date;
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

    /// Settle the payment with `method`.
    pub fn mark_paid(&mut self, method: PaymentMethod, now: DateTime<Utc>) {
        self.payment_method = method;
        self.payment_status = PaymentStatus::Paid;
        self.updated_at = now;
    }
}

impl Entity for Salary {
    type Id = SalaryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Dated for Salary {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn salary() -> Salary {
        Salary::create(
            SalaryId::new(),
            NewSalary::new(
                " Priya ",
                "Baker",
                dec!(18000),
                NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
            ),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn employee_name_is_required() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let new = NewSalary::new("", "Baker", dec!(1), date);
        assert!(new.validate().is_err());
        assert_eq!(salary().employee_name, "Priya");
    }

    #[test]
    fn mark_paid_sets_status_and_method() {
        let mut s = salary();
        s.mark_paid(PaymentMethod::Bank, Utc::now());
        assert_eq!(s.payment_status, PaymentStatus::Paid);
        assert_eq!(s.payment_method, PaymentMethod::Bank);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut s = salary();
        let update = SalaryUpdate {
            role: Some("Head Baker".to_string()),
            ..SalaryUpdate::default()
        };
        s.apply_update(update, Utc::now()).unwrap();
        assert_eq!(s.role, "Head Baker");
        assert_eq!(s.amount, dec!(18000));
    }
}
