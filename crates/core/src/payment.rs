//! Payment vocabulary shared by purchases, bills and salaries.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How a payable was (or was not) settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Online,
    Bank,
    Cheque,
    #[default]
    Unpaid,
}

impl PaymentMethod {
    /// Anything other than `Unpaid` counts as settled.
    pub fn is_paid(self) -> bool {
        self != PaymentMethod::Unpaid
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Online => "Online Transfer",
            PaymentMethod::Bank => "Bank Transfer",
            PaymentMethod::Cheque => "Cheque",
            PaymentMethod::Unpaid => "Unpaid",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "online" => Ok(PaymentMethod::Online),
            "bank" => Ok(PaymentMethod::Bank),
            "cheque" => Ok(PaymentMethod::Cheque),
            "unpaid" => Ok(PaymentMethod::Unpaid),
            other => Err(DomainError::validation(format!(
                "payment method must be one of: cash, online, bank, cheque, unpaid (got {other:?})"
            ))),
        }
    }
}

/// Settlement status of a bill or salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
    Partial,
}
