//! Limits on ledger quantities and money.

use rust_decimal::Decimal;

use crate::error::{DomainError, DomainResult};

/// Largest magnitude accepted for any quantity, price or amount (one trillion).
///
/// Keeps every sum and `quantity × price` product far inside `Decimal`'s range, so
/// totals over stored records cannot overflow.
pub const MAX_MAGNITUDE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Reject values whose magnitude exceeds [`MAX_MAGNITUDE`].
pub fn require_within_limit(field: &str, value: Decimal) -> DomainResult<()> {
    if value.abs() > MAX_MAGNITUDE {
        return Err(DomainError::validation(format!(
            "{field} cannot exceed {MAX_MAGNITUDE}"
        )));
    }
    Ok(())
}
