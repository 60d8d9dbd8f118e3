//! Three-tier stock status for reorder decisions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::ItemSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn needs_reorder(self) -> bool {
        self != StockStatus::InStock
    }
}

/// Classify a remaining quantity against an optional reorder threshold.
///
/// - `remaining <= 0` is always `OutOfStock`, whatever the threshold.
/// - `0 < remaining <= min_level` is `LowStock` (boundary inclusive).
/// - everything else is `InStock`.
///
/// Recomputed on every read; there is no hysteresis around the threshold.
pub fn classify(remaining: Decimal, min_level: Option<Decimal>) -> StockStatus {
    if remaining <= Decimal::ZERO {
        return StockStatus::OutOfStock;
    }
    match min_level {
        Some(level) if remaining <= level => StockStatus::LowStock,
        _ => StockStatus::InStock,
    }
}

/// Dashboard counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOverview {
    pub total_items: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl StockOverview {
    pub fn from_summaries(summaries: &[ItemSummary]) -> Self {
        summaries.iter().fold(
            Self {
                total_items: summaries.len(),
                ..Self::default()
            },
            |mut acc, s| {
                match s.status {
                    StockStatus::LowStock => acc.low_stock += 1,
                    StockStatus::OutOfStock => acc.out_of_stock += 1,
                    StockStatus::InStock => {}
                }
                acc
            },
        )
    }
}

/// Items that are out of stock or at/below their threshold.
pub fn reorder_alerts(summaries: &[ItemSummary]) -> Vec<&ItemSummary> {
    summaries.iter().filter(|s| s.status.needs_reorder()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_is_out_of_stock_regardless_of_threshold() {
        assert_eq!(classify(Decimal::ZERO, None), StockStatus::OutOfStock);
        assert_eq!(classify(Decimal::ZERO, Some(dec!(10))), StockStatus::OutOfStock);
        assert_eq!(classify(dec!(-2), Some(dec!(10))), StockStatus::OutOfStock);
    }

    #[test]
    fn threshold_boundary_is_low_stock() {
        assert_eq!(classify(dec!(5), Some(dec!(5))), StockStatus::LowStock);
        assert_eq!(classify(dec!(0.01), Some(dec!(5))), StockStatus::LowStock);
        assert_eq!(classify(dec!(5.01), Some(dec!(5))), StockStatus::InStock);
    }

    #[test]
    fn no_threshold_means_in_stock_when_positive() {
        assert_eq!(classify(dec!(0.5), None), StockStatus::InStock);
    }

    #[test]
    fn zero_threshold_never_reports_low() {
        assert_eq!(classify(dec!(1), Some(Decimal::ZERO)), StockStatus::InStock);
    }
}
