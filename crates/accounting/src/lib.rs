//! Finance domain module: income, cost of goods sold (COGS) and expense entries, and
//! the aggregations the dashboard shows over them.
//!
//! Pure domain logic; persistence lives in `bakeledger-infra`.

pub mod chart;
pub mod entry;
pub mod metrics;

pub use chart::{CategoryShare, ChartData, expense_breakdown};
pub use entry::{EntryId, EntryKind, FinanceEntry, NewFinanceEntry};
pub use metrics::{FinancialMetrics, FinanceLedgers, aggregate};
