//! `bakeledger-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no IO): identifiers,
//! the domain error model, payment vocabulary, the "latest record" ordering and the
//! date filters shared by the inventory, finance and payables modules.

pub mod amount;
pub mod entity;
pub mod error;
pub mod id;
pub mod payment;
pub mod period;
pub mod recency;

pub use amount::{MAX_MAGNITUDE, require_within_limit};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::RecordId;
pub use payment::{PaymentMethod, PaymentStatus};
pub use period::{DateRange, PeriodFilter, RollingPeriod};
pub use recency::{Dated, latest, recency_cmp, sort_newest_first};
