//! Infrastructure layer: storage backends, clock, configuration and the application
//! services that run every dashboard operation against a store.

pub mod clock;
pub mod config;
pub mod error;
pub mod services;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, LogFormat};
pub use error::{ServiceError, ServiceResult};
pub use services::{
    FinanceService, InventoryService, InvoiceService, PayablesService, ProductService, Services,
    SessionService,
};
pub use store::{Collection, InMemoryStore, JsonFileStore, KeyValueStore, StoreError};
