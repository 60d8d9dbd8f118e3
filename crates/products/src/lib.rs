//! Product catalog domain module.
//!
//! Products, their categories (with cached product counts) and the catalog queries the
//! dashboard and invoice builder use. Pure domain logic: no IO, no storage.

pub mod catalog;
pub mod category;
pub mod product;

pub use catalog::{DEFAULT_TOP_LIMIT, by_category, demo_catalog, search, top_selling};
pub use category::{CategoryId, NewCategory, ProductCategory, adjust_count};
pub use product::{NewProduct, Product, ProductId, ProductUpdate};
