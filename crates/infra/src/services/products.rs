use tracing::{info, warn};

use bakeledger_core::DomainError;
use bakeledger_products::{
    CategoryId, NewCategory, NewProduct, Product, ProductCategory, ProductId, ProductUpdate,
    adjust_count, by_category, demo_catalog, search, top_selling,
};

use super::{CATEGORIES, PRODUCTS};
use crate::clock::Clock;
use crate::error::{ServiceError, ServiceResult};
use crate::store::KeyValueStore;

/// Product catalog with cached per-category counts.
#[derive(Debug, Clone)]
pub struct ProductService<S, C> {
    store: S,
    clock: C,
}

impl<S, C> ProductService<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Write the demo catalog into whichever of products / categories is absent.
    /// Returns whether anything was written.
    pub fn seed_demo(&self) -> ServiceResult<bool> {
        let (products, categories) = demo_catalog(self.clock.now());
        let mut seeded = false;
        if !PRODUCTS.is_present(&self.store)? {
            PRODUCTS.save(&self.store, &products)?;
            seeded = true;
        }
        if !CATEGORIES.is_present(&self.store)? {
            CATEGORIES.save(&self.store, &categories)?;
            seeded = true;
        }
        if seeded {
            info!(products = products.len(), categories = categories.len(), "demo catalog seeded");
        }
        Ok(seeded)
    }

    pub fn products(&self) -> ServiceResult<Vec<Product>> {
        Ok(PRODUCTS.load(&self.store)?)
    }

    pub fn product(&self, id: ProductId) -> ServiceResult<Product> {
        PRODUCTS.find(&self.store, &id)
    }

    pub fn add_product(&self, new: NewProduct) -> ServiceResult<Product> {
        let product = Product::create(ProductId::new(), new, self.clock.now())?;
        let category = product.category.clone();
        self.shift_count(&category, 1)?;
        let product = PRODUCTS
            .append(&self.store, product)
            .or_else(|err| self.undo_count(&category, 1, err.into()))?;
        info!(product_id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    pub fn update_product(&self, id: ProductId, update: ProductUpdate) -> ServiceResult<Product> {
        let now = self.clock.now();
        let mut moved_from = None;
        let product = PRODUCTS.update(&self.store, &id, |p| {
            moved_from = p.apply_update(update, now)?;
            Ok(())
        })?;
        if let Some(previous) = moved_from {
            self.shift_count(&previous, -1)?;
            self.shift_count(&product.category, 1)?;
        }
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    pub fn delete_product(&self, id: ProductId) -> ServiceResult<Product> {
        let product = PRODUCTS.find(&self.store, &id)?;
        self.shift_count(&product.category, -1)?;
        let removed = PRODUCTS
            .remove(&self.store, &id)
            .or_else(|err| self.undo_count(&product.category, -1, err))?;
        info!(product_id = %id, "product deleted");
        Ok(removed)
    }

    pub fn categories(&self) -> ServiceResult<Vec<ProductCategory>> {
        Ok(CATEGORIES.load(&self.store)?)
    }

    pub fn add_category(&self, new: NewCategory) -> ServiceResult<ProductCategory> {
        let category = ProductCategory::create(new)?;
        let mut categories = CATEGORIES.load(&self.store)?;
        if categories.iter().any(|c| c.id == category.id) {
            let message = format!("category '{}' already exists", category.id);
            return Err(DomainError::conflict(message).into());
        }
        categories.push(category.clone());
        CATEGORIES.save(&self.store, &categories)?;
        info!(category = %category.id, "product category added");
        Ok(category)
    }

    pub fn top_selling(&self, limit: usize) -> ServiceResult<Vec<Product>> {
        Ok(top_selling(&PRODUCTS.load(&self.store)?, limit))
    }

    pub fn record_sale(&self, id: ProductId, quantity: u64) -> ServiceResult<Product> {
        let product = PRODUCTS.update(&self.store, &id, |p| {
            p.record_sale(quantity);
            Ok(())
        })?;
        info!(product_id = %id, quantity, total_sales = product.sales, "sale recorded");
        Ok(product)
    }

    pub fn by_category(&self, category: &CategoryId) -> ServiceResult<Vec<Product>> {
        Ok(by_category(&PRODUCTS.load(&self.store)?, category))
    }

    pub fn search(&self, query: &str) -> ServiceResult<Vec<Product>> {
        Ok(search(&PRODUCTS.load(&self.store)?, query))
    }

    /// Revert a count shift after the product write failed, then report the failure.
    fn undo_count<T>(&self, id: &CategoryId, delta: i64, err: ServiceError) -> ServiceResult<T> {
        if let Err(revert) = self.shift_count(id, -delta) {
            warn!(category = %id, error = %revert, "could not revert category count");
        }
        Err(err)
    }

    fn shift_count(&self, id: &CategoryId, delta: i64) -> ServiceResult<()> {
        let mut categories = CATEGORIES.load(&self.store)?;
        if !categories.iter().any(|c| &c.id == id) {
            warn!(category = %id, "product references an unknown category; count not tracked");
            return Ok(());
        }
        adjust_count(&mut categories, id, delta);
        CATEGORIES.save(&self.store, &categories)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    use crate::clock::FixedClock;
    use crate::store::failing::FailingStore;
    use crate::store::{InMemoryStore, keys};

    fn service() -> ProductService<InMemoryStore, FixedClock> {
        ProductService::new(
            InMemoryStore::new(),
            FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()),
        )
    }

    fn count(svc: &ProductService<InMemoryStore, FixedClock>, id: &str) -> u32 {
        svc.categories()
            .unwrap()
            .into_iter()
            .find(|c| c.id.as_str() == id)
            .map(|c| c.count)
            .unwrap()
    }

    fn cat(id: &str) -> CategoryId {
        id.parse().unwrap()
    }

    #[test]
    fn seeding_only_happens_once() {
        let svc = service();
        assert!(svc.seed_demo().unwrap());
        assert!(!svc.seed_demo().unwrap());
        assert_eq!(svc.products().unwrap().len(), 10);
        assert_eq!(svc.top_selling(5).unwrap()[0].sales, 128);
    }

    #[test]
    fn seeding_respects_an_emptied_catalog() {
        let svc = service();
        PRODUCTS.save(&svc.store, &[]).unwrap();
        svc.seed_demo().unwrap();
        assert!(svc.products().unwrap().is_empty());
        assert_eq!(svc.categories().unwrap().len(), 6);
    }

    #[test]
    fn category_counts_follow_products() {
        let svc = service();
        svc.seed_demo().unwrap();
        let bun = svc
            .add_product(NewProduct::new("Cinnamon Bun", cat("pastries"), dec!(90)))
            .unwrap();
        assert_eq!(count(&svc, "pastries"), 3);

        svc.update_product(
            bun.id,
            ProductUpdate {
                category: Some(cat("snacks")),
                ..ProductUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(count(&svc, "pastries"), 2);
        assert_eq!(count(&svc, "snacks"), 2);

        svc.delete_product(bun.id).unwrap();
        assert_eq!(count(&svc, "snacks"), 1);
        assert!(svc.delete_product(bun.id).unwrap_err().is_not_found());
    }

    #[test]
    fn duplicate_category_is_a_conflict() {
        let svc = service();
        svc.seed_demo().unwrap();
        let err = svc
            .add_category(NewCategory {
                id: None,
                name: "Cakes".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, crate::error::ServiceError::Domain(DomainError::Conflict(_))));
        let breads = svc
            .add_category(NewCategory {
                id: None,
                name: "Breads".to_string(),
            })
            .unwrap();
        assert_eq!(breads.count, 0);
    }

    #[test]
    fn sales_search_and_filter() {
        let svc = service();
        svc.seed_demo().unwrap();
        let tart = svc.search("TART").unwrap().remove(0);
        let tart = svc.record_sale(tart.id, 100).unwrap();
        assert_eq!(tart.sales, 139);
        assert_eq!(svc.top_selling(1).unwrap()[0].id, tart.id);
        assert_eq!(svc.by_category(&cat("cakes")).unwrap().len(), 3);
        assert!(svc.record_sale(ProductId::new(), 1).unwrap_err().is_not_found());
    }

    #[test]
    fn failed_product_write_leaves_counts_unchanged() {
        let svc = ProductService::new(
            FailingStore::new(),
            FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()),
        );
        svc.seed_demo().unwrap();
        let cakes = |svc: &ProductService<FailingStore, FixedClock>| {
            svc.categories().unwrap().into_iter().find(|c| c.id == cat("cakes")).unwrap().count
        };
        let existing = svc.by_category(&cat("cakes")).unwrap().remove(0);

        svc.store.break_key(keys::PRODUCTS);
        assert!(svc.add_product(NewProduct::new("Lemon Cake", cat("cakes"), dec!(450))).is_err());
        assert_eq!(cakes(&svc), 3);
        assert!(svc.delete_product(existing.id).is_err());
        assert_eq!(cakes(&svc), 3);
        assert_eq!(svc.products().unwrap().len(), 10);
    }
}
