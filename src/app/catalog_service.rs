//! The Catalog Service.
//!
//! Sits between the transport layer and the record store. It is responsible for:
//! 1.  Assigning identifiers to new products (`max + 1`, or `1` when empty).
//! 2.  Running filter requests through the filter engine.
//! 3.  Translating store and filter failures into [`CatalogError`].
//!
//! Every operation re-reads the whole collection from the store. Mutations
//! (create/update/delete) are serialised by a single write lock so that two
//! writers in this process can not interleave their load/modify/persist
//! cycles. Reads are not locked.

use crate::app::error::{CatalogError, CatalogResult};
use crate::domain::filter::{CompiledFilter, FilterCriterion};
use crate::domain::model::{Product, ProductInput};
use crate::storage::RecordStore;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct CatalogService<S> {
    store: S,
    /// Held for the entire load -> mutate -> persist cycle of every write.
    write_lock: Mutex<()>,
}

impl<S: RecordStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // Guards no data, only ordering; a poisoned lock is still usable.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the whole catalog in stored order.
    pub fn list_all(&self) -> CatalogResult<Vec<Product>> {
        let products = self.store.load_all().map_err(|e| CatalogError::Retrieval {
            message: e.to_string(),
        })?;
        tracing::debug!(count = products.len(), "listed products");
        Ok(products)
    }

    /// Returns the products matching every criterion, in stored order.
    pub fn filter(&self, criteria: &[FilterCriterion]) -> CatalogResult<Vec<Product>> {
        let compiled = CompiledFilter::<Product>::compile(criteria).map_err(|e| {
            tracing::warn!(error = %e, "rejected filter request");
            CatalogError::from(e)
        })?;
        let products = self.store.load_all()?;
        let total = products.len();
        let matched = compiled.apply(products);
        tracing::debug!(criteria = criteria.len(), total, matched = matched.len(), "filtered products");
        Ok(matched)
    }

    pub fn get_by_id(&self, id: i64) -> CatalogResult<Product> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Creates a product with the next free identifier.
    ///
    /// `None` stands for a missing payload and is rejected.
    pub fn create(&self, input: Option<ProductInput>) -> CatalogResult<Product> {
        let input = input.ok_or_else(|| CatalogError::invalid_input("product must not be null"))?;

        let _guard = self.lock_writes();
        let mut products = self.store.load_all()?;
        let id = next_id(&products)?;
        let product = Product::from_input(id, input);
        products.push(product.clone());
        self.store.replace_all(&products)?;

        tracing::info!(id, "product created");
        Ok(product)
    }

    /// Replaces every mutable field of product `id`, keeping its identifier.
    ///
    /// The updated product moves to the end of the collection. Removal of the
    /// old entry and insertion of the new one happen in one persisted write,
    /// so a failed write leaves the previous document in place.
    pub fn update(&self, id: i64, input: ProductInput) -> CatalogResult<Product> {
        let _guard = self.lock_writes();
        let mut products = self.store.load_all()?;
        let position = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound { id })?;

        let mut product = products.remove(position);
        products.retain(|p| p.id != id);
        product.apply(input);
        products.push(product.clone());
        self.store.replace_all(&products)?;

        tracing::info!(id, "product updated");
        Ok(product)
    }

    /// Deletes product `id`. Unlike the store, an absent id is an error here.
    pub fn delete(&self, id: i64) -> CatalogResult<i64> {
        let _guard = self.lock_writes();
        let existing = self.get_by_id(id)?;
        self.store.delete_by_id(existing.id)?;

        tracing::info!(id, "product deleted");
        Ok(id)
    }
}

fn next_id(products: &[Product]) -> CatalogResult<i64> {
    match products.iter().map(|p| p.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or_else(|| CatalogError::Storage {
            message: "product identifiers exhausted".to_string(),
        }),
    }
}
