//! Persistence for the product collection.

pub mod json_file;

pub use json_file::JsonFileStore;

use crate::domain::model::Product;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document could not be read, parsed or written.
    #[error("storage error: {message}")]
    Storage { message: String },
    #[error("product {id} not found")]
    NotFound { id: i64 },
}

impl StoreError {
    pub fn storage(message: impl Into<String>) -> Self {
        StoreError::Storage {
            message: message.into(),
        }
    }
}

/// Whole-collection record store.
///
/// Every mutation loads the full collection, changes it in memory and writes
/// the full collection back. Implementations keep no cache between calls.
pub trait RecordStore: Send + Sync {
    /// Reads the persisted collection, initialising it as empty if absent.
    fn load_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Overwrites the persisted collection in full.
    fn replace_all(&self, products: &[Product]) -> Result<(), StoreError>;

    /// Returns the first product with the given id.
    fn find_by_id(&self, id: i64) -> Result<Product, StoreError> {
        self.load_all()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    /// Removes every product with the given id and returns the id.
    ///
    /// Removing nothing is not an error.
    fn delete_by_id(&self, id: i64) -> Result<i64, StoreError> {
        let mut products = self.load_all()?;
        products.retain(|p| p.id != id);
        self.replace_all(&products)?;
        Ok(id)
    }
}
