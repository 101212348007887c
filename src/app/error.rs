//! Error taxonomy surfaced by the catalog service.

use crate::domain::filter::FilterError;
use crate::storage::StoreError;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Listing the catalog failed.
    #[error("failed to retrieve products: {message}")]
    Retrieval { message: String },

    /// The backing document could not be read or written.
    #[error("{message}")]
    Storage { message: String },

    #[error("product {id} not found")]
    NotFound { id: i64 },

    #[error("{message}")]
    InvalidFilter { message: String },

    /// The create/update payload was absent or malformed.
    #[error("invalid product: {message}")]
    InvalidInput { message: String },
}

impl CatalogError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CatalogError::InvalidInput {
            message: message.into(),
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => CatalogError::NotFound { id },
            StoreError::Storage { message } => CatalogError::Storage { message },
        }
    }
}

impl From<FilterError> for CatalogError {
    fn from(err: FilterError) -> Self {
        CatalogError::InvalidFilter {
            message: err.to_string(),
        }
    }
}
