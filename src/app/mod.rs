pub mod catalog_service;
pub mod error;

pub use catalog_service::CatalogService;
pub use error::{CatalogError, CatalogResult};
