pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{CatalogError, CatalogResult, CatalogService};
pub use domain::filter::{FilterCriterion, FilterError};
pub use domain::model::{Filterable, Product, ProductInput};
pub use storage::{JsonFileStore, RecordStore, StoreError};
