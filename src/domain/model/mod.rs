//! Domain model definitions for catalog records.

pub mod product;
pub mod registry;

pub use product::{Product, ProductInput};
pub use registry::{FieldAccessor, FieldRegistry};

/// Trait for record types that can be matched by the filter engine.
///
/// Implementors expose a registry mapping each declared attribute name to a
/// typed accessor. The registry is built once and shared for the lifetime of
/// the process, so the filter engine never needs per-field code.
pub trait Filterable: Sized + 'static {
    /// Returns the field registry for this record type.
    fn field_registry() -> &'static FieldRegistry<Self>;
}
