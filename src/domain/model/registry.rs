//! FieldRegistry for mapping attribute names to typed accessors.

use std::collections::HashMap;
use std::fmt;

/// Reads one attribute of a record, classified as numeric or text.
pub enum FieldAccessor<R> {
    /// Compared by exact numeric equality.
    Numeric(fn(&R) -> Option<f64>),
    /// Compared by case-insensitive substring match.
    Text(fn(&R) -> Option<&str>),
}

impl<R> Clone for FieldAccessor<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldAccessor<R> {}

impl<R> fmt::Debug for FieldAccessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldAccessor::Numeric(_) => f.write_str("Numeric"),
            FieldAccessor::Text(_) => f.write_str("Text"),
        }
    }
}

/// A registry that maps field names to their accessors for a record type `R`.
pub struct FieldRegistry<R> {
    fields: HashMap<&'static str, FieldAccessor<R>>,
    /// Declaration order, kept for stable listings.
    order: Vec<&'static str>,
}

impl<R> FieldRegistry<R> {
    /// Creates a new empty FieldRegistry.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registers a numeric attribute.
    pub fn numeric(mut self, name: &'static str, read: fn(&R) -> Option<f64>) -> Self {
        self.insert(name, FieldAccessor::Numeric(read));
        self
    }

    /// Registers a text attribute.
    pub fn text(mut self, name: &'static str, read: fn(&R) -> Option<&str>) -> Self {
        self.insert(name, FieldAccessor::Text(read));
        self
    }

    fn insert(&mut self, name: &'static str, accessor: FieldAccessor<R>) {
        if self.fields.insert(name, accessor).is_none() {
            self.order.push(name);
        }
    }

    /// Resolves a field by exact (case-sensitive) name.
    /// Returns None if the field is not declared.
    pub fn get(&self, name: &str) -> Option<FieldAccessor<R>> {
        self.fields.get(name).copied()
    }

    /// Returns all declared field names in registration order.
    pub fn field_names(&self) -> &[&'static str] {
        &self.order
    }
}

impl<R> Default for FieldRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
