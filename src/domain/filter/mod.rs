//! Attribute-driven filter engine.
//!
//! A request carries a list of `{ key, value }` criteria. Each key must name a
//! field declared in the record type's `FieldRegistry`; numeric fields match
//! on exact equality with the parsed value, text fields on a case-insensitive
//! substring. All criteria must hold for a record to match.
//!
//! Criteria are compiled once per request, so an invalid criterion is
//! reported before any record is looked at.

use crate::domain::model::{FieldAccessor, Filterable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single field-name / expected-value filter input.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct FilterCriterion {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl FilterCriterion {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid filter: {message}")]
    Invalid { message: String },
}

impl FilterError {
    fn invalid(message: impl Into<String>) -> Self {
        FilterError::Invalid {
            message: message.into(),
        }
    }
}

enum Predicate<R> {
    Equals(fn(&R) -> Option<f64>, f64),
    Contains(fn(&R) -> Option<&str>, String),
}

impl<R> Predicate<R> {
    fn eval(&self, record: &R) -> bool {
        match self {
            Predicate::Equals(read, expected) => {
                read(record).is_some_and(|actual| actual.total_cmp(expected).is_eq())
            }
            Predicate::Contains(read, needle) => {
                read(record).is_some_and(|text| text.to_lowercase().contains(needle.as_str()))
            }
        }
    }
}

/// A validated, ready-to-evaluate list of criteria for record type `R`.
pub struct CompiledFilter<R> {
    predicates: Vec<Predicate<R>>,
}

impl<R: Filterable> CompiledFilter<R> {
    /// Validates every criterion in order and resolves it against `R`'s registry.
    ///
    /// Fails on the first criterion with an empty key or value, an unknown
    /// field, or a value that does not parse as a number for a numeric field.
    pub fn compile(criteria: &[FilterCriterion]) -> Result<Self, FilterError> {
        let registry = R::field_registry();
        let mut predicates = Vec::with_capacity(criteria.len());

        for criterion in criteria {
            if criterion.key.is_empty() || criterion.value.is_empty() {
                return Err(FilterError::invalid("at least one valid filter required"));
            }

            let accessor = registry
                .get(&criterion.key)
                .ok_or_else(|| FilterError::invalid(format!("unknown field '{}'", criterion.key)))?;

            let predicate = match accessor {
                FieldAccessor::Numeric(read) => {
                    let expected = criterion.value.trim().parse::<f64>().map_err(|_| {
                        FilterError::invalid(format!(
                            "field '{}' expects a number, got '{}'",
                            criterion.key, criterion.value
                        ))
                    })?;
                    Predicate::Equals(read, expected)
                }
                FieldAccessor::Text(read) => Predicate::Contains(read, criterion.value.to_lowercase()),
            };
            predicates.push(predicate);
        }

        Ok(Self { predicates })
    }
}

impl<R> CompiledFilter<R> {
    /// True when every predicate holds (an empty filter matches everything).
    pub fn matches(&self, record: &R) -> bool {
        self.predicates.iter().all(|p| p.eval(record))
    }

    /// Keeps the matching records, preserving their relative order.
    pub fn apply(&self, records: Vec<R>) -> Vec<R> {
        if self.predicates.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Decides whether a single record satisfies all criteria.
pub fn matches<R: Filterable>(record: &R, criteria: &[FilterCriterion]) -> Result<bool, FilterError> {
    Ok(CompiledFilter::<R>::compile(criteria)?.matches(record))
}

/// Returns the ordered sub-sequence of `records` that satisfies all criteria.
pub fn filter_records<R: Filterable>(
    records: Vec<R>,
    criteria: &[FilterCriterion],
) -> Result<Vec<R>, FilterError> {
    Ok(CompiledFilter::<R>::compile(criteria)?.apply(records))
}
