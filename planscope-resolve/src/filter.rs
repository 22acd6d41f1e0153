//! Property filters applied as the last step of entity matching.
//!
//! Filters arrive as a JSON object mapping dot paths to either a single
//! expected value or a list of acceptable values:
//!
//! ```json
//! {"entityPrototype.refCode": ["SO", "SP"], "planId": "1100"}
//! ```
//!
//! Comparison is loose in the way API consumers expect: a number matches its
//! decimal string form and booleans match 1/0.

use crate::ResolveResult;
use planscope_model::{Entity, value_at_path};
use planscope_types::lenient;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    AnyOf(Vec<Value>),
    One(Value),
}

impl FilterValue {
    fn accepts(&self, actual: &Value) -> bool {
        match self {
            Self::One(expected) => loose_eq(actual, expected),
            Self::AnyOf(options) => options.iter().any(|expected| loose_eq(actual, expected)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFilter {
    pub path: String,
    pub expected: FilterValue,
}

/// A conjunction of property filters.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Map<String, Value>")]
pub struct PropertyFilters {
    filters: Vec<PropertyFilter>,
}

impl From<serde_json::Map<String, Value>> for PropertyFilters {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        let filters = map
            .into_iter()
            .map(|(path, value)| PropertyFilter {
                path,
                expected: match value {
                    Value::Array(options) => FilterValue::AnyOf(options),
                    other => FilterValue::One(other),
                },
            })
            .collect();
        Self { filters }
    }
}

impl PropertyFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses filters from a JSON object.
    pub fn from_value(value: Value) -> ResolveResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Adds a filter requiring `path` to equal `expected`.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, expected: impl Into<Value>) -> Self {
        self.filters.push(PropertyFilter {
            path: path.into(),
            expected: FilterValue::One(expected.into()),
        });
        self
    }

    /// Adds a filter requiring `path` to equal one of `options`.
    #[must_use]
    pub fn with_any_of(mut self, path: impl Into<String>, options: Vec<Value>) -> Self {
        self.filters.push(PropertyFilter {
            path: path.into(),
            expected: FilterValue::AnyOf(options),
        });
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    #[must_use]
    pub fn filters(&self) -> &[PropertyFilter] {
        &self.filters
    }

    /// Whether the entity satisfies every filter. A missing property never
    /// matches.
    #[must_use]
    pub fn matches(&self, entity: &Entity) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let Ok(json) = serde_json::to_value(entity) else {
            return false;
        };
        self.filters.iter().all(|filter| {
            value_at_path(&json, &filter.path).is_some_and(|actual| filter.expected.accepts(actual))
        })
    }
}

fn loose_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(_) | Value::String(_), Value::Number(_) | Value::String(_)) => {
            match (lenient::as_f64(actual), lenient::as_f64(expected)) {
                (Some(a), Some(b)) => a == b,
                _ => actual == expected,
            }
        }
        (Value::Bool(b), Value::Number(_)) | (Value::Number(_), Value::Bool(b)) => {
            let n = if matches!(actual, Value::Bool(_)) { expected } else { actual };
            lenient::as_f64(n) == Some(if *b { 1.0 } else { 0.0 })
        }
        _ => actual == expected,
    }
}
