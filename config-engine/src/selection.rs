//! Selection State
//!
//! The caller's current choices for one configuration session:
//! attribute id → chosen option value. Owned by the caller; the
//! evaluator returns a reconciled copy and never mutates the input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute → selected value map for one session
///
/// Backed by a `BTreeMap` so iteration order (and serialization) is
/// deterministic for identical contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SelectionState {
    values: BTreeMap<String, String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selected value for an attribute
    pub fn select(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.values.insert(attribute.into(), value.into());
    }

    /// Remove an attribute's selection
    pub fn deselect(&mut self, attribute: &str) {
        self.values.remove(attribute);
    }

    /// Current value for an attribute
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.values.get(attribute).map(String::as_str)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate selections in attribute-id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for SelectionState {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for SelectionState {
    fn from(pairs: [(&str, &str); N]) -> Self {
        let mut state = Self::new();
        for (attribute, value) in pairs {
            state.select(attribute, value);
        }
        state
    }
}
