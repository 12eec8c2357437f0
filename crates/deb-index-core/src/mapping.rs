//! Extracted control values keyed by canonical field name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::ControlField;

/// Control values found in one package, keyed by [`ControlField::name`].
///
/// Fields that were not found are absent, never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlMapping {
    values: BTreeMap<String, String>,
}

impl ControlMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value.
    pub fn insert(&mut self, field: ControlField, value: impl Into<String>) {
        self.values.insert(field.name().to_string(), value.into());
    }

    pub fn get(&self, field: ControlField) -> Option<&str> {
        self.values.get(field.name()).map(String::as_str)
    }

    pub fn contains(&self, field: ControlField) -> bool {
        self.values.contains_key(field.name())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(field, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (ControlField, &str)> + '_ {
        ControlField::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|v| (f, v)))
    }

    /// Collect the recognized fields from an attributes bag. Keys that are
    /// not canonical control field names are ignored.
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Self {
        let mut mapping = Self::new();
        for field in ControlField::ALL {
            if let Some(v) = attributes.get(field.name()) {
                mapping.insert(field, v.clone());
            }
        }
        mapping
    }

    /// Merge into an attributes bag. Existing keys for the same fields are
    /// overwritten; unrelated keys are left alone.
    pub fn merge_into(&self, attributes: &mut BTreeMap<String, String>) {
        for (k, v) in &self.values {
            attributes.insert(k.clone(), v.clone());
        }
    }
}
