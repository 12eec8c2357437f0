//! Generic index document shared by all index creators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::baseline;
use crate::fields::IndexPolicy;
use crate::format::FormatKind;

/// One slot of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentField {
    pub value: String,
    pub policy: IndexPolicy,
}

/// Key/value document persisted by a [`Store`](crate::store::Store).
///
/// Several index creators write into the same document, each into its own
/// keys. Adding a key that already exists replaces its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: BTreeMap<String, DocumentField>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>, policy: IndexPolicy) {
        self.fields.insert(
            key.into(),
            DocumentField {
                value: value.into(),
                policy,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|f| f.value.as_str())
    }

    pub fn field(&self, key: &str) -> Option<&DocumentField> {
        self.fields.get(key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentField)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Format recorded by the baseline creator, if its slot is present.
    pub fn format_kind(&self) -> Option<FormatKind> {
        self.get(baseline::EXTENSION)
            .map(FormatKind::from_extension)
    }

    /// Copy of this document keeping only slots a store returns on read.
    pub fn stored_only(&self) -> Document {
        Document {
            fields: self
                .fields
                .iter()
                .filter(|(_, f)| f.policy.is_stored())
                .map(|(k, f)| (k.clone(), f.clone()))
                .collect(),
        }
    }
}
