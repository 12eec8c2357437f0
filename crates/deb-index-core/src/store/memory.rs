//! In-memory [`Store`] implementation for tests and dry runs.
//!
//! Uses a `BTreeMap` behind `std::sync::RwLock`, so iteration (and search
//! results) come out ordered by document id.

use std::collections::BTreeMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::document::Document;

use super::{SearchHit, Store};

pub struct InMemoryStore {
    docs: RwLock<BTreeMap<String, Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

#[async_trait]
impl Store for InMemoryStore {
    async fn upsert_document(&self, id: &str, doc: &Document) -> Result<()> {
        let mut docs = self.docs.write().map_err(poisoned)?;
        docs.insert(id.to_string(), doc.clone());
        Ok(())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let docs = self.docs.read().map_err(poisoned)?;
        Ok(docs.get(id).map(Document::stored_only))
    }

    async fn search(&self, query: &str, key: Option<&str>, limit: i64) -> Result<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit < 1 {
            return Ok(Vec::new());
        }
        let docs = self.docs.read().map_err(poisoned)?;
        let hits = docs
            .iter()
            .filter_map(|(id, doc)| {
                doc.iter()
                    .filter(|(k, f)| f.policy.is_indexed() && key.map_or(true, |want| want == *k))
                    .find(|(_, f)| f.value.to_lowercase().contains(&needle))
                    .map(|(k, f)| SearchHit {
                        id: id.clone(),
                        key: k.to_string(),
                        value: f.value.clone(),
                    })
            })
            .take(limit as usize)
            .collect();
        Ok(hits)
    }

    async fn count(&self) -> Result<i64> {
        let docs = self.docs.read().map_err(poisoned)?;
        Ok(docs.len() as i64)
    }
}
