//! Storage abstraction for index documents.
//!
//! The [`Store`] trait is what the ingest pipeline writes to and what
//! search and retrieval read from. Implementations must be `Send + Sync`
//! to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use crate::document::Document;

/// A document matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Document id (the artifact's uinfo).
    pub id: String,
    /// First indexed slot that matched, in key order.
    pub key: String,
    pub value: String,
}

/// Abstract storage backend for index documents.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`upsert_document`](Store::upsert_document) | Insert or replace a document |
/// | [`get_document`](Store::get_document) | Read back the stored slots of a document |
/// | [`search`](Store::search) | Substring search over indexed slots |
/// | [`count`](Store::count) | Number of documents |
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a document, replacing every slot of an existing one with the
    /// same id.
    async fn upsert_document(&self, id: &str, doc: &Document) -> Result<()>;

    /// Read a document. Only slots whose policy is stored are returned.
    async fn get_document(&self, id: &str) -> Result<Option<Document>>;

    /// Case-insensitive substring search over indexed slots, optionally
    /// restricted to one key. At most one hit per document, ordered by id.
    async fn search(&self, query: &str, key: Option<&str>, limit: i64) -> Result<Vec<SearchHit>>;

    async fn count(&self) -> Result<i64>;
}
