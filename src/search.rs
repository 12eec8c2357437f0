//! Search over indexed document slots.

use anyhow::Result;

use deb_index_core::store::{SearchHit, Store};
use deb_index_core::{ControlField, FieldSchema};

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Resolve a `--field` argument to a storage key. Accepts control field
/// names (`Depends`, case-insensitive) as well as raw keys (`deb_depends`).
pub fn resolve_field_key(schema: &FieldSchema, field: &str) -> String {
    ControlField::from_name(field)
        .and_then(|f| schema.descriptor(f))
        .map(|d| d.key.to_string())
        .unwrap_or_else(|| field.to_string())
}

pub async fn search_artifacts(
    store: &dyn Store,
    query: &str,
    field: Option<&str>,
    limit: i64,
) -> Result<Vec<SearchHit>> {
    if query.trim().is_empty() {
        anyhow::bail!("query must not be empty");
    }
    let schema = FieldSchema::debian();
    let key = field.map(|f| resolve_field_key(&schema, f));
    store.search(query, key.as_deref(), limit).await
}

/// CLI entry point for `debidx search`.
pub async fn run_search(config: &Config, query: &str, field: Option<&str>, limit: i64) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    let hits = search_artifacts(&store, query, field, limit).await;
    store.pool().close().await;
    let hits = hits?;

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, hit) in hits.iter().enumerate() {
        println!("{}. {}", i + 1, hit.id);
        println!("    {}: {}", hit.key, hit.value);
    }

    Ok(())
}
