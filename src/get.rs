//! Artifact retrieval: rebuild an [`ArtifactInfo`] from its stored
//! document by running every creator's `update_artifact_info` in order.

use std::sync::Arc;

use anyhow::{bail, Result};

use deb_index_core::store::Store;
use deb_index_core::{baseline, ArtifactInfo, Document, FormatKind};

use crate::config::Config;
use crate::creator::{CreatorRegistry, IndexCreator};
use crate::db;
use crate::sqlite_store::SqliteStore;

/// Rebuild an artifact record from a document. Returns `None` when the
/// document lacks the baseline identifier slot.
pub fn reconstruct(creators: &[Arc<dyn IndexCreator>], doc: &Document) -> Option<ArtifactInfo> {
    if !doc.has_field(baseline::UINFO) {
        return None;
    }
    let mut info = ArtifactInfo::new("", "", FormatKind::Other(String::new()));
    for creator in creators {
        let matched = creator.update_artifact_info(doc, &mut info);
        tracing::trace!(creator = creator.id(), matched, "update_artifact_info");
    }
    Some(info)
}

pub async fn get_artifact(
    registry: &CreatorRegistry,
    store: &dyn Store,
    id: &str,
) -> Result<Option<ArtifactInfo>> {
    let creators = registry.ordered()?;
    let doc = match store.get_document(id).await? {
        Some(doc) => doc,
        None => return Ok(None),
    };
    Ok(reconstruct(&creators, &doc))
}

/// CLI entry point for `debidx get`.
pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let registry = CreatorRegistry::with_builtins(config.extract.locator());
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    let info = get_artifact(&registry, &store, id).await;
    store.pool().close().await;

    match info? {
        Some(info) => {
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
        None => bail!("artifact not found: {}", id),
    }
}
