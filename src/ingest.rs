//! Indexing pipeline orchestration.
//!
//! scan → creators (`populate_artifact_info`, then `update_document`) →
//! store. Extraction is blocking I/O and runs on the blocking pool. An
//! artifact whose extraction fails is skipped; the rest of the batch
//! carries on.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use deb_index_core::store::memory::InMemoryStore;
use deb_index_core::store::Store;
use deb_index_core::{ArtifactInfo, ControlMapping, Document};

use crate::config::Config;
use crate::context::ArtifactContext;
use crate::creator::{CreatorRegistry, IndexCreator};
use crate::db;
use crate::locator::ExtractionError;
use crate::scan::scan_repository;
use crate::sqlite_store::SqliteStore;

/// Counters for one indexing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub scanned: u64,
    pub indexed: u64,
    pub skipped: u64,
    /// Indexed artifacts with the package format.
    pub packages: u64,
    /// Control fields written across all packages.
    pub control_fields: u64,
}

/// Run every creator over one artifact, in the given order.
pub fn index_artifact(
    creators: &[Arc<dyn IndexCreator>],
    mut ctx: ArtifactContext,
) -> Result<(ArtifactInfo, Document), ExtractionError> {
    for creator in creators {
        creator.populate_artifact_info(&mut ctx)?;
    }
    let mut doc = Document::new();
    for creator in creators {
        creator.update_document(&ctx.info, &mut doc);
    }
    Ok((ctx.info, doc))
}

/// Index `contexts` into `store`.
///
/// Fails only on registry or store errors; extraction errors skip the
/// affected artifact.
pub async fn index_artifacts(
    registry: &CreatorRegistry,
    store: &dyn Store,
    contexts: Vec<ArtifactContext>,
) -> Result<IngestReport> {
    let creators: Arc<[Arc<dyn IndexCreator>]> = registry.ordered()?.into();
    let mut report = IngestReport::default();

    for ctx in contexts {
        report.scanned += 1;
        let uinfo = ctx.info.uinfo.clone();
        let creators = Arc::clone(&creators);
        let result = tokio::task::spawn_blocking(move || index_artifact(&creators, ctx)).await?;

        match result {
            Ok((info, doc)) => {
                store.upsert_document(&info.uinfo, &doc).await?;
                report.indexed += 1;
                if info.format.is_package() {
                    report.packages += 1;
                    report.control_fields += ControlMapping::from_attributes(&info.attributes).len() as u64;
                }
                tracing::debug!(uinfo = %info.uinfo, slots = doc.len(), "indexed artifact");
            }
            Err(e) => {
                tracing::warn!(uinfo = %uinfo, error = %e, "skipping artifact");
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// CLI entry point for `debidx index`.
pub async fn run_index(config: &Config, dry_run: bool, limit: Option<usize>) -> Result<()> {
    let registry = CreatorRegistry::with_builtins(config.extract.locator());

    let mut contexts = scan_repository(&config.scan)?;
    if let Some(lim) = limit {
        contexts.truncate(lim);
    }

    let report = if dry_run {
        let store = InMemoryStore::new();
        index_artifacts(&registry, &store, contexts).await?
    } else {
        let pool = db::connect(config).await?;
        crate::migrate::migrate_pool(&pool).await?;
        let store = SqliteStore::new(pool);
        let report = index_artifacts(&registry, &store, contexts).await?;
        store.pool().close().await;
        report
    };

    if dry_run {
        println!("index {} (dry-run)", config.scan.root.display());
    } else {
        println!("index {}", config.scan.root.display());
    }
    println!("  scanned: {}", report.scanned);
    println!("  indexed: {}", report.indexed);
    println!("  skipped: {}", report.skipped);
    println!("  packages: {}", report.packages);
    println!("  control fields: {}", report.control_fields);
    println!("ok");

    Ok(())
}
