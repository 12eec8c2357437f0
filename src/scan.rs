//! Repository walk producing one [`ArtifactContext`] per matching file.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::context::ArtifactContext;

/// Walk `scan.root` and return contexts for files matching the include
/// globs and none of the exclude globs, sorted by uinfo.
pub fn scan_repository(scan: &ScanConfig) -> Result<Vec<ArtifactContext>> {
    let root = &scan.root;
    if !root.exists() {
        bail!("Scan root does not exist: {}", root.display());
    }

    let include_set = build_globset(&scan.include_globs)?;

    let mut excludes = vec!["**/.git/**".to_string()];
    excludes.extend(scan.exclude_globs.clone());
    let exclude_set = build_globset(&excludes)?;

    let mut contexts = Vec::new();

    for entry in WalkDir::new(root).follow_links(scan.follow_symlinks) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let ctx = ArtifactContext::for_file(root, entry.path());
        if exclude_set.is_match(&ctx.info.uinfo) || !include_set.is_match(&ctx.info.uinfo) {
            continue;
        }
        contexts.push(ctx);
    }

    contexts.sort_by(|a, b| a.info.uinfo.cmp(&b.info.uinfo));
    tracing::debug!(root = %root.display(), artifacts = contexts.len(), "scan complete");

    Ok(contexts)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
