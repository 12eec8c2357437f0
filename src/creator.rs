//! Index creators: the per-format plug-ins of the indexing pipeline.
//!
//! Each [`IndexCreator`] contributes to the same [`ArtifactInfo`] and
//! [`Document`], restricted to the keys it owns. Creators declare which
//! other creators must run before them; [`CreatorRegistry::ordered`]
//! resolves that into a run order.
//!
//! ```text
//! ┌───────────────┐      ┌────────────────────┐
//! │ min           │ ───▶ │ debian-package     │
//! │ u fname fext  │      │ deb_* (9 slots)    │
//! │ size m sha256 │      │ gated on .deb      │
//! └───────────────┘      └────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;

use deb_index_core::{
    baseline, parse_control_lines, ArtifactInfo, ControlMapping, Document, FieldSchema,
    FormatKind, IndexerField,
};

use crate::context::ArtifactContext;
use crate::locator::{ControlBlockLocator, ExtractionError};

/// A format-aware contributor to index documents.
///
/// # Lifecycle
///
/// 1. [`populate_artifact_info`](IndexCreator::populate_artifact_info) reads
///    the artifact and fills the in-memory record.
/// 2. [`update_document`](IndexCreator::update_document) copies the record
///    into the document that gets persisted.
/// 3. At query time [`update_artifact_info`](IndexCreator::update_artifact_info)
///    rebuilds the record from a stored document.
///
/// Implementations keep no per-artifact state, so one instance can serve
/// many artifacts concurrently.
pub trait IndexCreator: Send + Sync {
    fn id(&self) -> &str;

    /// Ids of creators that must run before this one.
    fn depends_on(&self) -> &[&'static str] {
        &[]
    }

    /// Document keys this creator writes. Used to detect collisions
    /// between creators.
    fn owned_keys(&self) -> Vec<&'static str>;

    /// New first-class fields this creator adds to the host field registry.
    fn indexer_fields(&self) -> Vec<IndexerField>;

    fn populate_artifact_info(&self, ctx: &mut ArtifactContext) -> Result<(), ExtractionError>;

    fn update_document(&self, info: &ArtifactInfo, doc: &mut Document);

    /// Returns `true` if this creator recognized the document.
    fn update_artifact_info(&self, doc: &Document, info: &mut ArtifactInfo) -> bool;
}

// ═══════════════════════════════════════════════════════════════════════
// Baseline creator
// ═══════════════════════════════════════════════════════════════════════

/// Writes the baseline slots every other creator relies on.
pub struct MinimalIndexCreator;

impl MinimalIndexCreator {
    pub const ID: &'static str = "min";
}

impl IndexCreator for MinimalIndexCreator {
    fn id(&self) -> &str {
        Self::ID
    }

    fn owned_keys(&self) -> Vec<&'static str> {
        baseline::FIELDS.iter().map(|f| f.key).collect()
    }

    fn indexer_fields(&self) -> Vec<IndexerField> {
        baseline::FIELDS.to_vec()
    }

    fn populate_artifact_info(&self, ctx: &mut ArtifactContext) -> Result<(), ExtractionError> {
        let metadata = std::fs::metadata(ctx.path())?;
        ctx.info.size = Some(metadata.len());
        ctx.info.last_modified = metadata
            .modified()
            .ok()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).timestamp_millis());

        let mut hasher = Sha256::new();
        io::copy(&mut ctx.open()?, &mut hasher)?;
        ctx.info.sha256 = Some(format!("{:x}", hasher.finalize()));
        Ok(())
    }

    fn update_document(&self, info: &ArtifactInfo, doc: &mut Document) {
        let [uinfo, fname, fext, size, modified, sha] = baseline::FIELDS;
        doc.add(uinfo.key, &info.uinfo, uinfo.policy);
        doc.add(fname.key, &info.file_name, fname.policy);
        doc.add(fext.key, info.format.extension(), fext.policy);
        if let Some(n) = info.size {
            doc.add(size.key, n.to_string(), size.policy);
        }
        if let Some(ms) = info.last_modified {
            doc.add(modified.key, ms.to_string(), modified.policy);
        }
        if let Some(ref hash) = info.sha256 {
            doc.add(sha.key, hash, sha.policy);
        }
    }

    fn update_artifact_info(&self, doc: &Document, info: &mut ArtifactInfo) -> bool {
        let Some(uinfo) = doc.get(baseline::UINFO) else {
            return false;
        };
        info.uinfo = uinfo.to_string();
        info.file_name = doc.get(baseline::FILE_NAME).unwrap_or_default().to_string();
        info.format = doc
            .format_kind()
            .unwrap_or_else(|| FormatKind::Other(String::new()));
        info.size = doc.get(baseline::SIZE).and_then(|s| s.parse().ok());
        info.last_modified = doc.get(baseline::LAST_MODIFIED).and_then(|s| s.parse().ok());
        info.sha256 = doc.get(baseline::SHA256).map(str::to_string);
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Debian creator
// ═══════════════════════════════════════════════════════════════════════

/// Extracts Debian control fields from `.deb` artifacts.
///
/// Adds no first-class fields of its own: its nine `deb_*` slots ride on
/// documents created by [`MinimalIndexCreator`], which must run first.
pub struct DebianIndexCreator {
    schema: Arc<FieldSchema>,
    locator: ControlBlockLocator,
}

impl DebianIndexCreator {
    pub const ID: &'static str = "debian-package";

    pub fn new(schema: Arc<FieldSchema>, locator: ControlBlockLocator) -> Self {
        Self { schema, locator }
    }

    pub fn supports_extension(&self, format: &FormatKind) -> bool {
        format.is_package()
    }
}

impl IndexCreator for DebianIndexCreator {
    fn id(&self) -> &str {
        Self::ID
    }

    fn depends_on(&self) -> &[&'static str] {
        &[MinimalIndexCreator::ID]
    }

    fn owned_keys(&self) -> Vec<&'static str> {
        self.schema.keys().collect()
    }

    fn indexer_fields(&self) -> Vec<IndexerField> {
        Vec::new()
    }

    fn populate_artifact_info(&self, ctx: &mut ArtifactContext) -> Result<(), ExtractionError> {
        if !self.supports_extension(&ctx.info.format) {
            return Ok(());
        }
        let lines = self.locator.locate(ctx.open()?)?;
        let mapping = parse_control_lines(&lines);
        tracing::trace!(
            uinfo = %ctx.info.uinfo,
            lines = lines.len(),
            fields = mapping.len(),
            "parsed control block"
        );
        mapping.merge_into(&mut ctx.info.attributes);
        Ok(())
    }

    fn update_document(&self, info: &ArtifactInfo, doc: &mut Document) {
        let mapping = ControlMapping::from_attributes(&info.attributes);
        self.schema.populate(&info.format, &mapping, doc);
    }

    fn update_artifact_info(&self, doc: &Document, info: &mut ArtifactInfo) -> bool {
        let (mapping, matched) = self.schema.extract(&info.format, doc);
        if matched {
            mapping.merge_into(&mut info.attributes);
        }
        matched
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate index creator id: {0}")]
    DuplicateId(String),

    #[error("index creator '{creator}' depends on unknown creator '{dependency}'")]
    UnknownDependency { creator: String, dependency: String },

    #[error("dependency cycle involving index creator '{0}'")]
    Cycle(String),

    #[error("field key '{key}' is owned by both '{first}' and '{second}'")]
    KeyCollision {
        key: String,
        first: String,
        second: String,
    },
}

/// Registry of index creators.
///
/// Use [`CreatorRegistry::with_builtins`] for the baseline and Debian
/// creators, then optionally [`register`](CreatorRegistry::register) more.
///
/// ```rust
/// use deb_index::creator::CreatorRegistry;
/// use deb_index::locator::ControlBlockLocator;
///
/// let registry = CreatorRegistry::with_builtins(ControlBlockLocator::default());
/// let ids: Vec<String> = registry
///     .ordered()
///     .unwrap()
///     .iter()
///     .map(|c| c.id().to_string())
///     .collect();
/// assert_eq!(ids, ["min", "debian-package"]);
/// ```
#[derive(Default)]
pub struct CreatorRegistry {
    creators: Vec<Arc<dyn IndexCreator>>,
}

impl CreatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(locator: ControlBlockLocator) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MinimalIndexCreator));
        registry.register(Arc::new(DebianIndexCreator::new(
            Arc::new(FieldSchema::debian()),
            locator,
        )));
        registry
    }

    pub fn register(&mut self, creator: Arc<dyn IndexCreator>) {
        self.creators.push(creator);
    }

    /// Validate the registry and return creators in run order:
    /// dependencies first, registration order otherwise.
    pub fn ordered(&self) -> Result<Vec<Arc<dyn IndexCreator>>, RegistryError> {
        let mut ids = HashSet::new();
        for c in &self.creators {
            if !ids.insert(c.id()) {
                return Err(RegistryError::DuplicateId(c.id().to_string()));
            }
        }

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for c in &self.creators {
            for dep in c.depends_on() {
                if !ids.contains(dep) {
                    return Err(RegistryError::UnknownDependency {
                        creator: c.id().to_string(),
                        dependency: dep.to_string(),
                    });
                }
            }
            for key in c.owned_keys() {
                if let Some(first) = owners.insert(key, c.id()) {
                    return Err(RegistryError::KeyCollision {
                        key: key.to_string(),
                        first: first.to_string(),
                        second: c.id().to_string(),
                    });
                }
            }
        }

        let mut done: HashSet<&str> = HashSet::new();
        let mut ordered = Vec::with_capacity(self.creators.len());
        while ordered.len() < self.creators.len() {
            let ready = self.creators.iter().find(|c| {
                !done.contains(c.id()) && c.depends_on().iter().all(|d| done.contains(d))
            });
            match ready {
                Some(c) => {
                    done.insert(c.id());
                    ordered.push(Arc::clone(c));
                }
                None => {
                    let stuck = self
                        .creators
                        .iter()
                        .find(|c| !done.contains(c.id()))
                        .map(|c| c.id().to_string())
                        .unwrap_or_default();
                    return Err(RegistryError::Cycle(stuck));
                }
            }
        }
        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::testutil;
    use deb_index_core::ControlField;
    use std::fs;
    use tempfile::TempDir;

    struct Stub {
        id: &'static str,
        deps: &'static [&'static str],
        keys: &'static [&'static str],
    }

    impl IndexCreator for Stub {
        fn id(&self) -> &str {
            self.id
        }
        fn depends_on(&self) -> &[&'static str] {
            self.deps
        }
        fn owned_keys(&self) -> Vec<&'static str> {
            self.keys.to_vec()
        }
        fn indexer_fields(&self) -> Vec<IndexerField> {
            Vec::new()
        }
        fn populate_artifact_info(&self, _: &mut ArtifactContext) -> Result<(), ExtractionError> {
            Ok(())
        }
        fn update_document(&self, _: &ArtifactInfo, _: &mut Document) {}
        fn update_artifact_info(&self, _: &Document, _: &mut ArtifactInfo) -> bool {
            false
        }
    }

    fn stub(
        id: &'static str,
        deps: &'static [&'static str],
        keys: &'static [&'static str],
    ) -> Arc<dyn IndexCreator> {
        Arc::new(Stub { id, deps, keys })
    }

    fn ids(creators: &[Arc<dyn IndexCreator>]) -> Vec<&str> {
        creators.iter().map(|c| c.id()).collect()
    }

    fn debian() -> DebianIndexCreator {
        DebianIndexCreator::new(Arc::new(FieldSchema::debian()), ControlBlockLocator::default())
    }

    #[test]
    fn debian_runs_after_minimal_regardless_of_registration_order() {
        let mut registry = CreatorRegistry::new();
        registry.register(Arc::new(debian()));
        registry.register(Arc::new(MinimalIndexCreator));
        let ordered = registry.ordered().unwrap();
        assert_eq!(ids(&ordered), vec!["min", "debian-package"]);
    }

    #[test]
    fn debian_without_minimal_is_rejected() {
        let mut registry = CreatorRegistry::new();
        registry.register(Arc::new(debian()));
        assert_eq!(
            registry.ordered().err(),
            Some(RegistryError::UnknownDependency {
                creator: "debian-package".to_string(),
                dependency: "min".to_string(),
            })
        );
    }

    #[test]
    fn key_collisions_are_rejected() {
        let mut registry = CreatorRegistry::with_builtins(ControlBlockLocator::default());
        registry.register(stub("rogue", &["min"], &["deb_version"]));
        assert!(matches!(
            registry.ordered(),
            Err(RegistryError::KeyCollision { ref key, .. }) if key == "deb_version"
        ));
    }

    #[test]
    fn duplicates_and_cycles_are_rejected() {
        let mut dup = CreatorRegistry::new();
        dup.register(stub("a", &[], &[]));
        dup.register(stub("a", &[], &[]));
        assert_eq!(dup.ordered().err(), Some(RegistryError::DuplicateId("a".to_string())));

        let mut cycle = CreatorRegistry::new();
        cycle.register(stub("a", &["b"], &[]));
        cycle.register(stub("b", &["a"], &[]));
        assert_eq!(cycle.ordered().err(), Some(RegistryError::Cycle("a".to_string())));
    }

    #[test]
    fn debian_contributes_no_first_class_fields() {
        let d = debian();
        assert!(d.indexer_fields().is_empty());
        assert_eq!(d.owned_keys().len(), 9);
        assert_eq!(MinimalIndexCreator.indexer_fields().len(), 6);
    }

    #[test]
    fn full_cycle_through_both_creators() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hello_2.10-3_amd64.deb");
        fs::write(&path, testutil::deb(testutil::HELLO_CONTROL)).unwrap();

        let mut ctx = ArtifactContext::for_file(tmp.path(), &path);
        let min = MinimalIndexCreator;
        let deb = debian();
        min.populate_artifact_info(&mut ctx).unwrap();
        deb.populate_artifact_info(&mut ctx).unwrap();
        assert_eq!(
            ctx.info.attributes.get("Package").map(String::as_str),
            Some("hello")
        );
        assert!(ctx.info.sha256.as_ref().is_some_and(|h| h.len() == 64));

        let mut doc = Document::new();
        min.update_document(&ctx.info, &mut doc);
        deb.update_document(&ctx.info, &mut doc);
        assert_eq!(doc.get("deb_description"), Some("example package based on GNU hello"));
        assert_eq!(doc.get("fext"), Some("deb"));

        let mut back = ArtifactInfo::new("", "", FormatKind::Other(String::new()));
        assert!(min.update_artifact_info(&doc, &mut back));
        assert!(deb.update_artifact_info(&doc, &mut back));
        assert_eq!(back, ctx.info);
        assert_eq!(
            ControlMapping::from_attributes(&back.attributes).get(ControlField::InstalledSize),
            Some("280")
        );
    }

    #[test]
    fn non_package_is_passed_through() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lib.jar");
        fs::write(&path, b"PK\x03\x04").unwrap();

        let mut ctx = ArtifactContext::for_file(tmp.path(), &path);
        let deb = debian();
        deb.populate_artifact_info(&mut ctx).unwrap();
        assert!(ctx.info.attributes.is_empty());

        let mut doc = Document::new();
        MinimalIndexCreator.update_document(&ctx.info, &mut doc);
        let before = doc.clone();
        deb.update_document(&ctx.info, &mut doc);
        assert_eq!(doc, before);

        let mut back = ctx.info.clone();
        assert!(!deb.update_artifact_info(&doc, &mut back));
        assert_eq!(back, ctx.info);
    }

    #[test]
    fn corrupt_package_fails_extraction() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.deb");
        fs::write(&path, b"this is not an ar archive").unwrap();
        let mut ctx = ArtifactContext::for_file(tmp.path(), &path);
        let err = debian().populate_artifact_info(&mut ctx).unwrap_err();
        assert!(matches!(err, ExtractionError::UnreadableArchive(_)));
        assert!(ctx.info.attributes.is_empty());
    }

    #[test]
    fn document_without_baseline_is_not_recognized() {
        let mut info = ArtifactInfo::new("", "", FormatKind::Other(String::new()));
        assert!(!MinimalIndexCreator.update_artifact_info(&Document::new(), &mut info));
    }
}
