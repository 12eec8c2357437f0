//! In-memory record for one artifact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::format::FormatKind;

/// Metadata for one artifact, as produced at ingest time or reconstructed
/// from a stored [`Document`](crate::Document) at query time.
///
/// `attributes` is an open-ended bag shared by all index creators. The
/// Debian creator keys its values by [`ControlField::name`](crate::ControlField::name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub uinfo: String,
    pub file_name: String,
    pub format: FormatKind,
    pub size: Option<u64>,
    pub last_modified: Option<i64>,
    pub sha256: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl ArtifactInfo {
    pub fn new(uinfo: impl Into<String>, file_name: impl Into<String>, format: FormatKind) -> Self {
        Self {
            uinfo: uinfo.into(),
            file_name: file_name.into(),
            format,
            size: None,
            last_modified: None,
            sha256: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Build a record from a file name, deriving the format from its
    /// extension. Names without an extension get an empty `Other` format.
    pub fn from_file_name(uinfo: impl Into<String>, file_name: &str) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("");
        Self::new(uinfo, file_name, FormatKind::from_extension(ext))
    }
}
