//! Artifact format classification used for extension gating.

use std::fmt;

use serde::{Deserialize, Serialize};

/// File extension that identifies a Debian binary package.
pub const PACKAGE_EXTENSION: &str = "deb";

/// Format of an artifact, derived from its file extension.
///
/// Only [`FormatKind::Package`] artifacts are touched by the Debian schema;
/// everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormatKind {
    Package,
    Other(String),
}

impl FormatKind {
    /// Classify an extension (without the leading dot). Matching is
    /// ASCII case-insensitive; other extensions are kept lowercased.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.');
        if ext.eq_ignore_ascii_case(PACKAGE_EXTENSION) {
            FormatKind::Package
        } else {
            FormatKind::Other(ext.to_ascii_lowercase())
        }
    }

    pub fn is_package(&self) -> bool {
        matches!(self, FormatKind::Package)
    }

    pub fn extension(&self) -> &str {
        match self {
            FormatKind::Package => PACKAGE_EXTENSION,
            FormatKind::Other(ext) => ext,
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl From<String> for FormatKind {
    fn from(s: String) -> Self {
        FormatKind::from_extension(&s)
    }
}

impl From<FormatKind> for String {
    fn from(kind: FormatKind) -> Self {
        kind.extension().to_string()
    }
}
