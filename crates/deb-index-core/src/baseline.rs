//! Document slots owned by the baseline (minimal) index creator.
//!
//! Format-specific creators run after the baseline creator and rely on
//! these slots, [`EXTENSION`] in particular, already being present.

use crate::fields::{FieldVersion, IndexPolicy, IndexerField};

/// Stable artifact identifier (repository-relative path).
pub const UINFO: &str = "u";
pub const FILE_NAME: &str = "fname";
pub const EXTENSION: &str = "fext";
pub const SIZE: &str = "size";
/// Last modified time, epoch milliseconds.
pub const LAST_MODIFIED: &str = "m";
pub const SHA256: &str = "sha256";

pub const FIELDS: [IndexerField; 6] = [
    IndexerField {
        key: UINFO,
        description: "Artifact unique identifier",
        policy: IndexPolicy::StoredAndIndexed,
        version: FieldVersion::V1,
    },
    IndexerField {
        key: FILE_NAME,
        description: "Artifact file name",
        policy: IndexPolicy::StoredAndIndexed,
        version: FieldVersion::V1,
    },
    IndexerField {
        key: EXTENSION,
        description: "Artifact file extension",
        policy: IndexPolicy::StoredAndIndexed,
        version: FieldVersion::V1,
    },
    IndexerField {
        key: SIZE,
        description: "Artifact size in bytes",
        policy: IndexPolicy::Stored,
        version: FieldVersion::V1,
    },
    IndexerField {
        key: LAST_MODIFIED,
        description: "Artifact last modified time (epoch millis)",
        policy: IndexPolicy::Stored,
        version: FieldVersion::V1,
    },
    IndexerField {
        key: SHA256,
        description: "SHA-256 checksum of the artifact",
        policy: IndexPolicy::Stored,
        version: FieldVersion::V1,
    },
];
