//! Control field identities and indexing policies.
//!
//! [`ControlField`] is the closed set of Debian control fields that get
//! structured extraction. Every other control field is dropped by the
//! parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognized Debian control field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ControlField {
    Package,
    Architecture,
    InstalledSize,
    Maintainer,
    Version,
    Depends,
    Section,
    Priority,
    Description,
}

impl ControlField {
    /// All recognized fields, in control-file order.
    pub const ALL: [ControlField; 9] = [
        ControlField::Package,
        ControlField::Architecture,
        ControlField::InstalledSize,
        ControlField::Maintainer,
        ControlField::Version,
        ControlField::Depends,
        ControlField::Section,
        ControlField::Priority,
        ControlField::Description,
    ];

    /// Canonical name as written in a control file. Also the key used in
    /// [`ControlMapping`](crate::ControlMapping) and the artifact attributes bag.
    pub fn name(self) -> &'static str {
        match self {
            ControlField::Package => "Package",
            ControlField::Architecture => "Architecture",
            ControlField::InstalledSize => "Installed-Size",
            ControlField::Maintainer => "Maintainer",
            ControlField::Version => "Version",
            ControlField::Depends => "Depends",
            ControlField::Section => "Section",
            ControlField::Priority => "Priority",
            ControlField::Description => "Description",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ControlField::Package => "Debian package name",
            ControlField::Architecture => "Target architecture of the package",
            ControlField::InstalledSize => "Estimated installed size in KiB",
            ControlField::Maintainer => "Package maintainer name and email",
            ControlField::Version => "Debian package version",
            ControlField::Depends => "Packages this package depends on",
            ControlField::Section => "Archive section the package belongs to",
            ControlField::Priority => "Installation priority of the package",
            ControlField::Description => "Short package description (synopsis line)",
        }
    }

    /// Look up a field by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ControlField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a document slot is kept by the store.
///
/// `Stored` values come back from reads but are not searchable; `Indexed`
/// values are searchable but never returned; `StoredAndIndexed` is both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    Stored,
    Indexed,
    StoredAndIndexed,
}

impl IndexPolicy {
    pub fn is_stored(self) -> bool {
        matches!(self, IndexPolicy::Stored | IndexPolicy::StoredAndIndexed)
    }

    pub fn is_indexed(self) -> bool {
        matches!(self, IndexPolicy::Indexed | IndexPolicy::StoredAndIndexed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndexPolicy::Stored => "stored",
            IndexPolicy::Indexed => "indexed",
            IndexPolicy::StoredAndIndexed => "stored+indexed",
        }
    }

    /// Parse the `as_str` form back. Unknown values map to `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "stored" => Some(IndexPolicy::Stored),
            "indexed" => Some(IndexPolicy::Indexed),
            "stored+indexed" => Some(IndexPolicy::StoredAndIndexed),
            _ => None,
        }
    }
}

/// Version tag of a persisted field identity. Renaming a storage key
/// requires a new version; there is no migration between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldVersion {
    V1,
}

/// A first-class field an index creator contributes to the host's field
/// registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexerField {
    pub key: &'static str,
    pub description: &'static str,
    pub policy: IndexPolicy,
    pub version: FieldVersion,
}
