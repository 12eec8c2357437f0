//! The Debian field schema: which control fields land in which document
//! slots, and the conversions between [`ControlMapping`] and [`Document`].
//!
//! The schema is an immutable table. Build it once with
//! [`FieldSchema::debian`] and share it (e.g. behind an `Arc`).
//!
//! Both conversions are gated on [`FormatKind::Package`], so the schema can
//! share documents and artifact records with creators for other formats.
//! Each field is converted independently; a missing slot never affects the
//! others.

use serde::Serialize;

use crate::document::Document;
use crate::fields::{ControlField, FieldVersion, IndexPolicy};
use crate::format::FormatKind;
use crate::mapping::ControlMapping;

/// Where and how one control field is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub field: ControlField,
    /// Document slot. Stable: renaming breaks previously stored documents.
    pub key: &'static str,
    pub policy: IndexPolicy,
    pub version: FieldVersion,
}

impl FieldDescriptor {
    pub fn description(&self) -> &'static str {
        self.field.description()
    }
}

/// The nine Debian control field descriptors.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    descriptors: Vec<FieldDescriptor>,
}

impl FieldSchema {
    pub fn debian() -> Self {
        let descriptor = |field, key, policy| FieldDescriptor {
            field,
            key,
            policy,
            version: FieldVersion::V1,
        };
        Self {
            descriptors: vec![
                descriptor(
                    ControlField::Package,
                    "deb_package",
                    IndexPolicy::StoredAndIndexed,
                ),
                descriptor(
                    ControlField::Architecture,
                    "deb_architecture",
                    IndexPolicy::Stored,
                ),
                descriptor(
                    ControlField::InstalledSize,
                    "deb_installed_size",
                    IndexPolicy::Stored,
                ),
                descriptor(
                    ControlField::Maintainer,
                    "deb_maintainer",
                    IndexPolicy::StoredAndIndexed,
                ),
                descriptor(ControlField::Version, "deb_version", IndexPolicy::Stored),
                descriptor(
                    ControlField::Depends,
                    "deb_depends",
                    IndexPolicy::StoredAndIndexed,
                ),
                descriptor(ControlField::Section, "deb_section", IndexPolicy::Stored),
                descriptor(ControlField::Priority, "deb_priority", IndexPolicy::Stored),
                descriptor(
                    ControlField::Description,
                    "deb_description",
                    IndexPolicy::StoredAndIndexed,
                ),
            ],
        }
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, field: ControlField) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|d| d.field == field)
    }

    /// Storage keys this schema writes, in field order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|d| d.key)
    }

    /// Write the present fields of `mapping` into `doc`.
    ///
    /// No-op unless `format` is a package. Absent fields get no slot.
    pub fn populate(&self, format: &FormatKind, mapping: &ControlMapping, doc: &mut Document) {
        if !format.is_package() {
            return;
        }
        for d in &self.descriptors {
            if let Some(value) = mapping.get(d.field) {
                doc.add(d.key, value, d.policy);
            }
        }
    }

    /// Rebuild the mapping from `doc`.
    ///
    /// Returns `(empty, false)` for non-package formats without reading the
    /// document. For packages the flag is `true` even if no slot is set.
    pub fn extract(&self, format: &FormatKind, doc: &Document) -> (ControlMapping, bool) {
        if !format.is_package() {
            return (ControlMapping::new(), false);
        }
        let mut mapping = ControlMapping::new();
        for d in &self.descriptors {
            if let Some(value) = doc.get(d.key) {
                mapping.insert(d.field, value);
            }
        }
        (mapping, true)
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::debian()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_control_lines;

    fn full_mapping() -> ControlMapping {
        parse_control_lines([
            "Package: hello",
            "Version: 2.10-3",
            "Architecture: amd64",
            "Maintainer: Santiago Vila <sanvila@debian.org>",
            "Installed-Size: 280",
            "Depends: libc6 (>= 2.34)",
            "Section: devel",
            "Priority: optional",
            "Description: example package based on GNU hello",
        ])
    }

    #[test]
    fn table_covers_every_field_once() {
        let schema = FieldSchema::debian();
        assert_eq!(schema.descriptors().len(), 9);
        for f in ControlField::ALL {
            assert!(schema.descriptor(f).is_some(), "missing {}", f);
        }
        let mut keys: Vec<&str> = schema.keys().collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn every_field_is_stored() {
        for d in FieldSchema::debian().descriptors() {
            assert!(d.policy.is_stored(), "{} must round-trip", d.key);
        }
    }

    #[test]
    fn round_trip() {
        let schema = FieldSchema::debian();
        let m = full_mapping();
        assert_eq!(m.len(), 9);
        let mut doc = Document::new();
        schema.populate(&FormatKind::Package, &m, &mut doc);
        assert_eq!(schema.extract(&FormatKind::Package, &doc), (m, true));
    }

    #[test]
    fn scenario_four_of_nine() {
        let schema = FieldSchema::debian();
        let m = parse_control_lines([
            "Package: foo",
            "Version: 1.2-3",
            "Architecture: amd64",
            "Depends: libc6",
        ]);
        let mut doc = Document::new();
        schema.populate(&FormatKind::Package, &m, &mut doc);

        let set: Vec<ControlField> = schema
            .descriptors()
            .iter()
            .filter(|d| doc.has_field(d.key))
            .map(|d| d.field)
            .collect();
        assert_eq!(
            set,
            vec![
                ControlField::Package,
                ControlField::Architecture,
                ControlField::Version,
                ControlField::Depends,
            ]
        );
        assert_eq!(doc.get("deb_version"), Some("1.2-3"));
        assert!(!doc.has_field("deb_section"));
        assert!(!doc.has_field("deb_priority"));
    }

    #[test]
    fn absent_fields_are_not_empty_strings() {
        let schema = FieldSchema::debian();
        let m = parse_control_lines(["Package: foo"]);
        let mut doc = Document::new();
        schema.populate(&FormatKind::Package, &m, &mut doc);
        for d in schema.descriptors() {
            if d.field != ControlField::Package {
                assert!(!doc.has_field(d.key));
                assert_eq!(doc.get(d.key), None);
            }
        }
    }

    #[test]
    fn empty_mapping_still_matches() {
        let schema = FieldSchema::debian();
        let mut doc = Document::new();
        schema.populate(&FormatKind::Package, &ControlMapping::new(), &mut doc);
        assert!(doc.is_empty());
        let (m, matched) = schema.extract(&FormatKind::Package, &doc);
        assert!(m.is_empty());
        assert!(matched);
    }

    #[test]
    fn non_package_is_untouched() {
        let schema = FieldSchema::debian();
        let jar = FormatKind::from_extension("jar");

        let mut doc = Document::new();
        doc.add("u", "lib/x.jar", IndexPolicy::StoredAndIndexed);
        doc.add("classnames", "org.example.X", IndexPolicy::Indexed);
        let before = doc.clone();

        schema.populate(&jar, &full_mapping(), &mut doc);
        assert_eq!(doc, before);

        let mut filled = Document::new();
        schema.populate(&FormatKind::Package, &full_mapping(), &mut filled);
        assert_eq!(schema.extract(&jar, &filled), (ControlMapping::new(), false));
    }

    #[test]
    fn populate_leaves_other_slots_alone() {
        let schema = FieldSchema::debian();
        let mut doc = Document::new();
        doc.add("u", "pool/foo.deb", IndexPolicy::StoredAndIndexed);
        schema.populate(&FormatKind::Package, &full_mapping(), &mut doc);
        assert_eq!(doc.len(), 10);
        assert_eq!(doc.get("u"), Some("pool/foo.deb"));
    }
}
