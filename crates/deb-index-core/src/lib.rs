//! # deb-index core
//!
//! I/O-free logic for indexing Debian packages: the control field model,
//! the control block parser, the field schema that maps control fields into
//! index documents and back, and the store abstraction.
//!
//! This crate contains no archive, filesystem, or database code. Opening
//! `.deb` files and persisting documents live in the `deb-index` crate.
//!
//! ```text
//! control lines ──▶ parser ──▶ ControlMapping ──▶ FieldSchema::populate ──▶ Document
//!                                     ▲                                        │
//!                                     └──────── FieldSchema::extract ◀─────────┘
//! ```

pub mod artifact;
pub mod baseline;
pub mod document;
pub mod fields;
pub mod format;
pub mod mapping;
pub mod parser;
pub mod schema;
pub mod store;

pub use artifact::ArtifactInfo;
pub use document::{Document, DocumentField};
pub use fields::{ControlField, FieldVersion, IndexPolicy, IndexerField};
pub use format::FormatKind;
pub use mapping::ControlMapping;
pub use parser::{parse_control, parse_control_lines};
pub use schema::{FieldDescriptor, FieldSchema};
