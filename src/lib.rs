//! # deb-index
//!
//! Index Debian binary packages (`.deb`) by their control metadata.
//!
//! The pipeline scans a package repository, pulls the `control` file out of
//! each package, parses nine well-known control fields and writes them into
//! a searchable document next to the baseline artifact fields. Stored
//! documents can be turned back into artifact records.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────────────┐   ┌──────────┐
//! │   Scan   │──▶│  Index creators    │──▶│  SQLite  │
//! │ walkdir  │   │ min → debian-pkg   │   │  Store   │
//! └──────────┘   └────────────────────┘   └────┬─────┘
//!                                              │
//!                           ┌──────────────────┤
//!                           ▼                  ▼
//!                      ┌──────────┐      ┌──────────┐
//!                      │  search  │      │   get    │
//!                      └──────────┘      └──────────┘
//! ```
//!
//! Pure logic (field table, parser, schema, document model, store trait)
//! lives in the I/O-free `deb-index-core` crate.
//!
//! ## Quick Start
//!
//! ```bash
//! debidx init
//! debidx index
//! debidx search libssl --field Depends
//! debidx get pool/main/h/hello/hello_2.10-3_amd64.deb
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`locator`] | Control block extraction from `.deb` archives |
//! | [`context`] | Per-artifact extraction context |
//! | [`creator`] | Index creators and their registry |
//! | [`scan`] | Repository walking |
//! | [`ingest`] | Indexing pipeline |
//! | [`sqlite_store`] | SQLite document store |
//! | [`search`] | Search over indexed slots |
//! | [`get`] | Artifact reconstruction |
//! | [`inspect`] | `inspect` and `fields` commands |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`logging`] | `tracing` subscriber setup |

pub mod config;
pub mod context;
pub mod creator;
pub mod db;
pub mod get;
pub mod ingest;
pub mod inspect;
pub mod locator;
pub mod logging;
pub mod migrate;
pub mod scan;
pub mod search;
pub mod sqlite_store;
