//! Read-only commands that need no database: `inspect` and `fields`.

use std::path::Path;

use anyhow::{Context, Result};

use deb_index_core::{baseline, parse_control_lines, ControlField, ControlMapping, FieldSchema};

use crate::config::load_config;
use crate::locator::ControlBlockLocator;

/// Locator for `inspect`: built from the config file when one exists,
/// the default otherwise. A config that exists but fails to load is an
/// error.
pub fn inspect_locator(config_path: &Path) -> Result<ControlBlockLocator> {
    if !config_path.exists() {
        tracing::debug!(config = %config_path.display(), "no config file, using default extraction limits");
        return Ok(ControlBlockLocator::default());
    }
    Ok(load_config(config_path)?.extract.locator())
}

/// Extract and parse the control block of one package file.
pub fn inspect_package(locator: &ControlBlockLocator, path: &Path) -> Result<ControlMapping> {
    let lines = locator
        .locate_path(path)
        .with_context(|| format!("Failed to read control block: {}", path.display()))?;
    Ok(parse_control_lines(&lines))
}

/// CLI entry point for `debidx inspect`.
pub fn run_inspect(locator: &ControlBlockLocator, path: &Path) -> Result<()> {
    let mapping = inspect_package(locator, path)?;

    println!("{}", path.display());
    if mapping.is_empty() {
        println!("  (no control fields)");
        return Ok(());
    }
    for (field, value) in mapping.iter() {
        println!("  {}: {}", field.name(), value);
    }
    println!("{} of {} fields", mapping.len(), ControlField::ALL.len());

    Ok(())
}

/// CLI entry point for `debidx fields`.
pub fn run_fields() -> Result<()> {
    let schema = FieldSchema::debian();

    println!(
        "{:<20} {:<16} {:<16} {:<8} DESCRIPTION",
        "KEY", "FIELD", "POLICY", "VERSION"
    );
    for field in baseline::FIELDS.iter() {
        println!(
            "{:<20} {:<16} {:<16} {:<8} {}",
            field.key,
            "-",
            field.policy.as_str(),
            format!("{:?}", field.version),
            field.description
        );
    }
    for d in schema.descriptors() {
        println!(
            "{:<20} {:<16} {:<16} {:<8} {}",
            d.key,
            d.field.name(),
            d.policy.as_str(),
            format!("{:?}", d.version),
            d.description()
        );
    }

    Ok(())
}
