//! TOML configuration.
//!
//! ```toml
//! [db]
//! path = "./data/debidx.sqlite"
//!
//! [scan]
//! root = "/srv/apt/pool"
//! include_globs = ["**/*.deb"]
//! exclude_globs = ["**/old/**"]
//! follow_symlinks = false
//!
//! [extract]
//! max_control_bytes = 1048576
//! ```
//!
//! Only `[db]` and `scan.root` are required.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::locator::{ControlBlockLocator, DEFAULT_MAX_CONTROL_BYTES};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub scan: ScanConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.deb".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractConfig {
    #[serde(default = "default_max_control_bytes")]
    pub max_control_bytes: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_control_bytes: DEFAULT_MAX_CONTROL_BYTES,
        }
    }
}

fn default_max_control_bytes() -> u64 {
    DEFAULT_MAX_CONTROL_BYTES
}

impl ExtractConfig {
    pub fn locator(&self) -> ControlBlockLocator {
        ControlBlockLocator::new(self.max_control_bytes)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.extract.max_control_bytes == 0 {
        anyhow::bail!("extract.max_control_bytes must be > 0");
    }

    if config.scan.include_globs.is_empty() {
        anyhow::bail!("scan.include_globs must not be empty");
    }

    Ok(config)
}
