//! Per-artifact context handed to index creators at ingest time.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use deb_index_core::ArtifactInfo;

/// An artifact being indexed: its record plus access to its content.
#[derive(Debug, Clone)]
pub struct ArtifactContext {
    pub info: ArtifactInfo,
    path: PathBuf,
}

impl ArtifactContext {
    pub fn new(info: ArtifactInfo, path: impl Into<PathBuf>) -> Self {
        Self {
            info,
            path: path.into(),
        }
    }

    /// Context for a file under `root`. The uinfo is the path relative to
    /// `root` with `/` separators.
    pub fn for_file(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let uinfo = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(ArtifactInfo::from_file_name(uinfo, &file_name), path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh reader over the artifact content.
    pub fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}
