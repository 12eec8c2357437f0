//! Control block extraction from `.deb` archives.
//!
//! A binary package is an `ar` archive holding `debian-binary`, a
//! `control.tar[.gz|.xz|.zst]` member and a `data.tar.*` member. The
//! control member is a tar containing `./control`, whose lines are what
//! [`parse_control_lines`](deb_index_core::parse_control_lines) consumes.
//!
//! Extraction is blocking I/O and keeps no state between calls.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use thiserror::Error;

/// Name prefix of the control member inside the `ar` container.
pub const CONTROL_MEMBER_PREFIX: &str = "control.tar";

/// Name of the control file inside the control member.
pub const CONTROL_FILE: &str = "control";

/// Default bound on the decompressed control file.
pub const DEFAULT_MAX_CONTROL_BYTES: u64 = 1024 * 1024;

/// Errors raised while pulling the control block out of a package.
///
/// A missing control member is not an error; see
/// [`ControlBlockLocator::locate`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The artifact is not a readable `ar` archive.
    #[error("unreadable archive: {0}")]
    UnreadableArchive(String),

    /// The control member exists but its compressed or tar stream is broken.
    #[error("corrupt control member {member}: {reason}")]
    CorruptControlMember { member: String, reason: String },

    #[error("unsupported control member compression: {0}")]
    UnsupportedCompression(String),

    #[error("control file exceeds size limit ({limit} bytes)")]
    ControlTooLarge { limit: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    None,
    Gzip,
    Xz,
    Zstd,
}

impl Compression {
    fn from_member_name(name: &str) -> Option<Result<Self, ExtractionError>> {
        let suffix = name.strip_prefix(CONTROL_MEMBER_PREFIX)?;
        Some(match suffix {
            "" => Ok(Compression::None),
            ".gz" => Ok(Compression::Gzip),
            ".xz" => Ok(Compression::Xz),
            ".zst" => Ok(Compression::Zstd),
            _ => Err(ExtractionError::UnsupportedCompression(name.to_string())),
        })
    }
}

/// Finds and reads the control file of a `.deb` package.
#[derive(Debug, Clone, Copy)]
pub struct ControlBlockLocator {
    max_control_bytes: u64,
}

impl Default for ControlBlockLocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTROL_BYTES)
    }
}

impl ControlBlockLocator {
    pub fn new(max_control_bytes: u64) -> Self {
        Self { max_control_bytes }
    }

    pub fn locate_path(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let file = File::open(path)?;
        self.locate(BufReader::new(file))
    }

    /// Return the control file's lines in order.
    ///
    /// Returns an empty vector when the package has no control member, or
    /// the control member has no control file. Invalid UTF-8 is replaced.
    pub fn locate<R: Read>(&self, reader: R) -> Result<Vec<String>, ExtractionError> {
        let mut archive = ar::Archive::new(reader);
        while let Some(entry) = archive.next_entry() {
            let entry = entry.map_err(|e| ExtractionError::UnreadableArchive(e.to_string()))?;
            let name = String::from_utf8_lossy(entry.header().identifier())
                .trim_end_matches('/')
                .to_string();
            let compression = match Compression::from_member_name(&name) {
                Some(c) => c?,
                None => continue,
            };
            tracing::debug!(member = %name, ?compression, "found control member");
            let bytes = self.read_control_member(entry, compression, &name)?;
            return Ok(bytes.map(|b| to_lines(&b)).unwrap_or_default());
        }
        Ok(Vec::new())
    }

    fn read_control_member<R: Read>(
        &self,
        member: R,
        compression: Compression,
        name: &str,
    ) -> Result<Option<Vec<u8>>, ExtractionError> {
        let corrupt = |e: io::Error| ExtractionError::CorruptControlMember {
            member: name.to_string(),
            reason: e.to_string(),
        };
        let stream: Box<dyn Read + '_> = match compression {
            Compression::None => Box::new(member),
            Compression::Gzip => Box::new(flate2::read::GzDecoder::new(member)),
            Compression::Xz => Box::new(xz2::read::XzDecoder::new(member)),
            Compression::Zstd => Box::new(zstd::stream::read::Decoder::new(member).map_err(corrupt)?),
        };

        let mut tar = tar::Archive::new(stream);
        for entry in tar.entries().map_err(corrupt)? {
            let entry = entry.map_err(corrupt)?;
            let path = entry.path().map_err(corrupt)?;
            if path.to_string_lossy().trim_start_matches("./") != CONTROL_FILE {
                continue;
            }
            let mut out = Vec::new();
            entry
                .take(self.max_control_bytes + 1)
                .read_to_end(&mut out)
                .map_err(corrupt)?;
            if out.len() as u64 > self.max_control_bytes {
                return Err(ExtractionError::ControlTooLarge {
                    limit: self.max_control_bytes,
                });
            }
            return Ok(Some(out));
        }
        Ok(None)
    }
}

fn to_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
