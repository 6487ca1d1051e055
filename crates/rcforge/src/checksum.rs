//! RC file integrity checks
//!
//! Digests of the user's shell rc files are recorded under the checksum
//! directory so unexpected edits (by installers, for example) can be noticed
//! on the next check. Digests use the `sha256:<hex>` format.
//!
//! Each record is keyed by the tracked file's full path, so `a/.bashrc` and
//! `b/.bashrc` never share a record.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use crate::fs::{FileSystem, FileSystemError};

const DIGEST_PREFIX: &str = "sha256:";
const RECORD_EXTENSION: &str = "sha256";
/// Hex characters of the path digest kept in a record's file name
const PATH_KEY_LEN: usize = 16;

/// Port for computing a content digest of a file
#[cfg_attr(test, mockall::automock)]
pub trait Checksum: Send + Sync {
    /// Digest of the file's current bytes
    ///
    /// The digest is stable for unchanged content and differs for any
    /// byte-level modification.
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError::Read`] if the file cannot be read.
    fn file_digest(&self, path: &Path) -> Result<String, ChecksumError>;
}

/// `sha256:<hex>` digest of `content`
#[must_use]
pub fn digest_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{DIGEST_PREFIX}{:x}", hasher.finalize())
}

/// SHA-256 digests of files read through a [`FileSystem`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Checksum<F> {
    fs: F,
}

impl<F: FileSystem> Sha256Checksum<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> Checksum for Sha256Checksum<F> {
    fn file_digest(&self, path: &Path) -> Result<String, ChecksumError> {
        let content = self
            .fs
            .read_bytes(path)
            .map_err(|source| ChecksumError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(digest_bytes(&content))
    }
}

#[derive(Error, Debug, Clone)]
pub enum ChecksumError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FileSystemError,
    },

    #[error("Failed to access checksum record {}: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: FileSystemError,
    },

    #[error("Cannot record a checksum for {}: file does not exist", .0.display())]
    Missing(PathBuf),
}

/// State of one rc file relative to its recorded digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumStatus {
    Unchanged,
    Modified { recorded: String, current: String },
    /// No digest has been recorded yet
    Untracked,
    /// The rc file itself does not exist
    Missing,
}

impl ChecksumStatus {
    #[must_use]
    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }
}

impl fmt::Display for ChecksumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("unchanged"),
            Self::Modified { .. } => f.write_str("modified"),
            Self::Untracked => f.write_str("untracked"),
            Self::Missing => f.write_str("missing"),
        }
    }
}

/// Recorded digests, one file per tracked rc file
pub struct ChecksumStore<'a, F: ?Sized, C: ?Sized> {
    fs: &'a F,
    checksum: &'a C,
    directory: PathBuf,
}

impl<'a, F, C> ChecksumStore<'a, F, C>
where
    F: FileSystem + ?Sized,
    C: Checksum + ?Sized,
{
    pub fn new(fs: &'a F, checksum: &'a C, directory: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            checksum,
            directory: directory.into(),
        }
    }

    /// Where the digest of `file` is recorded
    ///
    /// `<directory>/<basename>-<path key>.sha256`, where the path key is a
    /// prefix of the SHA-256 of `file` as given. Callers pass absolute paths.
    #[must_use]
    pub fn record_path(&self, file: &Path) -> PathBuf {
        let name = file
            .file_name()
            .map_or_else(|| "unnamed".into(), |name| name.to_string_lossy());
        let path_digest = digest_bytes(file.as_os_str().as_encoded_bytes());
        let key = &path_digest[DIGEST_PREFIX.len()..DIGEST_PREFIX.len() + PATH_KEY_LEN];

        self.directory
            .join(format!("{name}-{key}.{RECORD_EXTENSION}"))
    }

    /// Compare `file` against its recorded digest
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError`] if the file or its record cannot be read.
    pub fn verify(&self, file: &Path) -> Result<ChecksumStatus, ChecksumError> {
        if !self.fs.path_exists(file) {
            return Ok(ChecksumStatus::Missing);
        }

        let record = self.record_path(file);
        if !self.fs.path_exists(&record) {
            return Ok(ChecksumStatus::Untracked);
        }

        let recorded = self
            .fs
            .read_file(&record)
            .map_err(|source| ChecksumError::Record {
                path: record.clone(),
                source,
            })?
            .trim()
            .to_string();
        let current = self.checksum.file_digest(file)?;

        debug!(file = %file.display(), %recorded, %current, "verified checksum");

        if recorded == current {
            Ok(ChecksumStatus::Unchanged)
        } else {
            Ok(ChecksumStatus::Modified { recorded, current })
        }
    }

    /// Record the current digest of `file`, replacing any previous record
    ///
    /// # Errors
    ///
    /// Returns [`ChecksumError`] if `file` does not exist, cannot be read, or
    /// the record cannot be written.
    pub fn record(&self, file: &Path) -> Result<String, ChecksumError> {
        if !self.fs.path_exists(file) {
            return Err(ChecksumError::Missing(file.to_path_buf()));
        }

        let digest = self.checksum.file_digest(file)?;
        let record = self.record_path(file);

        self.fs
            .write_file(&record, format!("{digest}\n").as_bytes())
            .map_err(|source| ChecksumError::Record {
                path: record.clone(),
                source,
            })?;

        info!("recorded checksum for {}", file.display());

        Ok(digest)
    }
}
