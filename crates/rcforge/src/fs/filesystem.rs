//! File system port
//!
//! This module provides a trait-based abstraction for the file system operations
//! rcforge needs: directory listings, file type checks, reads, writes, and
//! renames. It follows the Hexagonal Architecture pattern by defining a port
//! for file system interactions.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

/// Port for file system operations (Hexagonal Architecture)
///
/// All file system interactions in the rcforge library go through this
/// abstraction, which keeps the resolution engine free of direct I/O and lets
/// tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Read a file and return its contents as a string
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the file does not exist, cannot be read,
    /// or is not valid UTF-8.
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Read a file's raw bytes
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the file does not exist or cannot be read.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FileSystemError>;

    /// Write data to a file
    ///
    /// Creates the file if it doesn't exist or overwrites it if it does.
    /// Creates any necessary parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the parent directory cannot be created
    /// or the file cannot be written.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FileSystemError>;

    /// Check if a path exists
    ///
    /// Works for both files and directories.
    fn path_exists(&self, path: &Path) -> bool;

    /// Check if a path is a regular file (symlinks are followed)
    fn is_file(&self, path: &Path) -> bool;

    /// Check if a path is a regular file with at least one execute bit set
    ///
    /// On platforms without permission bits every regular file counts as
    /// executable.
    fn is_executable(&self, path: &Path) -> bool;

    /// Expand a leading `~` to the user's home directory
    ///
    /// The path does not need to exist.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if the path needs a home
    /// directory that cannot be determined.
    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError>;

    /// List the immediate entries of a directory
    ///
    /// Entries are returned as full paths (`path` joined with the entry name),
    /// in whatever order the platform yields them.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the directory does not exist, is not a
    /// directory, or cannot be read.
    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError>;

    /// Rename a file in a single filesystem operation
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the rename fails.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError>;

    /// Get the user's rcforge configuration directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if the user's home
    /// directory cannot be determined.
    fn config_dir(&self) -> Result<PathBuf, FileSystemError>;

    /// Get the user's rcforge data directory
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::HomeDirNotFound`] if the user's home
    /// directory cannot be determined.
    fn data_dir(&self) -> Result<PathBuf, FileSystemError>;
}

/// Errors that can occur during file system operations
#[derive(Error, Debug, Clone)]
pub enum FileSystemError {
    /// General IO error occurred during file system operation
    #[error("IO error: {0}")]
    IoError(Arc<io::Error>),

    /// Home directory could not be determined (needed for path expansion)
    #[error("Home directory not found")]
    HomeDirNotFound,
}

impl From<io::Error> for FileSystemError {
    fn from(error: io::Error) -> Self {
        Self::IoError(Arc::new(error))
    }
}

#[cfg(test)]
impl MockFileSystem {
    /// Set up a mock for reading a file with specific content
    pub(crate) fn mock_read_file<P, S>(&mut self, path: P, content: S)
    where
        PathBuf: From<P>,
        S: ToString,
    {
        let path_buf = PathBuf::from(path);
        let content_string = content.to_string();
        self.expect_read_file()
            .with(mockall::predicate::eq(path_buf))
            .returning(move |_| Ok(content_string.clone()));
    }

    /// Set up a mock for listing directory contents
    ///
    /// Every listed entry is also reported as an executable regular file, which
    /// is what discovery and indexing ask about next.
    pub(crate) fn mock_directory_of_files<P>(&mut self, path: P, entries: &[&str])
    where
        PathBuf: From<P>,
    {
        let dir = PathBuf::from(path);
        let paths: Vec<PathBuf> = entries.iter().map(|entry| dir.join(entry)).collect();

        self.mock_path_exists::<PathBuf>(dir.clone(), true);
        for entry in &paths {
            let entry = entry.clone();
            self.expect_is_file()
                .with(mockall::predicate::eq(entry.clone()))
                .return_const(true);
            self.expect_is_executable()
                .with(mockall::predicate::eq(entry))
                .return_const(true);
        }

        self.expect_list_directory()
            .with(mockall::predicate::eq(dir))
            .returning(move |_| Ok(paths.clone()));
    }

    /// Set up a mock for path existence checking
    pub(crate) fn mock_path_exists<P>(&mut self, path: P, exists: bool)
    where
        PathBuf: From<P>,
    {
        self.expect_path_exists()
            .with(mockall::predicate::eq(PathBuf::from(path)))
            .returning(move |_| exists);
    }

    /// Set up the configuration and data directories
    ///
    /// Both may be asked for any number of times.
    pub(crate) fn mock_app_dirs<P>(&mut self, config_dir: P, data_dir: P)
    where
        PathBuf: From<P>,
    {
        let config_dir = PathBuf::from(config_dir);
        let data_dir = PathBuf::from(data_dir);
        self.expect_config_dir()
            .returning(move || Ok(config_dir.clone()));
        self.expect_data_dir()
            .returning(move || Ok(data_dir.clone()));
    }

    /// Set up a complete mock configuration file scenario
    ///
    /// `config.yaml` exists with `config_yaml` as its content and `config.yml`
    /// does not.
    pub(crate) fn mock_config_file(&mut self, config_dir: &std::path::Path, config_yaml: &str) {
        let config_path = config_dir.join("config.yaml");

        self.mock_path_exists(&config_path, true);
        self.mock_read_file(&config_path, config_yaml);
        self.mock_path_exists(config_dir.join("config.yml"), false);
    }

    /// Make `expand_path` the identity for every path
    pub(crate) fn mock_expand_path_identity(&mut self) {
        self.expect_expand_path()
            .returning(|path| Ok(path.to_path_buf()));
    }
}
