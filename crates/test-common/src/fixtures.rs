//! Temporary rcforge directory trees for integration tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

/// A throwaway config and data directory laid out like a real installation
///
/// ```text
/// <tmp>/config/rc-scripts
/// <tmp>/config/utils
/// <tmp>/data/utils
/// <tmp>/data/checksums
/// ```
pub struct RcForgeHome {
    dir: TempDir,
}

impl RcForgeHome {
    /// Creates the directory tree with every directory present.
    #[must_use]
    pub fn new() -> Self {
        let home = Self {
            dir: TempDir::new().unwrap(),
        };

        for dir in [
            home.scripts_dir(),
            home.user_utils_dir(),
            home.system_utils_dir(),
            home.checksum_dir(),
        ] {
            fs::create_dir_all(dir).unwrap();
        }

        home
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.path().join("config")
    }

    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.path().join("data")
    }

    #[must_use]
    pub fn scripts_dir(&self) -> PathBuf {
        self.config_dir().join("rc-scripts")
    }

    #[must_use]
    pub fn user_utils_dir(&self) -> PathBuf {
        self.config_dir().join("utils")
    }

    #[must_use]
    pub fn system_utils_dir(&self) -> PathBuf {
        self.data_dir().join("utils")
    }

    #[must_use]
    pub fn checksum_dir(&self) -> PathBuf {
        self.data_dir().join("checksums")
    }

    /// Writes a fragment into the scripts directory.
    pub fn add_fragment(&self, file_name: &str) -> PathBuf {
        let path = self.scripts_dir().join(file_name);
        fs::write(&path, format!("# {file_name}\n")).unwrap();
        path
    }

    /// Writes several fragments at once.
    pub fn add_fragments(&self, file_names: &[&str]) {
        for file_name in file_names {
            self.add_fragment(file_name);
        }
    }

    /// Writes an executable shell script into the user utility directory.
    pub fn add_user_utility(&self, file_name: &str, body: &str) -> PathBuf {
        write_executable(&self.user_utils_dir().join(file_name), body)
    }

    /// Writes an executable shell script into the system utility directory.
    pub fn add_system_utility(&self, file_name: &str, body: &str) -> PathBuf {
        write_executable(&self.system_utils_dir().join(file_name), body)
    }

    /// Writes `config.yaml` into the config directory.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.config_dir().join("config.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    /// Writes an arbitrary file relative to the temporary root.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

impl Default for RcForgeHome {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `body` to `path` as a `/bin/sh` script with mode 0755.
pub fn write_executable(path: &Path, body: &str) -> PathBuf {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    path.to_path_buf()
}

/// Sorted file names of the entries in `dir`.
#[must_use]
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
