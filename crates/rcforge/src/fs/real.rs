//! Real file system adapter implementation

use std::{
    fs,
    path::{Path, PathBuf},
};

use etcetera::{AppStrategy, AppStrategyArgs, choose_app_strategy};

use super::filesystem::{FileSystem, FileSystemError};

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "RCFORGE_CONFIG_DIR";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "RCFORGE_DATA_DIR";

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    fn app_strategy() -> Result<impl AppStrategy, FileSystemError> {
        choose_app_strategy(AppStrategyArgs {
            top_level_domain: "io".to_string(),
            author: "rcforge".to_string(),
            app_name: "rcforge".to_string(),
        })
        .map_err(|_| FileSystemError::HomeDirNotFound)
    }
}

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        Ok(fs::read_to_string(path)?)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        Ok(fs::read(path)?)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(fs::write(path, data)?)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[cfg(unix)]
    fn is_executable(&self, path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::metadata(path)
            .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    fn is_executable(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
        let binding = path.to_string_lossy();
        let expanded = shellexpand::tilde(&binding);

        if expanded.starts_with('~') {
            return Err(FileSystemError::HomeDirNotFound);
        }

        Ok(PathBuf::from(expanded.as_ref()))
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let entries = fs::read_dir(path)?;

        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }

        Ok(paths)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FileSystemError> {
        Ok(fs::rename(from, to)?)
    }

    fn config_dir(&self) -> Result<PathBuf, FileSystemError> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        Self::app_strategy().map(|xdg| xdg.config_dir())
    }

    fn data_dir(&self) -> Result<PathBuf, FileSystemError> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        Self::app_strategy().map(|xdg| xdg.data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_path_exists() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        assert!(!fs.path_exists(&file_path));

        File::create(&file_path).unwrap();

        assert!(fs.path_exists(&file_path));
        assert!(fs.is_file(&file_path));
        assert!(!fs.is_file(dir.path()));
    }

    #[test]
    fn test_list_directory() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();

        let file1 = dir.path().join("100_global_common_env.sh");
        let file2 = dir.path().join("200_global_bash_prompt.sh");

        File::create(&file1).unwrap();
        File::create(&file2).unwrap();

        let paths = fs.list_directory(dir.path()).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&file1));
        assert!(paths.contains(&file2));
    }

    #[test]
    fn test_list_missing_directory() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();

        let err = fs.list_directory(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, FileSystemError::IoError(_)));
    }

    #[test]
    fn test_read_and_write_file() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested").join("test_read.txt");

        fs.write_file(&file_path, b"Hello, world!").unwrap();

        let content = fs.read_file(&file_path).unwrap();
        assert_eq!(content, "Hello, world!");

        let err = fs.read_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, FileSystemError::IoError(_)));
    }

    #[test]
    fn test_read_bytes_keeps_non_utf8_content() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(".bashrc");
        std::fs::write(&file_path, [0xff, 0xfe, b'\n']).unwrap();

        assert_eq!(fs.read_bytes(&file_path).unwrap(), vec![0xff, 0xfe, b'\n']);
        assert!(fs.read_file(&file_path).is_err());
    }

    #[test]
    fn test_rename() {
        let fs = RealFileSystem;
        let dir = tempdir().unwrap();
        let from = dir.path().join("200_global_common_b.sh");
        let to = dir.path().join("201_global_common_b.sh");
        std::fs::write(&from, "export B=1\n").unwrap();

        fs.rename(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "export B=1\n");
    }

    #[test]
    fn test_expand_path_leaves_absolute_paths_alone() {
        let fs = RealFileSystem;
        let expanded = fs.expand_path(Path::new("/does/not/exist")).unwrap();
        assert_eq!(expanded, PathBuf::from("/does/not/exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable() {
        use std::os::unix::fs::PermissionsExt;

        let fs = RealFileSystem;
        let dir = tempdir().unwrap();
        let script = dir.path().join("hello.sh");
        std::fs::write(&script, "#!/bin/sh\necho hello\n").unwrap();

        assert!(!fs.is_executable(&script));

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(fs.is_executable(&script));

        // Directories are never executables, even with the x bit set
        assert!(!fs.is_executable(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        // Root ignores permission bits, so there is nothing to observe
        if nix::unistd::Uid::effective().is_root() {
            return;
        }

        let fs = RealFileSystem;
        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        let result = fs.list_directory(&locked);

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(matches!(result, Err(FileSystemError::IoError(_))));
    }
}
