use std::path::{Path, PathBuf};

use config::FileFormat;
use tracing::debug;

use crate::{config::AppConfig, fs::FileSystem};

use super::{ConfigLoadError, ConfigLoader};

const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

pub struct Yaml<'a, F: FileSystem> {
    fs: &'a F,
}

impl<'a, F: FileSystem> Yaml<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    fn expand(&self, path: &mut PathBuf) -> Result<(), ConfigLoadError> {
        *path = self.fs.expand_path(path)?;
        Ok(())
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl<F: FileSystem> ConfigLoader for Yaml<'_, F> {
    fn load_config(&self) -> Result<AppConfig, ConfigLoadError> {
        let config_paths = self.find_config_file_paths()?;

        if config_paths.len() > 1 {
            return Err(ConfigLoadError::MultipleFound(
                config_paths
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>(),
            ));
        }

        let config_dir = self.fs.config_dir()?;
        let data_dir = self.fs.data_dir()?;

        // Directory defaults depend on where the platform keeps app dirs.
        let mut builder = config::Config::builder()
            .set_default("scripts_directory", path_value(&config_dir.join("rc-scripts")))?
            .set_default("user_utility_directory", path_value(&config_dir.join("utils")))?
            .set_default("system_utility_directory", path_value(&data_dir.join("utils")))?
            .set_default("checksum_directory", path_value(&data_dir.join("checksums")))?;

        if let Some(config_path) = config_paths.first() {
            debug!("loading configuration from {}", config_path.display());
            let file_contents = self.fs.read_file(config_path)?;
            builder = builder.add_source(config::File::from_str(&file_contents, FileFormat::Yaml));
        } else {
            debug!(
                "no configuration file in {}, using defaults",
                config_dir.display()
            );
        }

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        self.expand(&mut app_config.scripts_directory)?;
        self.expand(&mut app_config.user_utility_directory)?;
        self.expand(&mut app_config.system_utility_directory)?;
        self.expand(&mut app_config.checksum_directory)?;
        for file in &mut app_config.checksum_files {
            self.expand(file)?;
        }

        Ok(app_config)
    }

    fn find_config_file_paths(&self) -> Result<Vec<PathBuf>, ConfigLoadError> {
        let config_dir = self.fs.config_dir()?;

        Ok(CONFIG_FILE_NAMES
            .iter()
            .map(|name| config_dir.join(name))
            .filter(|path| self.fs.path_exists(path))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FileSystemError, filesystem::MockFileSystem};
    use pretty_assertions::assert_eq;

    const CONFIG_DIR: &str = "/home/test/.config/rcforge";
    const DATA_DIR: &str = "/home/test/.local/share/rcforge";

    fn setup_fs(config_yaml: Option<&str>) -> MockFileSystem {
        let mut fs = MockFileSystem::default();
        let config_dir = Path::new(CONFIG_DIR);

        fs.mock_app_dirs(CONFIG_DIR, DATA_DIR);
        fs.mock_expand_path_identity();

        match config_yaml {
            Some(yaml) => fs.mock_config_file(config_dir, yaml),
            None => {
                fs.mock_path_exists(config_dir.join("config.yaml"), false);
                fs.mock_path_exists(config_dir.join("config.yml"), false);
            }
        }

        fs
    }

    mod find_config_file_paths {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_find_config_paths() {
            let fs = setup_fs(Some("verbose: true"));

            let paths = Yaml::new(&fs).find_config_file_paths().unwrap();

            assert_eq!(paths, vec![Path::new(CONFIG_DIR).join("config.yaml")]);
        }

        #[test]
        fn test_find_config_paths_multiple_formats() {
            let mut fs = MockFileSystem::default();
            let config_dir = Path::new(CONFIG_DIR);

            fs.expect_config_dir()
                .returning(|| Ok(PathBuf::from(CONFIG_DIR)));
            fs.mock_path_exists(config_dir.join("config.yaml"), true);
            fs.mock_path_exists(config_dir.join("config.yml"), true);

            let paths = Yaml::new(&fs).find_config_file_paths().unwrap();

            assert_eq!(paths.len(), 2);
        }

        #[test]
        fn test_find_config_paths_none() {
            let fs = setup_fs(None);

            let paths = Yaml::new(&fs).find_config_file_paths().unwrap();

            assert!(paths.is_empty());
        }

        #[test]
        fn test_find_config_paths_no_config_dir() {
            let mut fs = MockFileSystem::default();
            fs.expect_config_dir()
                .return_once(|| Err(FileSystemError::HomeDirNotFound));

            let result = Yaml::new(&fs).find_config_file_paths();

            assert!(matches!(
                result,
                Err(ConfigLoadError::FileSystemError(
                    FileSystemError::HomeDirNotFound
                ))
            ));
        }
    }

    mod load_config {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_config() {
            let fs = setup_fs(Some(
                r#"
                scripts_directory: "/test/rc-scripts"
                hostname: "laptop"
                verbose: true
                "#,
            ));

            let config = Yaml::new(&fs).load_config().unwrap();

            assert_eq!(config.scripts_directory(), Path::new("/test/rc-scripts"));
            assert_eq!(config.hostname(), Some("laptop"));
            assert!(config.verbose());
            assert_eq!(
                config.user_utility_directory(),
                Path::new(CONFIG_DIR).join("utils")
            );
        }

        #[test]
        fn test_load_config_defaults_without_file() {
            let fs = setup_fs(None);

            let config = Yaml::new(&fs).load_config().unwrap();

            assert_eq!(
                config.scripts_directory(),
                Path::new(CONFIG_DIR).join("rc-scripts")
            );
            assert_eq!(
                config.user_utility_directory(),
                Path::new(CONFIG_DIR).join("utils")
            );
            assert_eq!(
                config.system_utility_directory(),
                Path::new(DATA_DIR).join("utils")
            );
            assert_eq!(
                config.checksum_directory(),
                Path::new(DATA_DIR).join("checksums")
            );
            assert_eq!(config.hostname(), None);
            assert!(!config.verbose());
            assert!(config.use_colors());
            assert_eq!(config.checksum_files().len(), 2);
        }

        #[test]
        fn test_load_config_with_tilde_expansion() {
            let mut fs = MockFileSystem::default();
            let config_dir = Path::new(CONFIG_DIR);

            fs.mock_app_dirs(CONFIG_DIR, DATA_DIR);
            fs.mock_config_file(
                config_dir,
                r#"
                scripts_directory: "~/dotfiles/rc-scripts"
                checksum_files: ["~/.bashrc"]
                "#,
            );
            fs.expect_expand_path().returning(|path| {
                Ok(match path.strip_prefix("~") {
                    Ok(rest) => Path::new("/home/test").join(rest),
                    Err(_) => path.to_path_buf(),
                })
            });

            let config = Yaml::new(&fs).load_config().unwrap();

            assert_eq!(
                config.scripts_directory(),
                Path::new("/home/test/dotfiles/rc-scripts")
            );
            assert_eq!(
                config.checksum_files(),
                &[PathBuf::from("/home/test/.bashrc")]
            );
        }

        #[test]
        fn test_load_config_invalid_yaml() {
            let fs = setup_fs(Some(
                r#"
        scripts_directory: "/test/rc-scripts"
        invalid:yaml:format
    "#,
            ));

            let result = Yaml::new(&fs).load_config();

            assert!(matches!(result, Err(ConfigLoadError::ConfigError(_))));
        }

        #[test]
        fn test_load_config_invalid_field_types() {
            let fs = setup_fs(Some(
                r#"
                verbose: "sometimes"
                "#,
            ));

            let result = Yaml::new(&fs).load_config();

            assert!(matches!(result, Err(ConfigLoadError::ConfigError(_))));
        }

        #[test]
        fn test_multiple_files() {
            let mut fs = MockFileSystem::default();
            let config_dir = Path::new(CONFIG_DIR);

            fs.expect_config_dir()
                .returning(|| Ok(PathBuf::from(CONFIG_DIR)));
            fs.mock_path_exists(config_dir.join("config.yaml"), true);
            fs.mock_path_exists(config_dir.join("config.yml"), true);

            let result = Yaml::new(&fs).load_config();

            assert!(matches!(result, Err(ConfigLoadError::MultipleFound(_))));
        }
    }
}
