pub mod yaml;

pub use self::yaml::Yaml;

use std::path::PathBuf;

use thiserror::Error;

use crate::{config::AppConfig, fs::FileSystemError};

/// Port for loading configuration from disk
///
#[cfg_attr(test, mockall::automock)]
pub trait ConfigLoader: Send + Sync {
    /// Load configuration from the standard location
    ///
    /// A missing configuration file is not an error; every setting then takes
    /// its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the configuration directory cannot be
    /// determined, more than one configuration file exists, or the file does
    /// not deserialize.
    fn load_config(&self) -> Result<AppConfig, ConfigLoadError>;

    /// Configuration files present in the configuration directory
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the configuration directory cannot be
    /// determined.
    fn find_config_file_paths(&self) -> Result<Vec<PathBuf>, ConfigLoadError>;
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error(transparent)]
    FileSystemError(#[from] FileSystemError),

    #[error("Multiple configuration files found: {}", .0.join(", "))]
    MultipleFound(Vec<String>),

    #[error(transparent)]
    ConfigError(#[from] ::config::ConfigError),
}

/// This trait allows for applying runtime CLI arguments on top of the configuration that the app
/// read from the config file.
///
pub trait ApplyToConfig {
    /// Implement this method such that the arguments in `args` are applied after/on top of the
    /// configuration that was loaded from the config file.
    ///
    fn apply_to_config(&self, config: AppConfig) -> AppConfig;
}
