pub mod loader;
pub mod validate;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::context::{ExecutionContext, Shell, local_hostname};

const VERBOSE_DEFAULT: bool = false;
const USE_COLORS_DEFAULT: bool = true;

/// Comprehensive application configuration that combines file config and CLI args
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    // Locations
    pub(crate) scripts_directory: PathBuf,
    pub(crate) user_utility_directory: PathBuf,
    pub(crate) system_utility_directory: PathBuf,
    pub(crate) checksum_directory: PathBuf,

    /// Overrides the detected short hostname
    #[serde(default)]
    pub(crate) hostname: Option<String>,

    // UI settings
    #[serde(default)]
    pub(crate) verbose: bool,

    #[serde(default = "default_use_colors")]
    pub(crate) use_colors: bool,

    /// Shell rc files whose digests `rc checksum` tracks
    #[serde(default = "default_checksum_files")]
    pub(crate) checksum_files: Vec<PathBuf>,
}

fn default_use_colors() -> bool {
    USE_COLORS_DEFAULT
}

pub(crate) fn default_checksum_files() -> Vec<PathBuf> {
    vec![PathBuf::from("~/.bashrc"), PathBuf::from("~/.zshrc")]
}

impl AppConfig {
    #[must_use]
    pub fn scripts_directory(&self) -> &Path {
        &self.scripts_directory
    }

    #[must_use]
    pub fn user_utility_directory(&self) -> &Path {
        &self.user_utility_directory
    }

    #[must_use]
    pub fn system_utility_directory(&self) -> &Path {
        &self.system_utility_directory
    }

    #[must_use]
    pub fn checksum_directory(&self) -> &Path {
        &self.checksum_directory
    }

    #[must_use]
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    #[must_use]
    pub fn checksum_files(&self) -> &[PathBuf] {
        &self.checksum_files
    }

    /// The context to discover fragments for
    ///
    /// Explicit arguments win, then the configured hostname, then the local
    /// machine's short hostname and the shell named by `$SHELL`.
    #[must_use]
    pub fn execution_context(&self, hostname: Option<&str>, shell: Option<Shell>) -> ExecutionContext {
        let hostname = hostname
            .or(self.hostname())
            .map_or_else(local_hostname, ToString::to_string);
        let shell = shell.or_else(Shell::from_env).unwrap_or_default();

        ExecutionContext::new(hostname, shell)
    }

    pub fn scripts_directory_mut(&mut self) -> &mut PathBuf {
        &mut self.scripts_directory
    }

    pub fn hostname_mut(&mut self) -> &mut Option<String> {
        &mut self.hostname
    }

    pub fn verbose_mut(&mut self) -> &mut bool {
        &mut self.verbose
    }

    pub fn use_colors_mut(&mut self) -> &mut bool {
        &mut self.use_colors
    }
}

/// Builder pattern for `AppConfig` testing
///
#[derive(Default, Debug)]
pub struct AppConfigBuilder {
    scripts_directory: PathBuf,
    user_utility_directory: PathBuf,
    system_utility_directory: PathBuf,
    checksum_directory: PathBuf,
    hostname: Option<String>,
    verbose: Option<bool>,
    use_colors: Option<bool>,
    checksum_files: Option<Vec<PathBuf>>,
}

impl AppConfigBuilder {
    #[must_use]
    pub fn scripts_directory<D>(mut self, scripts_directory: D) -> Self
    where
        D: AsRef<std::ffi::OsStr>,
    {
        self.scripts_directory = PathBuf::from(scripts_directory.as_ref());
        self
    }

    #[must_use]
    pub fn user_utility_directory<D>(mut self, directory: D) -> Self
    where
        D: AsRef<std::ffi::OsStr>,
    {
        self.user_utility_directory = PathBuf::from(directory.as_ref());
        self
    }

    #[must_use]
    pub fn system_utility_directory<D>(mut self, directory: D) -> Self
    where
        D: AsRef<std::ffi::OsStr>,
    {
        self.system_utility_directory = PathBuf::from(directory.as_ref());
        self
    }

    #[must_use]
    pub fn checksum_directory<D>(mut self, directory: D) -> Self
    where
        D: AsRef<std::ffi::OsStr>,
    {
        self.checksum_directory = PathBuf::from(directory.as_ref());
        self
    }

    #[must_use]
    pub fn hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_string());
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = Some(use_colors);
        self
    }

    #[must_use]
    pub fn checksum_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.checksum_files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        AppConfig {
            scripts_directory: self.scripts_directory,
            user_utility_directory: self.user_utility_directory,
            system_utility_directory: self.system_utility_directory,
            checksum_directory: self.checksum_directory,
            hostname: self.hostname,
            verbose: self.verbose.unwrap_or(VERBOSE_DEFAULT),
            use_colors: self.use_colors.unwrap_or(USE_COLORS_DEFAULT),
            checksum_files: self.checksum_files.unwrap_or_else(default_checksum_files),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_app_config_builder() {
        let config = AppConfigBuilder::default()
            .scripts_directory("/test/rc-scripts")
            .user_utility_directory("/test/utils")
            .system_utility_directory("/test/system/utils")
            .checksum_directory("/test/checksums")
            .hostname("laptop")
            .verbose(true)
            .use_colors(false)
            .checksum_files(["/home/test/.bashrc"])
            .build();

        assert_eq!(config.scripts_directory(), Path::new("/test/rc-scripts"));
        assert_eq!(config.user_utility_directory(), Path::new("/test/utils"));
        assert_eq!(
            config.system_utility_directory(),
            Path::new("/test/system/utils")
        );
        assert_eq!(config.checksum_directory(), Path::new("/test/checksums"));
        assert_eq!(config.hostname(), Some("laptop"));
        assert!(config.verbose());
        assert!(!config.use_colors());
        assert_eq!(
            config.checksum_files(),
            &[PathBuf::from("/home/test/.bashrc")]
        );
    }

    #[test]
    fn test_default_values() {
        let config = AppConfigBuilder::default()
            .scripts_directory("/test/rc-scripts")
            .build();

        assert_eq!(config.hostname(), None);
        assert_eq!(config.verbose(), VERBOSE_DEFAULT);
        assert_eq!(config.use_colors(), USE_COLORS_DEFAULT);
        assert_eq!(config.checksum_files(), default_checksum_files().as_slice());
    }

    #[test]
    fn test_mutable_accessors() {
        let mut config = AppConfigBuilder::default()
            .scripts_directory("/old/path")
            .build();

        *config.scripts_directory_mut() = PathBuf::from("/new/path");
        *config.hostname_mut() = Some("server".to_string());
        *config.verbose_mut() = true;
        *config.use_colors_mut() = false;

        assert_eq!(config.scripts_directory(), Path::new("/new/path"));
        assert_eq!(config.hostname(), Some("server"));
        assert!(config.verbose());
        assert!(!config.use_colors());
    }

    #[test]
    fn test_execution_context_precedence() {
        let config = AppConfigBuilder::default().hostname("configured").build();

        let ctx = config.execution_context(Some("explicit"), Some(Shell::Zsh));
        assert_eq!(ctx.hostname(), "explicit");
        assert_eq!(ctx.shell(), Shell::Zsh);

        let ctx = config.execution_context(None, Some(Shell::Bash));
        assert_eq!(ctx.hostname(), "configured");
    }

    #[test]
    fn test_execution_context_detects_hostname() {
        let config = AppConfigBuilder::default().build();
        let ctx = config.execution_context(None, Some(Shell::Bash));

        assert!(!ctx.hostname().is_empty());
        assert!(!ctx.hostname().contains('.'));
    }

    #[test]
    fn test_serde_deserialization() {
        let yaml = r#"
            scripts_directory: "/opt/rc-scripts"
            user_utility_directory: "/opt/utils"
            system_utility_directory: "/usr/share/rcforge/utils"
            checksum_directory: "/var/rcforge/checksums"
            hostname: "laptop"
            verbose: true
            use_colors: false
            checksum_files:
              - "/home/me/.bashrc"
        "#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.scripts_directory, PathBuf::from("/opt/rc-scripts"));
        assert_eq!(config.hostname.as_deref(), Some("laptop"));
        assert!(config.verbose);
        assert!(!config.use_colors);
        assert_eq!(config.checksum_files, vec![PathBuf::from("/home/me/.bashrc")]);
    }

    #[test]
    fn test_serde_partial_deserialization() {
        let yaml = r#"
            scripts_directory: "/opt/rc-scripts"
            user_utility_directory: "/opt/utils"
            system_utility_directory: "/usr/share/rcforge/utils"
            checksum_directory: "/var/rcforge/checksums"
        "#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.hostname, None);
        assert!(!config.verbose);
        assert!(config.use_colors);
        assert_eq!(config.checksum_files, default_checksum_files());
    }
}
