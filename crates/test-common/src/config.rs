//! `AppConfig` test helpers to eliminate duplication across command tests.

use crate::{constants::TEST_SCRIPTS_DIR, fixtures::RcForgeHome};
use rcforge::config::{AppConfig, AppConfigBuilder};

/// Creates a standard test configuration with colors disabled.
#[must_use]
pub fn test_config() -> AppConfig {
    AppConfigBuilder::default()
        .scripts_directory(TEST_SCRIPTS_DIR)
        .use_colors(false)
        .build()
}

/// Creates a test configuration whose every directory lives in `home`.
#[must_use]
pub fn test_config_for_home(home: &RcForgeHome) -> AppConfig {
    AppConfigBuilder::default()
        .scripts_directory(home.scripts_dir())
        .user_utility_directory(home.user_utils_dir())
        .system_utility_directory(home.system_utils_dir())
        .checksum_directory(home.checksum_dir())
        .checksum_files([home.path().join(".bashrc"), home.path().join(".zshrc")])
        .use_colors(false)
        .build()
}
