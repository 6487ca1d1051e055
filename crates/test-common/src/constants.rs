//! Common test constants used across multiple test files.

/// Hostname used for host-scoped fragments in tests
pub const TEST_HOST: &str = "testhost";

/// A second hostname for cross-context tests
pub const OTHER_HOST: &str = "otherhost";

/// Default scripts directory path for config-only tests
pub const TEST_SCRIPTS_DIR: &str = "/tmp/rcforge-test/rc-scripts";

/// Environment variable that points the CLI at a config directory
pub const CONFIG_DIR_ENV: &str = "RCFORGE_CONFIG_DIR";

/// Environment variable that points the CLI at a data directory
pub const DATA_DIR_ENV: &str = "RCFORGE_DATA_DIR";
