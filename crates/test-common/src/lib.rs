//! Common test utilities shared across all rcforge crates.
//!
//! This crate provides standardized test helpers to eliminate code duplication
//! while maintaining test clarity and ergonomics.

pub mod config;
pub mod constants;
pub mod fixtures;

// Re-export the most commonly used items for convenience
pub use config::{test_config, test_config_for_home};
pub use constants::*;
pub use fixtures::{RcForgeHome, file_names, write_executable};

// Re-export commonly used external dependencies for convenience
pub use rcforge::config::AppConfigBuilder;
pub use tempfile::TempDir;
