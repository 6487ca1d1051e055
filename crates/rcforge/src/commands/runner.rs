//! Utility runner port
//!
//! Abstracts starting a resolved utility so dispatch decisions can be tested
//! without spawning processes.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use thiserror::Error;

/// Port for running a utility executable (Hexagonal Architecture)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UtilityRunner: Send + Sync {
    /// Run `program` with `args`, attached to the caller's terminal
    ///
    /// Returns the exit status to propagate. A child killed by a signal
    /// reports `128 + signal`, the way shells do.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] if the program cannot be started or waited on.
    async fn run(&self, program: &Path, args: &[String]) -> Result<i32, RunError>;
}

/// Errors that can occur while running a utility
#[derive(Error, Debug, Clone)]
pub enum RunError {
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("Failed waiting for {}: {source}", .program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
}
