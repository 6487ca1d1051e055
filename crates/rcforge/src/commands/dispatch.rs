//! Command dispatch
//!
//! Turns a typed command name into at most one child process. Conflicts and
//! unknown names never run anything; they become exit codes.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::{
    fs::FileSystem,
    utility::{CommandResolution, IndexError, Tier, resolve_command},
};

use super::runner::{RunError, UtilityRunner};

/// Exit status for a command name that resolves to nothing
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit status for an ambiguous command name
pub const EXIT_CONFLICT: i32 = 1;

/// What happened when a command name was dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The utility ran and exited with `exit_code`
    Ran {
        path: PathBuf,
        shadowed: Option<PathBuf>,
        exit_code: i32,
    },

    NotFound { name: String },

    /// Several utilities claim `name` in `tier`; none was run
    Conflict {
        name: String,
        paths: BTreeSet<PathBuf>,
        tier: Tier,
    },
}

impl DispatchOutcome {
    /// Process exit status for this outcome
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Ran { exit_code, .. } => *exit_code,
            Self::NotFound { .. } => EXIT_NOT_FOUND,
            Self::Conflict { .. } => EXIT_CONFLICT,
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Run(#[from] RunError),
}

/// Resolve `name` against both utility tiers and run the result with `args`
///
/// # Errors
///
/// Returns [`DispatchError`] if a tier directory cannot be read or the
/// resolved utility cannot be started.
#[instrument(skip(fs, runner, args))]
pub async fn dispatch<F, R>(
    fs: &F,
    runner: &R,
    user_dir: &Path,
    system_dir: &Path,
    name: &str,
    args: &[String],
    force_system: bool,
) -> Result<DispatchOutcome, DispatchError>
where
    F: FileSystem + ?Sized,
    R: UtilityRunner + ?Sized,
{
    let (path, shadowed) =
        match resolve_command(fs, user_dir, system_dir, name, force_system)? {
            CommandResolution::Unique(path) => (path, None),
            CommandResolution::Override { user, shadowed } => {
                debug!(
                    "user utility {} overrides {}",
                    user.display(),
                    shadowed.display()
                );
                (user, Some(shadowed))
            }
            CommandResolution::Conflict { paths, tier } => {
                warn!("refusing to run ambiguous {tier} utility '{name}'");
                return Ok(DispatchOutcome::Conflict {
                    name: name.to_string(),
                    paths,
                    tier,
                });
            }
            CommandResolution::NotFound => {
                return Ok(DispatchOutcome::NotFound {
                    name: name.to_string(),
                });
            }
        };

    let exit_code = runner.run(&path, args).await?;

    Ok(DispatchOutcome::Ran {
        path,
        shadowed,
        exit_code,
    })
}
