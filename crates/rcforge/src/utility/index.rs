//! Two-tier utility index
//!
//! Utilities live in a user directory and a system directory. A user utility
//! shadows a system utility of the same name (an override). Two utilities in
//! the same tier with the same name, even with different extensions, are a
//! conflict and are never run.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::fs::{FileSystem, FileSystemError};

/// Precedence tier of a utility directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    User,
    System,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::System => f.write_str("system"),
        }
    }
}

/// One executable in one tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityCommand {
    name: String,
    tier: Tier,
    path: PathBuf,
}

impl UtilityCommand {
    /// Dispatch key: the file name with one extension stripped
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// What a command name resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResolution {
    /// Exactly one candidate in the searched tiers
    Unique(PathBuf),

    /// A user utility shadowing a system utility of the same name
    Override { user: PathBuf, shadowed: PathBuf },

    /// Several utilities in one tier claim the name; nothing may run
    Conflict { paths: BTreeSet<PathBuf>, tier: Tier },

    NotFound,
}

impl CommandResolution {
    /// The path to run, for `Unique` and `Override`
    #[must_use]
    pub fn executable(&self) -> Option<&Path> {
        match self {
            Self::Unique(path) | Self::Override { user: path, .. } => Some(path),
            Self::Conflict { .. } | Self::NotFound => None,
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum IndexError {
    #[error("Failed to read {tier} utility directory {}: {source}", .path.display())]
    Unreadable {
        tier: Tier,
        path: PathBuf,
        #[source]
        source: FileSystemError,
    },
}

#[derive(Debug, Clone, Default)]
struct TierIndex {
    commands: BTreeMap<String, UtilityCommand>,
    conflicts: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl TierIndex {
    fn scan<F>(fs: &F, dir: &Path, tier: Tier) -> Result<Self, IndexError>
    where
        F: FileSystem + ?Sized,
    {
        let mut index = Self::default();

        if !fs.path_exists(dir) {
            debug!("{tier} utility directory {} does not exist", dir.display());
            return Ok(index);
        }

        let mut entries = fs
            .list_directory(dir)
            .map_err(|source| IndexError::Unreadable {
                tier,
                path: dir.to_path_buf(),
                source,
            })?;

        // The first claimant of a name must not depend on readdir order.
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        for path in entries.into_iter().filter(|path| fs.is_executable(path)) {
            let Some(name) = dispatch_name(&path) else {
                continue;
            };

            match index.commands.get(&name) {
                Some(first) => {
                    index
                        .conflicts
                        .entry(name)
                        .or_insert_with(|| BTreeSet::from([first.path.clone()]))
                        .insert(path);
                }
                None => {
                    index
                        .commands
                        .insert(name.clone(), UtilityCommand { name, tier, path });
                }
            }
        }

        for (name, paths) in &index.conflicts {
            warn!(
                "{tier} utility '{name}' is ambiguous: {}",
                paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        Ok(index)
    }

    fn resolve(&self, name: &str, tier: Tier) -> Option<CommandResolution> {
        if let Some(paths) = self.conflicts.get(name) {
            return Some(CommandResolution::Conflict {
                paths: paths.clone(),
                tier,
            });
        }

        self.commands
            .get(name)
            .map(|command| CommandResolution::Unique(command.path.clone()))
    }
}

/// Name to executable index over the user and system tiers
///
/// Built from the current directory contents on every call; never cached.
#[derive(Debug, Clone, Default)]
pub struct UtilityIndex {
    user: TierIndex,
    system: TierIndex,
    overrides: BTreeMap<String, PathBuf>,
}

impl UtilityIndex {
    /// Scan both tiers and classify overrides and conflicts
    ///
    /// A tier directory that does not exist is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if an existing tier directory cannot be read.
    #[instrument(skip(fs))]
    pub fn build<F>(fs: &F, user_dir: &Path, system_dir: &Path) -> Result<Self, IndexError>
    where
        F: FileSystem + ?Sized,
    {
        let system = TierIndex::scan(fs, system_dir, Tier::System)?;
        let user = TierIndex::scan(fs, user_dir, Tier::User)?;

        // A conflicted user name is never an override.
        let overrides = user
            .commands
            .keys()
            .filter(|name| !user.conflicts.contains_key(*name))
            .filter_map(|name| {
                system
                    .commands
                    .get(name)
                    .map(|shadowed| (name.clone(), shadowed.path.clone()))
            })
            .collect();

        Ok(Self {
            user,
            system,
            overrides,
        })
    }

    /// Resolve `name` to a dispatch decision
    ///
    /// With `force_system` only the system tier is searched and user
    /// utilities are ignored entirely.
    #[must_use]
    pub fn resolve(&self, name: &str, force_system: bool) -> CommandResolution {
        if force_system {
            return self
                .system
                .resolve(name, Tier::System)
                .unwrap_or(CommandResolution::NotFound);
        }

        match self.user.resolve(name, Tier::User) {
            Some(CommandResolution::Unique(user)) => match self.overrides.get(name) {
                Some(shadowed) => CommandResolution::Override {
                    user,
                    shadowed: shadowed.clone(),
                },
                None => CommandResolution::Unique(user),
            },
            Some(resolution) => resolution,
            None => self
                .system
                .resolve(name, Tier::System)
                .unwrap_or(CommandResolution::NotFound),
        }
    }

    /// The effective command for every name, user tier first
    ///
    /// For a conflicted name this is the first path discovered in that tier.
    #[must_use]
    pub fn commands(&self) -> BTreeMap<&str, &UtilityCommand> {
        self.system
            .commands
            .iter()
            .chain(self.user.commands.iter())
            .map(|(name, command)| (name.as_str(), command))
            .collect()
    }

    /// Name to shadowed system path, for every user utility that overrides one
    #[must_use]
    pub fn overrides(&self) -> &BTreeMap<String, PathBuf> {
        &self.overrides
    }

    /// Name to colliding paths within `tier`
    #[must_use]
    pub fn conflicts(&self, tier: Tier) -> &BTreeMap<String, BTreeSet<PathBuf>> {
        match tier {
            Tier::User => &self.user.conflicts,
            Tier::System => &self.system.conflicts,
        }
    }
}

/// Rebuild the index and resolve one name
///
/// # Errors
///
/// Returns [`IndexError`] if an existing tier directory cannot be read.
pub fn resolve_command<F>(
    fs: &F,
    user_dir: &Path,
    system_dir: &Path,
    name: &str,
    force_system: bool,
) -> Result<CommandResolution, IndexError>
where
    F: FileSystem + ?Sized,
{
    let index = UtilityIndex::build(fs, user_dir, system_dir)?;
    let resolution = index.resolve(name, force_system);
    debug!(name, force_system, ?resolution, "resolved command");

    Ok(resolution)
}

/// Dispatch key for a utility file: its name with one extension stripped
#[must_use]
pub fn dispatch_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(ToString::to_string)
}
