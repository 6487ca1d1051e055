//! Sequence conflict detection and renumbering
//!
//! Two fragments that apply to the same execution context and share a
//! sequence number have no defined load order. This module finds those
//! collisions and, given an explicit choice of which fragment keeps its
//! number, renames the others to the next free numbers.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    context::ExecutionContext,
    fs::{FileSystem, FileSystemError},
};

use super::{
    discovery::{ApplicableSet, DiscoveryError, discover, discover_all_contexts, scan_fragments},
    name::{FragmentName, MAX_SEQUENCE},
};

/// Fragments in one applicable set that share a sequence number
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictRecord {
    sequence: u16,
    contenders: Vec<FragmentName>,
}

impl ConflictRecord {
    #[must_use]
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// The colliding fragments, in load order (always two or more)
    #[must_use]
    pub fn contenders(&self) -> &[FragmentName] {
        &self.contenders
    }
}

/// Conflicts found in one execution context
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConflicts {
    context: ExecutionContext,
    conflicts: Vec<ConflictRecord>,
}

impl ContextConflicts {
    #[must_use]
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    #[must_use]
    pub fn conflicts(&self) -> &[ConflictRecord] {
        &self.conflicts
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

impl From<&ApplicableSet> for ContextConflicts {
    fn from(set: &ApplicableSet) -> Self {
        Self {
            context: set.context().clone(),
            conflicts: find_conflicts(set),
        }
    }
}

/// Group `set` by sequence number and report every group of two or more
///
/// Records are ordered by sequence number; contenders keep their load order.
#[must_use]
pub fn find_conflicts(set: &ApplicableSet) -> Vec<ConflictRecord> {
    let mut groups: BTreeMap<u16, Vec<FragmentName>> = BTreeMap::new();

    for fragment in set {
        groups
            .entry(fragment.sequence())
            .or_default()
            .push(fragment.clone());
    }

    groups
        .into_iter()
        .filter(|(_, contenders)| contenders.len() > 1)
        .map(|(sequence, contenders)| ConflictRecord {
            sequence,
            contenders,
        })
        .collect()
}

/// Discover `ctx` and report its conflicts
///
/// # Errors
///
/// Returns [`DiscoveryError`] if `scripts_dir` does not exist or cannot be
/// read.
pub fn audit<F>(
    fs: &F,
    scripts_dir: &Path,
    ctx: &ExecutionContext,
) -> Result<ContextConflicts, DiscoveryError>
where
    F: FileSystem + ?Sized,
{
    let set = discover(fs, scripts_dir, ctx)?;
    Ok(ContextConflicts::from(&set))
}

/// Report conflicts for every context any fragment could apply to
///
/// Each context is reported on its own. A fragment that collides in several
/// contexts shows up once per context.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if `scripts_dir` does not exist or cannot be
/// read.
pub fn audit_all_contexts<F>(
    fs: &F,
    scripts_dir: &Path,
) -> Result<Vec<ContextConflicts>, DiscoveryError>
where
    F: FileSystem + ?Sized,
{
    let sets = discover_all_contexts(fs, scripts_dir)?;
    Ok(sets.iter().map(ContextConflicts::from).collect())
}

/// Which contender of a conflict keeps its sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepChoice {
    /// The first contender in load order
    First,

    /// The contender with this file name
    FileName(String),
}

impl KeepChoice {
    /// The contender this choice selects, if it is part of `conflict`
    #[must_use]
    pub fn select<'a>(&self, conflict: &'a ConflictRecord) -> Option<&'a FragmentName> {
        match self {
            Self::First => conflict.contenders.first(),
            Self::FileName(file_name) => conflict.contenders.iter().find(|fragment| {
                fragment.path().file_name().and_then(|n| n.to_str()) == Some(file_name.as_str())
            }),
        }
    }
}

/// A completed rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    from: PathBuf,
    to: PathBuf,
    old_sequence: u16,
    new_sequence: u16,
}

impl Rename {
    #[must_use]
    pub fn from(&self) -> &Path {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &Path {
        &self.to
    }

    #[must_use]
    pub fn old_sequence(&self) -> u16 {
        self.old_sequence
    }

    #[must_use]
    pub fn new_sequence(&self) -> u16 {
        self.new_sequence
    }
}

#[derive(Error, Debug, Clone)]
pub enum RenumberError {
    #[error("{} is not one of the fragments sharing sequence {sequence:03}", .path.display())]
    NotAContender { path: PathBuf, sequence: u16 },

    #[error("No free sequence number after {sequence:03} for {}: sequence space exhausted", .path.display())]
    SequenceSpaceExhausted { path: PathBuf, sequence: u16 },

    #[error("Fragment {} disappeared before it could be renumbered", .0.display())]
    ContenderMissing(PathBuf),

    #[error(transparent)]
    Scan(#[from] DiscoveryError),

    #[error("Failed to rename {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: FileSystemError,
    },
}

/// Outcome of renumbering one conflict
///
/// Renames are not rolled back when a later contender fails; both lists are
/// reported so the caller can show partial progress.
#[derive(Debug, Clone, Default)]
pub struct RenumberReport {
    renamed: Vec<Rename>,
    failed: Vec<RenumberError>,
}

impl RenumberReport {
    #[must_use]
    pub fn renamed(&self) -> &[Rename] {
        &self.renamed
    }

    #[must_use]
    pub fn failed(&self) -> &[RenumberError] {
        &self.failed
    }

    /// True when every contender other than the kept one was moved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renumber every contender of `conflict` except `keep`
///
/// Each other contender moves to the smallest sequence number above its
/// current one that no fragment anywhere in `scripts_dir` uses, so the fix
/// cannot create a collision in some other context. The directory is
/// re-scanned before every rename.
///
/// # Errors
///
/// Returns [`RenumberError::NotAContender`] without touching the disk if
/// `keep` is not part of `conflict`. Per-contender failures are collected in
/// the returned [`RenumberReport`].
#[instrument(skip(fs, conflict, keep), fields(sequence = conflict.sequence(), keep = %keep))]
pub fn renumber<F>(
    fs: &F,
    scripts_dir: &Path,
    conflict: &ConflictRecord,
    keep: &FragmentName,
) -> Result<RenumberReport, RenumberError>
where
    F: FileSystem + ?Sized,
{
    if !conflict
        .contenders
        .iter()
        .any(|fragment| fragment.path() == keep.path())
    {
        return Err(RenumberError::NotAContender {
            path: keep.path().to_path_buf(),
            sequence: conflict.sequence,
        });
    }

    let mut report = RenumberReport::default();

    for contender in conflict
        .contenders
        .iter()
        .filter(|fragment| fragment.path() != keep.path())
    {
        match renumber_one(fs, scripts_dir, contender) {
            Ok(rename) => {
                info!(
                    "renumbered {} -> {}",
                    rename.from.display(),
                    rename.to.display()
                );
                report.renamed.push(rename);
            }
            Err(err) => {
                warn!("{err}");
                report.failed.push(err);
            }
        }
    }

    Ok(report)
}

fn renumber_one<F>(
    fs: &F,
    scripts_dir: &Path,
    contender: &FragmentName,
) -> Result<Rename, RenumberError>
where
    F: FileSystem + ?Sized,
{
    // Earlier renames in this session may have changed the picture.
    let used: BTreeSet<u16> = scan_fragments(fs, scripts_dir)?
        .iter()
        .map(FragmentName::sequence)
        .collect();

    if !fs.path_exists(contender.path()) {
        return Err(RenumberError::ContenderMissing(
            contender.path().to_path_buf(),
        ));
    }

    let target_for = |sequence: u16| {
        contender
            .path()
            .with_file_name(contender.file_name_with_sequence(sequence))
    };

    let new_sequence = next_free_sequence(contender.sequence(), &used, |sequence| {
        fs.path_exists(&target_for(sequence))
    })
    .ok_or_else(|| RenumberError::SequenceSpaceExhausted {
        path: contender.path().to_path_buf(),
        sequence: contender.sequence(),
    })?;

    let from = contender.path().to_path_buf();
    let to = target_for(new_sequence);

    fs.rename(&from, &to)
        .map_err(|source| RenumberError::Rename {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;

    Ok(Rename {
        from,
        to,
        old_sequence: contender.sequence(),
        new_sequence,
    })
}

/// Linear probe for the first number above `current` that is neither in
/// `used` nor `occupied`
fn next_free_sequence(
    current: u16,
    used: &BTreeSet<u16>,
    occupied: impl Fn(u16) -> bool,
) -> Option<u16> {
    (current.saturating_add(1)..=MAX_SEQUENCE)
        .find(|sequence| !used.contains(sequence) && !occupied(*sequence))
}
