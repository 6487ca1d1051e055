//! Fragment discovery
//!
//! Scans a scripts directory and returns the fragments that apply to one
//! execution context, in load order. Nothing is cached: every call re-reads
//! the directory so edits between shell starts are always picked up.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    context::{ExecutionContext, Shell},
    fs::{FileSystem, FileSystemError},
};

use super::name::{FragmentName, Scope};

/// Fragments that apply to one execution context, in load order
///
/// Ordered by sequence number. Fragments sharing a sequence number are all
/// kept, in file name order, so conflicts stay visible to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicableSet {
    context: ExecutionContext,
    fragments: Vec<FragmentName>,
}

impl ApplicableSet {
    pub(crate) fn from_scan(context: ExecutionContext, scanned: &[FragmentName]) -> Self {
        let mut fragments: Vec<FragmentName> = scanned
            .iter()
            .filter(|fragment| fragment.applies_to(&context))
            .cloned()
            .collect();

        // Stable: equal sequence numbers keep their scan order.
        fragments.sort_by_key(FragmentName::sequence);

        Self { context, fragments }
    }

    #[must_use]
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    #[must_use]
    pub fn fragments(&self) -> &[FragmentName] {
        &self.fragments
    }

    pub fn iter(&self) -> impl Iterator<Item = &FragmentName> {
        self.fragments.iter()
    }

    /// Paths in the order the loader should source them
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.fragments.iter().map(FragmentName::path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl<'a> IntoIterator for &'a ApplicableSet {
    type Item = &'a FragmentName;
    type IntoIter = std::slice::Iter<'a, FragmentName>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

#[derive(Error, Debug, Clone)]
pub enum DiscoveryError {
    #[error("Scripts directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read scripts directory {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: FileSystemError,
    },
}

/// Discover the fragments in `scripts_dir` that apply to `ctx`
///
/// # Errors
///
/// Returns [`DiscoveryError`] if `scripts_dir` does not exist or cannot be
/// read. Files with malformed names are skipped, not reported.
#[instrument(skip(fs), fields(context = %ctx))]
pub fn discover<F>(
    fs: &F,
    scripts_dir: &Path,
    ctx: &ExecutionContext,
) -> Result<ApplicableSet, DiscoveryError>
where
    F: FileSystem + ?Sized,
{
    let scanned = scan_fragments(fs, scripts_dir)?;
    let set = ApplicableSet::from_scan(ctx.clone(), &scanned);

    debug!(
        scanned = scanned.len(),
        applicable = set.len(),
        "discovered fragments"
    );

    Ok(set)
}

/// Discover one [`ApplicableSet`] per context that any fragment could apply to
///
/// Contexts are every hostname named by a fragment plus `global`, crossed
/// with every supported shell. The directory is scanned once so all sets
/// come from the same snapshot.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if `scripts_dir` does not exist or cannot be
/// read.
#[instrument(skip(fs))]
pub fn discover_all_contexts<F>(
    fs: &F,
    scripts_dir: &Path,
) -> Result<Vec<ApplicableSet>, DiscoveryError>
where
    F: FileSystem + ?Sized,
{
    let scanned = scan_fragments(fs, scripts_dir)?;

    let hosts: BTreeSet<&str> = scanned
        .iter()
        .filter_map(|fragment| match fragment.scope() {
            Scope::Host(host) => Some(host.as_str()),
            Scope::Global => None,
        })
        .collect();

    let hostnames = std::iter::once(Scope::Global.as_str()).chain(hosts);

    let sets = hostnames
        .flat_map(|hostname| {
            Shell::ALL
                .into_iter()
                .map(move |shell| ExecutionContext::new(hostname, shell))
        })
        .map(|ctx| ApplicableSet::from_scan(ctx, &scanned))
        .collect();

    Ok(sets)
}

/// Every well-formed fragment in `scripts_dir`, sorted by file name
pub(crate) fn scan_fragments<F>(
    fs: &F,
    scripts_dir: &Path,
) -> Result<Vec<FragmentName>, DiscoveryError>
where
    F: FileSystem + ?Sized,
{
    if !fs.path_exists(scripts_dir) {
        return Err(DiscoveryError::DirectoryNotFound(scripts_dir.to_path_buf()));
    }

    let mut entries =
        fs.list_directory(scripts_dir)
            .map_err(|source| DiscoveryError::Unreadable {
                path: scripts_dir.to_path_buf(),
                source,
            })?;

    // readdir order is platform dependent; file name order is not.
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let fragments = entries
        .into_iter()
        .filter(|path| fs.is_file(path))
        .filter_map(|path| {
            let fragment = FragmentName::from_path(&path);
            if fragment.is_none() {
                debug!("skipping {}: not a fragment name", path.display());
            }
            fragment
        })
        .collect();

    Ok(fragments)
}
