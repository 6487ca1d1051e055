//! Shell configuration fragments: naming, discovery, and sequence conflicts

pub mod conflict;
pub mod discovery;
pub mod name;

pub use self::{
    conflict::{
        ConflictRecord, ContextConflicts, KeepChoice, Rename, RenumberError, RenumberReport,
        audit, audit_all_contexts, find_conflicts, renumber,
    },
    discovery::{ApplicableSet, DiscoveryError, discover, discover_all_contexts},
    name::{FragmentName, MAX_SEQUENCE, Scope, ShellTag},
};
