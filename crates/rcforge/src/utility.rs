//! Utility command dispatch: tiered index, resolution, and summaries

pub mod index;
pub mod summary;

pub use self::{
    index::{
        CommandResolution, IndexError, Tier, UtilityCommand, UtilityIndex, dispatch_name,
        resolve_command,
    },
    summary::read_summary,
};
