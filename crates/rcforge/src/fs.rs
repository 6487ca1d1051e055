//! File system abstraction layer
//!
//! Everything the engine reads or renames goes through the [`FileSystem`] port
//! so discovery, renumbering, and utility indexing can be tested against a mock.

pub mod filesystem;
pub mod real;

pub use self::{
    filesystem::{FileSystem, FileSystemError},
    real::RealFileSystem,
};
