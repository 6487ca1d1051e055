//! rcforge - A personal shell configuration manager
//!
//! The `rcforge` library decides which shell configuration fragments load on a
//! given machine and shell, keeps their load order free of sequence number
//! collisions, and resolves utility command names across a user tier and a
//! system tier. It implements a hexagonal architecture with ports and adapters
//! so the decision logic never touches the file system or spawns processes
//! directly.
//!
//! # Main Components
//!
//! - [`fragment`] - Fragment name parsing, discovery, and sequence conflict resolution
//! - [`utility`] - Two-tier utility index and command resolution
//! - [`commands`] - Running resolved utilities
//! - [`checksum`] - Shell rc file integrity records
//! - [`config`] - Application configuration management
//! - [`context`] - The `(hostname, shell)` execution context
//! - [`fs`] - File system abstractions
//! - [`validation`] - Validation types and utilities
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rcforge::{
//!     context::{ExecutionContext, Shell},
//!     fragment::{discover, find_conflicts},
//!     fs::RealFileSystem,
//! };
//!
//! let fs = RealFileSystem;
//! let ctx = ExecutionContext::for_local_host(Shell::Zsh);
//! let set = discover(&fs, Path::new("/home/me/.config/rcforge/rc-scripts"), &ctx)?;
//!
//! for conflict in find_conflicts(&set) {
//!     eprintln!(
//!         "sequence {} is claimed {} times",
//!         conflict.sequence(),
//!         conflict.contenders().len()
//!     );
//! }
//! # Ok::<(), rcforge::fragment::DiscoveryError>(())
//! ```

pub mod checksum;
pub mod commands;
pub mod config;
pub mod context;
pub mod fragment;
pub mod fs;
pub mod utility;
pub mod validation;
