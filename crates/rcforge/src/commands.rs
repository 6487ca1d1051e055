//! Running resolved utilities

pub mod dispatch;
pub mod process;
pub mod runner;

pub use self::{
    dispatch::{DispatchError, DispatchOutcome, dispatch},
    process::ProcessRunner,
    runner::{RunError, UtilityRunner},
};
