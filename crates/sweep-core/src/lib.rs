//! # sweep-core
//!
//! Core library for sweep: branch classification (merged / unmerged / gone),
//! deletion planning with glob-based protection patterns, and user
//! configuration.

mod branch;
pub mod classify;
pub mod clean;
pub mod config;
mod error;
mod protect;

pub use branch::{Branch, BranchStatus};
pub use classify::{ClassifiedBranch, Snapshot, classify};
pub use clean::{CleanReport, DeletionFailure, DeletionPlan, apply_deletions, plan_deletions};
pub use config::Config;
pub use error::{Error, Result};
pub use protect::ProtectionList;

#[cfg(test)]
pub(crate) mod fixtures;
