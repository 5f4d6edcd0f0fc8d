//! # sweep-git
//!
//! Git operations abstraction layer for sweep, built on git2-rs.
//! Provides high-level operations for branch enumeration, ancestry
//! queries, upstream tracking inspection, and branch deletion.

mod error;
mod repository;

pub use error::{Error, Result};
pub use git2::Oid;
pub use repository::{CommitSummary, PruneReport, Repository, Upstream};
