//! Deletion planning and execution.
//!
//! [`plan_deletions`] filters a classification snapshot down to the branches
//! that are safe (or forced) to delete; [`apply_deletions`] carries the plan
//! out, collecting per-branch failures instead of aborting the batch.

use sweep_git::{Oid, Repository};

use crate::branch::BranchStatus;
use crate::classify::{ClassifiedBranch, Snapshot};
use crate::error::{Error, Result};
use crate::protect::ProtectionList;

/// Branches slated for deletion.
#[derive(Debug)]
pub struct DeletionPlan {
    /// The integration branch, needed for the pre-delete merged re-check.
    pub target: String,
    /// Whether unmerged branches were forced into the plan.
    pub force: bool,
    /// Planned deletions in snapshot order.
    pub branches: Vec<ClassifiedBranch>,
}

impl DeletionPlan {
    /// Whether there is nothing to delete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Number of planned deletions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }
}

/// Outcome of applying a deletion plan.
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Full names of branches actually deleted.
    pub deleted: Vec<String>,
    /// Branches that could not be deleted, with the reason.
    pub failed: Vec<DeletionFailure>,
}

/// A single failed deletion.
#[derive(Debug)]
pub struct DeletionFailure {
    /// Full branch name.
    pub branch: String,
    /// Why the deletion failed.
    pub reason: String,
}

/// Compute the subset of a snapshot that is eligible for deletion.
///
/// Filters, in order: the current branch, the target branch and its
/// remote-tracking counterparts (hard-coded, not overridable), branches
/// matching a protection pattern, and - unless `force` - anything unmerged.
#[must_use]
pub fn plan_deletions(
    snapshot: &Snapshot,
    protect: &ProtectionList,
    force: bool,
) -> DeletionPlan {
    let branches = snapshot
        .branches
        .iter()
        .filter(|cb| !cb.branch.is_current)
        .filter(|cb| cb.branch.short != snapshot.target)
        .filter(|cb| cb.status != BranchStatus::Skipped)
        .filter(|cb| !protect.is_protected(&cb.branch.short))
        .filter(|cb| {
            matches!(cb.status, BranchStatus::Merged | BranchStatus::Gone)
                || (force && cb.status == BranchStatus::Unmerged)
        })
        .cloned()
        .collect();

    DeletionPlan {
        target: snapshot.target.clone(),
        force,
        branches,
    }
}

/// Execute a deletion plan.
///
/// With `dry_run` nothing is touched and the report is empty. Otherwise
/// every planned branch is deleted individually; a failure is recorded and
/// the batch continues. Local branches planned as merged without force get a
/// final merged re-check (`git branch -d` semantics) in case the ref moved
/// since planning.
///
/// # Errors
/// Returns error only if the target branch can no longer be resolved;
/// per-branch failures land in the report.
pub fn apply_deletions(
    repo: &Repository,
    plan: &DeletionPlan,
    dry_run: bool,
) -> Result<CleanReport> {
    let mut report = CleanReport::default();
    if dry_run || plan.is_empty() {
        return Ok(report);
    }

    let target_tip = repo
        .branch_commit(&plan.target)
        .map_err(|_| Error::TargetNotFound(plan.target.clone()))?;

    for cb in &plan.branches {
        let name = cb.branch.full_name();
        let result = match &cb.branch.remote {
            Some(remote) => repo
                .delete_remote_branch(remote, &cb.branch.short)
                .map_err(Error::Git),
            None => delete_local(repo, cb, plan.force, target_tip),
        };

        match result {
            Ok(()) => report.deleted.push(name),
            Err(e) => report.failed.push(DeletionFailure {
                branch: name,
                reason: e.to_string(),
            }),
        }
    }

    Ok(report)
}

fn delete_local(
    repo: &Repository,
    cb: &ClassifiedBranch,
    force: bool,
    target_tip: Oid,
) -> Result<()> {
    if cb.status == BranchStatus::Merged && !force {
        let tip = repo.branch_commit(&cb.branch.short)?;
        let merged = repo.is_ancestor(tip, target_tip)?
            || repo.count_commits_between(target_tip, tip)? == 0;
        if !merged {
            return Err(Error::NotFullyMerged(cb.branch.short.clone()));
        }
    }

    repo.delete_local_branch(&cb.branch.short)?;
    Ok(())
}
