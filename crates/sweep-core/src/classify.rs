//! Branch classification against the integration branch.
//!
//! Produces a [`Snapshot`] mapping every local and remote-tracking branch to
//! a [`BranchStatus`]. Classification is read-only and computed fresh on
//! each call; the caller arranges the fetch/prune that keeps gone detection
//! honest (see [`sweep_git::Repository::fetch_prune_all`]).

use sweep_git::{Oid, PruneReport, Repository, Upstream};

use crate::branch::{Branch, BranchStatus};
use crate::error::{Error, Result};

/// Classification of every branch at a point in time.
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// The integration branch the snapshot was computed against.
    pub target: String,
    /// All classified branches, locals first.
    pub branches: Vec<ClassifiedBranch>,
}

/// A single branch with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBranch {
    /// The branch identifier.
    pub branch: Branch,
    /// Its classification.
    pub status: BranchStatus,
    /// Tip commit, `None` when the ref could not be resolved.
    pub tip: Option<Oid>,
}

impl Snapshot {
    /// Look up the status of a branch by full name (`feature` or
    /// `origin/feature`).
    #[must_use]
    pub fn status_of(&self, full_name: &str) -> Option<BranchStatus> {
        self.branches
            .iter()
            .find(|cb| cb.branch.full_name() == full_name)
            .map(|cb| cb.status)
    }

    /// Number of classified branches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether the snapshot contains no branches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

/// Classify all branches against `target`.
///
/// Rules, per local branch:
/// - the target branch gets [`BranchStatus::Skipped`];
/// - the current branch is always [`BranchStatus::Unmerged`] so it can never
///   plan its own deletion;
/// - a branch whose configured upstream no longer resolves is
///   [`BranchStatus::Gone`] only when it has zero unpushed commits,
///   otherwise [`BranchStatus::Unmerged`];
/// - otherwise a fast-forward ancestor of the target (or a branch with no
///   commits outside it) is [`BranchStatus::Merged`].
///
/// Remote-tracking branches without a local counterpart get the same merge
/// check; `<remote>/<target>` is skipped like the target itself. Per-branch
/// query failures degrade to [`BranchStatus::Unmerged`], never abort.
///
/// `prune` carries the last known upstream commits captured by the
/// fetch/prune that preceded classification, used to count unpushed work on
/// gone candidates.
///
/// # Errors
/// Returns error if the current branch cannot be determined (detached HEAD)
/// or the target branch does not exist.
pub fn classify(
    repo: &Repository,
    target: &str,
    prune: Option<&PruneReport>,
) -> Result<Snapshot> {
    let current = repo.current_branch()?;
    let target_tip = repo
        .branch_commit(target)
        .map_err(|_| Error::TargetNotFound(target.to_string()))?;

    let mut branches = Vec::new();
    let locals = repo.local_branches()?;

    for name in &locals {
        let is_current = *name == current;
        let status = if name == target {
            BranchStatus::Skipped
        } else if is_current {
            BranchStatus::Unmerged
        } else {
            classify_local(repo, name, target_tip, prune)
        };

        branches.push(ClassifiedBranch {
            tip: repo.branch_commit(name).ok(),
            branch: Branch::local(name.clone(), is_current),
            status,
        });
    }

    for shorthand in repo.remote_branches()? {
        let Some((remote, short)) = shorthand.split_once('/') else {
            continue;
        };
        // A local counterpart already carries the classification.
        if locals.iter().any(|l| l == short) {
            continue;
        }

        let status = if short == target {
            BranchStatus::Skipped
        } else {
            classify_remote(repo, &shorthand, target_tip)
        };

        branches.push(ClassifiedBranch {
            tip: repo.remote_branch_commit(&shorthand).ok(),
            branch: Branch::remote_tracking(remote, short),
            status,
        });
    }

    Ok(Snapshot {
        target: target.to_string(),
        branches,
    })
}

/// Fail-safe wrapper: any query error classifies as unmerged, which is never
/// deletable without force.
fn classify_local(
    repo: &Repository,
    name: &str,
    target_tip: Oid,
    prune: Option<&PruneReport>,
) -> BranchStatus {
    try_classify_local(repo, name, target_tip, prune).unwrap_or(BranchStatus::Unmerged)
}

fn try_classify_local(
    repo: &Repository,
    name: &str,
    target_tip: Oid,
    prune: Option<&PruneReport>,
) -> sweep_git::Result<BranchStatus> {
    let tip = repo.branch_commit(name)?;

    if let Some(upstream) = repo.upstream(name)? {
        if upstream.target.is_none() {
            // Upstream disappeared. Only a branch with nothing unpushed is
            // gone; local-only work must survive as unmerged.
            return Ok(if unpushed_commits(repo, tip, &upstream, target_tip, prune)? == 0 {
                BranchStatus::Gone
            } else {
                BranchStatus::Unmerged
            });
        }
    }

    merge_status(repo, tip, target_tip)
}

/// Count commits on `tip` that were never pushed to the (now gone) upstream.
fn unpushed_commits(
    repo: &Repository,
    tip: Oid,
    upstream: &Upstream,
    target_tip: Oid,
    prune: Option<&PruneReport>,
) -> sweep_git::Result<usize> {
    if let Some(last_known) = prune.and_then(|p| p.last_known(&upstream.tracking_ref)) {
        return repo.count_commits_between(last_known, tip);
    }

    // The tracking ref was pruned in some earlier run, so the last pushed
    // position is unknown. A tip fully contained in the target provably has
    // nothing unpublished; anything ahead is treated as unpushed.
    repo.count_commits_between(target_tip, tip)
}

fn merge_status(repo: &Repository, tip: Oid, target_tip: Oid) -> sweep_git::Result<BranchStatus> {
    if repo.is_ancestor(tip, target_tip)? {
        return Ok(BranchStatus::Merged);
    }
    if repo.count_commits_between(target_tip, tip)? == 0 {
        return Ok(BranchStatus::Merged);
    }
    Ok(BranchStatus::Unmerged)
}

fn classify_remote(repo: &Repository, shorthand: &str, target_tip: Oid) -> BranchStatus {
    repo.remote_branch_commit(shorthand)
        .and_then(|tip| merge_status(repo, tip, target_tip))
        .unwrap_or(BranchStatus::Unmerged)
}
