//! Shared helpers for CLI commands.

use anyhow::{Context, Result, bail};
use sweep_git::{PruneReport, Repository};

/// Open the repository containing the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current().context("Not inside a git repository")
}

/// Resolve the integration branch: the `--target` flag if given, otherwise
/// the detected default branch.
pub fn resolve_target(repo: &Repository, flag: Option<&str>) -> Result<String> {
    if let Some(target) = flag {
        return Ok(target.to_string());
    }

    match repo.default_branch() {
        Some(branch) => Ok(branch),
        None => bail!("No main or master branch found - pass --target"),
    }
}

/// Fetch and prune all remotes unless skipped or none are configured.
///
/// Gone detection depends on fresh remote state, so a fetch failure is
/// fatal here rather than silently producing stale classifications.
pub fn refresh_remotes(repo: &Repository, skip: bool) -> Result<Option<PruneReport>> {
    if skip || repo.remotes()?.is_empty() {
        return Ok(None);
    }

    let report = repo
        .fetch_prune_all()
        .context("Failed to refresh remote state")?;
    Ok(Some(report))
}
