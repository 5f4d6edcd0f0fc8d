//! Repository wrapper providing high-level git operations.

use std::collections::HashMap;
use std::path::Path;

use git2::{BranchType, ErrorCode, FetchOptions, FetchPrune, Oid};

use crate::error::{Error, Result};

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

/// Upstream tracking configuration for a local branch.
///
/// Read from `branch.<name>.remote` and `branch.<name>.merge`, so it is
/// still available after the remote-tracking ref itself was pruned.
#[derive(Debug, Clone)]
pub struct Upstream {
    /// Name of the configured remote (e.g. `origin`).
    pub remote: String,
    /// Full remote-tracking ref name (e.g. `refs/remotes/origin/feature`).
    pub tracking_ref: String,
    /// Where the tracking ref points, or `None` if it no longer resolves.
    pub target: Option<Oid>,
}

/// Remote-tracking refs removed by a fetch with pruning, keyed by full ref
/// name, with the commit each one pointed at before the prune.
#[derive(Debug, Default)]
pub struct PruneReport {
    pruned: HashMap<String, Oid>,
}

impl PruneReport {
    /// Last known commit of a pruned tracking ref, if it was pruned this run.
    #[must_use]
    pub fn last_known(&self, tracking_ref: &str) -> Option<Oid> {
        self.pruned.get(tracking_ref).copied()
    }

    /// Number of refs pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pruned.len()
    }

    /// Whether nothing was pruned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pruned.is_empty()
    }
}

/// Display-only summary of a commit.
#[derive(Debug, Clone)]
pub struct CommitSummary {
    /// Abbreviated commit id.
    pub id: String,
    /// Author name.
    pub author: String,
    /// Commit time in seconds since the epoch.
    pub seconds: i64,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                Error::NotARepository
            } else {
                Error::Git2(e)
            }
        })?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    // === Branch enumeration ===

    /// Get the name of the current branch.
    ///
    /// # Errors
    /// Returns error if HEAD is detached.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(Error::DetachedHead);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(Error::DetachedHead)
    }

    /// List all local branch short names.
    ///
    /// # Errors
    /// Returns error if branch listing fails.
    pub fn local_branches(&self) -> Result<Vec<String>> {
        let branches = self.inner.branches(Some(BranchType::Local))?;

        let names: Vec<String> = branches
            .filter_map(std::result::Result::ok)
            .filter_map(|(b, _)| b.name().ok().flatten().map(String::from))
            .collect();

        Ok(names)
    }

    /// List all remote-tracking branch shorthands (`remote/name`),
    /// excluding remote HEAD pointer refs.
    ///
    /// # Errors
    /// Returns error if branch listing fails.
    pub fn remote_branches(&self) -> Result<Vec<String>> {
        let branches = self.inner.branches(Some(BranchType::Remote))?;

        let names: Vec<String> = branches
            .filter_map(std::result::Result::ok)
            .filter_map(|(b, _)| b.name().ok().flatten().map(String::from))
            .filter(|name| !name.ends_with("/HEAD"))
            .collect();

        Ok(names)
    }

    /// Check if a local branch exists.
    #[must_use]
    pub fn branch_exists(&self, name: &str) -> bool {
        self.inner.find_branch(name, BranchType::Local).is_ok()
    }

    /// Detect the default integration branch (main/master).
    ///
    /// Returns `None` if neither main nor master exists.
    #[must_use]
    pub fn default_branch(&self) -> Option<String> {
        ["main", "master"]
            .into_iter()
            .find(|name| self.branch_exists(name))
            .map(String::from)
    }

    // === Commit queries ===

    /// Get the tip commit for a local branch.
    ///
    /// # Errors
    /// Returns error if branch doesn't exist.
    pub fn branch_commit(&self, branch_name: &str) -> Result<Oid> {
        let branch = self
            .inner
            .find_branch(branch_name, BranchType::Local)
            .map_err(|_| Error::BranchNotFound(branch_name.into()))?;

        branch
            .get()
            .target()
            .ok_or_else(|| Error::BranchNotFound(branch_name.into()))
    }

    /// Get the tip commit for a remote-tracking branch (`remote/name`).
    ///
    /// # Errors
    /// Returns error if branch doesn't exist.
    pub fn remote_branch_commit(&self, branch_name: &str) -> Result<Oid> {
        let branch = self
            .inner
            .find_branch(branch_name, BranchType::Remote)
            .map_err(|_| Error::BranchNotFound(branch_name.into()))?;

        branch
            .get()
            .target()
            .ok_or_else(|| Error::BranchNotFound(branch_name.into()))
    }

    /// Check whether `ancestor` is reachable from `descendant`
    /// (fast-forward relationship). A commit is its own ancestor.
    ///
    /// # Errors
    /// Returns error if the graph query fails.
    pub fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        if ancestor == descendant {
            return Ok(true);
        }
        Ok(self.inner.graph_descendant_of(descendant, ancestor)?)
    }

    /// Count commits reachable from `to` but not from `from` (`from..to`).
    ///
    /// # Errors
    /// Returns error if revwalk fails.
    pub fn count_commits_between(&self, from: Oid, to: Oid) -> Result<usize> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.push(to)?;
        revwalk.hide(from)?;

        Ok(revwalk.count())
    }

    /// Summarize a commit for display.
    ///
    /// # Errors
    /// Returns error if the commit is not found.
    pub fn commit_summary(&self, oid: Oid) -> Result<CommitSummary> {
        let commit = self.inner.find_commit(oid)?;
        let author = commit.author().name().unwrap_or("unknown").to_string();

        Ok(CommitSummary {
            id: oid.to_string()[..8].to_string(),
            author,
            seconds: commit.time().seconds(),
        })
    }

    // === Upstream tracking ===

    /// Read a local branch's upstream tracking configuration.
    ///
    /// Returns `None` when the branch has no upstream configured. When the
    /// configured tracking ref no longer resolves (pruned remote branch),
    /// the returned [`Upstream`] carries `target: None`.
    ///
    /// # Errors
    /// Returns error if the config lookup fails.
    pub fn upstream(&self, branch_name: &str) -> Result<Option<Upstream>> {
        let refname = format!("refs/heads/{branch_name}");

        let remote = match self.inner.branch_upstream_remote(&refname) {
            Ok(buf) => match buf.as_str() {
                Some(s) => s.to_string(),
                None => return Ok(None),
            },
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let tracking_ref = match self.inner.branch_upstream_name(&refname) {
            Ok(buf) => match buf.as_str() {
                Some(s) => s.to_string(),
                None => return Ok(None),
            },
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let target = self
            .inner
            .find_reference(&tracking_ref)
            .ok()
            .and_then(|r| r.target());

        Ok(Some(Upstream {
            remote,
            tracking_ref,
            target,
        }))
    }

    // === Deletion ===

    /// Delete a local branch ref.
    ///
    /// # Errors
    /// Returns error if the branch doesn't exist, is the current branch,
    /// or the ref deletion fails.
    pub fn delete_local_branch(&self, name: &str) -> Result<()> {
        let mut branch = self
            .inner
            .find_branch(name, BranchType::Local)
            .map_err(|_| Error::BranchNotFound(name.into()))?;

        branch.delete()?;
        Ok(())
    }

    /// Delete a branch on a remote by pushing an empty refspec.
    ///
    /// # Errors
    /// Returns error if the remote is unknown or the push fails.
    pub fn delete_remote_branch(&self, remote_name: &str, branch_name: &str) -> Result<()> {
        let mut remote = self
            .inner
            .find_remote(remote_name)
            .map_err(|_| Error::RemoteNotFound(remote_name.into()))?;

        let refspec = format!(":refs/heads/{branch_name}");
        remote
            .push(&[refspec.as_str()], None)
            .map_err(|e| Error::PushFailed(e.to_string()))?;

        Ok(())
    }

    // === Remotes ===

    /// List configured remote names.
    ///
    /// # Errors
    /// Returns error if remote enumeration fails.
    pub fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.inner.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    /// Fetch all remotes with pruning.
    ///
    /// Remote-tracking refs are snapshotted before the fetch so that refs
    /// removed by the prune can be reported together with the commit they
    /// pointed at - the classifier needs that commit to tell gone branches
    /// from branches with unpushed work.
    ///
    /// # Errors
    /// Returns [`Error::FetchFailed`] if any remote cannot be fetched.
    pub fn fetch_prune_all(&self) -> Result<PruneReport> {
        let before = self.remote_tracking_refs()?;

        for name in self.remotes()? {
            let mut remote = self
                .inner
                .find_remote(&name)
                .map_err(|_| Error::RemoteNotFound(name.clone()))?;

            let mut opts = FetchOptions::new();
            opts.prune(FetchPrune::On);

            remote
                .fetch(&[] as &[&str], Some(&mut opts), None)
                .map_err(|e| Error::FetchFailed(format!("{name}: {e}")))?;
        }

        let after = self.remote_tracking_refs()?;
        let pruned = before
            .into_iter()
            .filter(|(name, _)| !after.contains_key(name))
            .collect();

        Ok(PruneReport { pruned })
    }

    fn remote_tracking_refs(&self) -> Result<HashMap<String, Oid>> {
        let mut refs = HashMap::new();

        for reference in self.inner.references_glob("refs/remotes/*")? {
            let reference = reference?;
            if let (Some(name), Some(target)) = (reference.name(), reference.target()) {
                refs.insert(name.to_string(), target);
            }
        }

        Ok(refs)
    }

    /// Get a reference to the underlying git2 repository.
    ///
    /// Use sparingly - prefer high-level methods.
    #[must_use]
    pub fn inner(&self) -> &git2::Repository {
        &self.inner
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_test_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();

        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }

        // Deterministic default branch regardless of init.defaultBranch
        repo.set_head("refs/heads/main").unwrap();

        let wrapped = Repository { inner: repo };
        commit_file(&wrapped, "README.md", "# test\n", "Initial commit");
        (temp, wrapped)
    }

    fn commit_file(repo: &Repository, name: &str, content: &str, msg: &str) -> Oid {
        let workdir = repo.workdir().unwrap().to_path_buf();
        fs::write(workdir.join(name), content).unwrap();

        let mut index = repo.inner.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.inner.find_tree(tree_id).unwrap();
        let sig = repo.inner.signature().unwrap();

        let parent = repo
            .inner
            .head()
            .ok()
            .and_then(|h| h.target())
            .map(|t| repo.inner.find_commit(t).unwrap());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.inner
            .commit(Some("HEAD"), &sig, &sig, msg, &tree, &parents)
            .unwrap()
    }

    fn checkout_new_branch(repo: &Repository, name: &str) {
        let head = repo.inner.head().unwrap().peel_to_commit().unwrap();
        repo.inner.branch(name, &head, false).unwrap();
        repo.inner
            .set_head(&format!("refs/heads/{name}"))
            .unwrap();
        repo.inner.checkout_head(None).unwrap();
    }

    fn add_bare_remote(repo: &Repository) -> TempDir {
        let remote_dir = TempDir::new().unwrap();
        git2::Repository::init_bare(remote_dir.path()).unwrap();
        repo.inner
            .remote("origin", remote_dir.path().to_str().unwrap())
            .unwrap();
        remote_dir
    }

    fn push_branch(repo: &Repository, branch: &str) {
        let mut remote = repo.inner.find_remote("origin").unwrap();
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[refspec.as_str()], None).unwrap();
    }

    #[test]
    fn test_current_branch() {
        let (_temp, repo) = init_test_repo();
        assert_eq!(repo.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_local_branches() {
        let (_temp, repo) = init_test_repo();
        let head = repo.inner.head().unwrap().peel_to_commit().unwrap();
        repo.inner.branch("feature/a", &head, false).unwrap();
        repo.inner.branch("feature/b", &head, false).unwrap();

        let branches = repo.local_branches().unwrap();
        assert_eq!(branches.len(), 3);
        assert!(branches.iter().any(|b| b == "feature/a"));
        assert!(branches.iter().any(|b| b == "feature/b"));
    }

    #[test]
    fn test_is_ancestor_and_count() {
        let (_temp, repo) = init_test_repo();
        let first = repo.branch_commit("main").unwrap();

        checkout_new_branch(&repo, "feature");
        let second = commit_file(&repo, "f.txt", "one", "feature work");

        assert!(repo.is_ancestor(first, second).unwrap());
        assert!(!repo.is_ancestor(second, first).unwrap());
        assert!(repo.is_ancestor(first, first).unwrap());
        assert_eq!(repo.count_commits_between(first, second).unwrap(), 1);
        assert_eq!(repo.count_commits_between(second, second).unwrap(), 0);
    }

    #[test]
    fn test_upstream_not_configured() {
        let (_temp, repo) = init_test_repo();
        assert!(repo.upstream("main").unwrap().is_none());
    }

    #[test]
    fn test_delete_local_branch() {
        let (_temp, repo) = init_test_repo();
        let head = repo.inner.head().unwrap().peel_to_commit().unwrap();
        repo.inner.branch("doomed", &head, false).unwrap();

        assert!(repo.branch_exists("doomed"));
        repo.delete_local_branch("doomed").unwrap();
        assert!(!repo.branch_exists("doomed"));
    }

    #[test]
    fn test_delete_missing_branch_fails() {
        let (_temp, repo) = init_test_repo();
        let err = repo.delete_local_branch("nope").unwrap_err();
        assert!(matches!(err, Error::BranchNotFound(_)));
    }

    #[test]
    fn test_default_branch() {
        let (_temp, repo) = init_test_repo();
        assert_eq!(repo.default_branch().as_deref(), Some("main"));
    }

    #[test]
    fn test_remote_branches_exclude_head() {
        let (_temp, repo) = init_test_repo();
        let _remote = add_bare_remote(&repo);
        push_branch(&repo, "main");
        repo.fetch_prune_all().unwrap();

        // Simulate origin/HEAD symref
        repo.inner
            .reference_symbolic(
                "refs/remotes/origin/HEAD",
                "refs/remotes/origin/main",
                false,
                "test",
            )
            .unwrap();

        let branches = repo.remote_branches().unwrap();
        assert_eq!(branches, vec!["origin/main".to_string()]);
    }

    #[test]
    fn test_fetch_prune_reports_removed_refs() {
        let (_temp, repo) = init_test_repo();
        let remote_dir = add_bare_remote(&repo);

        checkout_new_branch(&repo, "feature");
        let tip = commit_file(&repo, "f.txt", "one", "feature work");
        push_branch(&repo, "feature");

        let report = repo.fetch_prune_all().unwrap();
        assert!(report.is_empty());
        assert_eq!(repo.remote_branch_commit("origin/feature").unwrap(), tip);

        // Delete the branch on the remote side
        let bare = git2::Repository::open(remote_dir.path()).unwrap();
        let mut reference = bare.find_reference("refs/heads/feature").unwrap();
        reference.delete().unwrap();

        let report = repo.fetch_prune_all().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.last_known("refs/remotes/origin/feature"),
            Some(tip)
        );
        assert!(repo.remote_branch_commit("origin/feature").is_err());
    }

    #[test]
    fn test_delete_remote_branch() {
        let (_temp, repo) = init_test_repo();
        let remote_dir = add_bare_remote(&repo);

        checkout_new_branch(&repo, "feature");
        commit_file(&repo, "f.txt", "one", "feature work");
        push_branch(&repo, "feature");

        let bare = git2::Repository::open(remote_dir.path()).unwrap();
        assert!(bare.find_reference("refs/heads/feature").is_ok());

        repo.delete_remote_branch("origin", "feature").unwrap();
        assert!(bare.find_reference("refs/heads/feature").is_err());
    }

    #[test]
    fn test_commit_summary() {
        let (_temp, repo) = init_test_repo();
        let tip = repo.branch_commit("main").unwrap();

        let summary = repo.commit_summary(tip).unwrap();
        assert_eq!(summary.id.len(), 8);
        assert_eq!(summary.author, "Test User");
        assert!(summary.seconds > 0);
    }
}
