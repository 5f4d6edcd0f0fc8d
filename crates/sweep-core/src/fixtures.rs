//! Test fixtures: scratch repositories built with git2, including a
//! local-path bare remote for push/fetch/prune scenarios.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::Path;

use sweep_git::{Oid, PruneReport, Repository};
use tempfile::TempDir;

pub(crate) struct TestRepo {
    pub temp: TempDir,
    pub repo: Repository,
    pub remote_dir: Option<TempDir>,
}

impl TestRepo {
    /// Repository with a single commit on `main`.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let git = git2::Repository::init(temp.path()).unwrap();

        {
            let mut config = git.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }

        // Deterministic default branch regardless of init.defaultBranch
        git.set_head("refs/heads/main").unwrap();
        drop(git);

        let repo = Repository::open(temp.path()).unwrap();
        let fixture = Self {
            temp,
            repo,
            remote_dir: None,
        };
        fixture.commit("README.md", "# test\n", "Initial commit");
        fixture
    }

    fn git(&self) -> &git2::Repository {
        self.repo.inner()
    }

    pub fn commit(&self, name: &str, content: &str, msg: &str) -> Oid {
        fs::write(self.temp.path().join(name), content).unwrap();

        let mut index = self.git().index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.git().find_tree(tree_id).unwrap();
        let sig = self.git().signature().unwrap();

        let parent = self
            .git()
            .head()
            .ok()
            .and_then(|h| h.target())
            .map(|t| self.git().find_commit(t).unwrap());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.git()
            .commit(Some("HEAD"), &sig, &sig, msg, &tree, &parents)
            .unwrap()
    }

    /// Create a branch at the current HEAD without checking it out.
    pub fn branch(&self, name: &str) {
        let head = self.git().head().unwrap().peel_to_commit().unwrap();
        self.git().branch(name, &head, false).unwrap();
    }

    pub fn checkout(&self, name: &str) {
        self.git().set_head(&format!("refs/heads/{name}")).unwrap();
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.force();
        self.git().checkout_head(Some(&mut opts)).unwrap();
    }

    /// Merge a branch into `main` with a real merge commit.
    pub fn merge_into_main(&self, name: &str) {
        let main = self
            .git()
            .find_reference("refs/heads/main")
            .unwrap()
            .peel_to_commit()
            .unwrap();
        let feature = self
            .git()
            .find_reference(&format!("refs/heads/{name}"))
            .unwrap()
            .peel_to_commit()
            .unwrap();
        let tree = feature.tree().unwrap();
        let sig = self.git().signature().unwrap();

        self.git()
            .commit(
                Some("refs/heads/main"),
                &sig,
                &sig,
                &format!("Merge branch '{name}'"),
                &tree,
                &[&main, &feature],
            )
            .unwrap();
    }

    pub fn add_remote(&mut self) {
        let remote_dir = TempDir::new().unwrap();
        git2::Repository::init_bare(remote_dir.path()).unwrap();
        self.git()
            .remote("origin", remote_dir.path().to_str().unwrap())
            .unwrap();
        self.remote_dir = Some(remote_dir);
    }

    pub fn push(&self, branch: &str) {
        let mut remote = self.git().find_remote("origin").unwrap();
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        remote.push(&[refspec.as_str()], None).unwrap();
    }

    pub fn fetch_prune(&self) -> PruneReport {
        self.repo.fetch_prune_all().unwrap()
    }

    /// Set the upstream of a branch to its origin counterpart. The
    /// remote-tracking ref must exist (push + fetch first).
    pub fn set_upstream(&self, branch: &str) {
        let mut b = self
            .git()
            .find_branch(branch, git2::BranchType::Local)
            .unwrap();
        b.set_upstream(Some(&format!("origin/{branch}"))).unwrap();
    }

    /// Write upstream config only, as left behind when the tracking ref was
    /// pruned in some earlier run.
    pub fn set_upstream_config(&self, branch: &str) {
        let mut config = self.git().config().unwrap();
        config
            .set_str(&format!("branch.{branch}.remote"), "origin")
            .unwrap();
        config
            .set_str(&format!("branch.{branch}.merge"), &format!("refs/heads/{branch}"))
            .unwrap();
    }

    /// Delete a branch on the remote side, simulating upstream deletion.
    pub fn delete_on_remote(&self, branch: &str) {
        let bare =
            git2::Repository::open(self.remote_dir.as_ref().unwrap().path()).unwrap();
        let mut reference = bare
            .find_reference(&format!("refs/heads/{branch}"))
            .unwrap();
        reference.delete().unwrap();
    }

    /// Whether a ref exists on the remote side.
    pub fn remote_has_branch(&self, branch: &str) -> bool {
        let bare =
            git2::Repository::open(self.remote_dir.as_ref().unwrap().path()).unwrap();
        bare.find_reference(&format!("refs/heads/{branch}")).is_ok()
    }
}
