//! Branch identifier and classification status.

use std::fmt;

use serde::Serialize;

/// A branch discovered during enumeration.
///
/// The short name and remote are split apart once, at enumeration time, so
/// protection patterns and main-branch checks never have to strip prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Short name with any remote prefix stripped (e.g. `feature/auth`).
    pub short: String,
    /// Remote this entry belongs to, `None` for local branches.
    pub remote: Option<String>,
    /// Whether this is the currently checked-out branch.
    pub is_current: bool,
}

impl Branch {
    /// A local branch.
    #[must_use]
    pub const fn local(short: String, is_current: bool) -> Self {
        Self {
            short,
            remote: None,
            is_current,
        }
    }

    /// A remote-tracking branch entry.
    #[must_use]
    pub fn remote_tracking(remote: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            remote: Some(remote.into()),
            is_current: false,
        }
    }

    /// Whether this entry refers to a remote-tracking branch.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Display name: `origin/feature` for remote entries, `feature` otherwise.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{remote}/{}", self.short),
            None => self.short.clone(),
        }
    }
}

/// Classification outcome for a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchStatus {
    /// Fully contained in the integration branch.
    Merged,
    /// Has commits not in the integration branch.
    Unmerged,
    /// Upstream counterpart disappeared, with no unpushed work.
    Gone,
    /// The integration branch itself (or its remote-tracking counterpart);
    /// never a deletion candidate.
    Skipped,
}

impl fmt::Display for BranchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Merged => "merged",
            Self::Unmerged => "unmerged",
            Self::Gone => "gone",
            Self::Skipped => "skipped",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_includes_remote() {
        let local = Branch::local("feature/auth".into(), false);
        assert_eq!(local.full_name(), "feature/auth");
        assert!(!local.is_remote());

        let remote = Branch::remote_tracking("origin", "feature/auth");
        assert_eq!(remote.full_name(), "origin/feature/auth");
        assert!(remote.is_remote());
    }

    #[test]
    fn status_display() {
        assert_eq!(BranchStatus::Merged.to_string(), "merged");
        assert_eq!(BranchStatus::Gone.to_string(), "gone");
    }
}
