//! Glob-based branch protection patterns.

use glob::Pattern;

use crate::error::{Error, Result};

/// A compiled list of shell-style protection patterns (`*`, `?`, `[...]`).
///
/// Patterns are matched against a branch's short name with any remote
/// prefix stripped, so `feature/*` covers both `feature/x` and
/// `origin/feature/x`.
#[derive(Debug, Default)]
pub struct ProtectionList {
    patterns: Vec<Pattern>,
}

impl ProtectionList {
    /// Compile a list of glob patterns.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] if any pattern fails to compile.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| Error::InvalidPattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Whether a short branch name matches any protection pattern.
    #[must_use]
    pub fn is_protected(&self, short_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(short_name))
    }

    /// Whether the list has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn literal_pattern_matches_exactly() {
        let protect = ProtectionList::new(&["develop".to_string()]).unwrap();
        assert!(protect.is_protected("develop"));
        assert!(!protect.is_protected("develop-2"));
    }

    #[test]
    fn wildcard_pattern_matches_prefix() {
        let protect = ProtectionList::new(&["release/*".to_string()]).unwrap();
        assert!(protect.is_protected("release/1.0"));
        assert!(!protect.is_protected("feature/release"));
    }

    #[test]
    fn question_mark_matches_single_character() {
        let protect = ProtectionList::new(&["v?".to_string()]).unwrap();
        assert!(protect.is_protected("v1"));
        assert!(!protect.is_protected("v12"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = ProtectionList::new(&["[unclosed".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn empty_list_protects_nothing() {
        let protect = ProtectionList::new(&[]).unwrap();
        assert!(protect.is_empty());
        assert!(!protect.is_protected("main"));
    }
}
