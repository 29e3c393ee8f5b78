//! Branch ref matching.

use crate::regex_cache::RegexCache;

/// Matches base/head branch refs against regex pattern lists.
#[derive(Debug, Default)]
pub struct BranchMatcher {
    regexes: RegexCache,
}

impl BranchMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any pattern matches `git_ref`. An empty list never matches.
    pub fn match_any(&mut self, patterns: &[String], git_ref: &str) -> bool {
        patterns.iter().any(|p| self.regexes.is_match(p, git_ref))
    }
}
