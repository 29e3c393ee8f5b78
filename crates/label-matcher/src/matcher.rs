//! Rule evaluation: canonical label configuration plus PR facts to a
//! [`MatchResult`].
//!
//! A label matches when its matcher list is non-empty and every entry holds.
//! Within a rule, `any` context passes when some present field matches and
//! `all` context passes when every present field matches.

use crate::author::{AuthorMatcher, TeamMembershipLookup};
use crate::branch::BranchMatcher;
use crate::changed_files::ChangedFilesEvaluator;
use crate::config::{LabelConfig, LabelerConfig, LabelerMatch, LabelerRule};
use crate::options::MatcherOptions;
use crate::result::MatchResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Facts about one pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PullRequestFacts {
    pub changed_files: Vec<String>,
    pub base_ref: String,
    pub head_ref: String,
    pub author: String,
    /// Labels currently attached to the PR.
    pub labels: Vec<String>,
}

impl PullRequestFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_changed_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_base_ref(mut self, base_ref: impl Into<String>) -> Self {
        self.base_ref = base_ref.into();
        self
    }

    pub fn with_head_ref(mut self, head_ref: impl Into<String>) -> Self {
        self.head_ref = head_ref.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Any,
    All,
}

/// Evaluates labeler configurations against pull requests.
///
/// Holds the glob, regex and team membership caches for one run; reuse the
/// same instance across PRs to share them. `default()` and `with_client`
/// take their options from the environment ([`MatcherOptions::from_env`]).
#[derive(Debug)]
pub struct RuleMatcher {
    changed_files: ChangedFilesEvaluator,
    branches: BranchMatcher,
    authors: AuthorMatcher,
}

impl Default for RuleMatcher {
    fn default() -> Self {
        Self::new(MatcherOptions::from_env(), None)
    }
}

impl RuleMatcher {
    pub fn new(options: MatcherOptions, client: Option<Arc<dyn TeamMembershipLookup>>) -> Self {
        Self {
            changed_files: ChangedFilesEvaluator::new(options),
            branches: BranchMatcher::new(),
            authors: AuthorMatcher::new(client),
        }
    }

    pub fn with_client(client: Arc<dyn TeamMembershipLookup>) -> Self {
        Self::new(MatcherOptions::from_env(), Some(client))
    }

    pub fn options(&self) -> &MatcherOptions {
        self.changed_files.glob_cache().options()
    }

    pub fn author_matcher(&self) -> &AuthorMatcher {
        &self.authors
    }

    /// Evaluate every label in `config`.
    pub async fn evaluate(&mut self, config: &LabelerConfig, facts: &PullRequestFacts) -> MatchResult {
        let mut result = MatchResult::new(facts.labels.iter().cloned());
        for (label, label_config) in config.iter() {
            let matched = self.evaluate_label(label_config, facts).await;
            trace!(label, matched, "label evaluated");
            result.record(label, matched);
        }
        debug!(
            matched = result.matched.len(),
            unmatched = result.unmatched.len(),
            files = facts.changed_files.len(),
            "labeler config evaluated"
        );
        result
    }

    /// Whether a single label matches.
    pub async fn evaluate_label(&mut self, label: &LabelConfig, facts: &PullRequestFacts) -> bool {
        if label.matcher.is_empty() {
            return false;
        }
        for entry in &label.matcher {
            if !self.match_entry(entry, facts).await {
                return false;
            }
        }
        true
    }

    async fn match_entry(&mut self, entry: &LabelerMatch, facts: &PullRequestFacts) -> bool {
        if !entry.all.is_empty() {
            for rule in &entry.all {
                if !self.match_rule(rule, Context::All, facts).await {
                    return false;
                }
            }
        }
        if !entry.any.is_empty() {
            let mut any_passed = false;
            for rule in &entry.any {
                if self.match_rule(rule, Context::Any, facts).await {
                    any_passed = true;
                    break;
                }
            }
            if !any_passed {
                return false;
            }
        }
        true
    }

    async fn match_rule(&mut self, rule: &LabelerRule, context: Context, facts: &PullRequestFacts) -> bool {
        // Short-circuits on the first field that decides the context.
        let decisive = context == Context::Any;

        if let Some(patterns) = &rule.base_branch {
            if self.branches.match_any(patterns, &facts.base_ref) == decisive {
                return decisive;
            }
        }
        if let Some(patterns) = &rule.head_branch {
            if self.branches.match_any(patterns, &facts.head_ref) == decisive {
                return decisive;
            }
        }
        if let Some(patterns) = &rule.author {
            if self.authors.match_any(patterns, &facts.author).await == decisive {
                return decisive;
            }
        }
        if !rule.changed_files.is_empty() {
            let matched = match context {
                Context::Any => self
                    .changed_files
                    .match_any(&rule.changed_files, &facts.changed_files),
                Context::All => self
                    .changed_files
                    .match_all(&rule.changed_files, &facts.changed_files),
            };
            if matched == decisive {
                return decisive;
            }
        }
        !decisive
    }
}
