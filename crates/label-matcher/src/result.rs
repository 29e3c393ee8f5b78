//! Match results and label-set reconciliation.

use crate::config::LabelerConfig;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of evaluating a configuration against one pull request.
///
/// Every configured label is in exactly one of `matched` and `unmatched`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub current: BTreeSet<String>,
    pub matched: BTreeSet<String>,
    pub unmatched: BTreeSet<String>,
}

impl MatchResult {
    pub fn new<I, S>(current: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            current: current.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Record the outcome for one label.
    pub fn record(&mut self, label: &str, matched: bool) {
        if matched {
            self.unmatched.remove(label);
            self.matched.insert(label.to_string());
        } else {
            self.matched.remove(label);
            self.unmatched.insert(label.to_string());
        }
    }

    pub fn is_matched(&self, label: &str) -> bool {
        self.matched.contains(label)
    }

    pub fn is_unmatched(&self, label: &str) -> bool {
        self.unmatched.contains(label)
    }

    /// Current ∪ Matched.
    pub fn set_to(&self) -> Vec<String> {
        self.current.union(&self.matched).cloned().collect()
    }

    /// (Current ∪ Matched) \ Unmatched.
    pub fn sync_to(&self) -> Vec<String> {
        self.current
            .union(&self.matched)
            .filter(|label| !self.unmatched.contains(*label))
            .cloned()
            .collect()
    }

    /// Matched \ Current.
    pub fn add_to(&self) -> Vec<String> {
        self.matched.difference(&self.current).cloned().collect()
    }

    /// Unmatched ∩ Current.
    pub fn delete_to(&self) -> Vec<String> {
        self.unmatched.intersection(&self.current).cloned().collect()
    }

    /// Final label set: [`sync_to`](Self::sync_to) when syncing, otherwise
    /// [`set_to`](Self::set_to).
    pub fn labels(&self, sync: bool) -> Vec<String> {
        if sync {
            self.sync_to()
        } else {
            self.set_to()
        }
    }

    /// Whether applying the result would change the PR's labels.
    pub fn has_diff(&self, sync: bool) -> bool {
        self.matched.difference(&self.current).next().is_some()
            || (sync && self.unmatched.intersection(&self.current).next().is_some())
    }
}

/// Codeowners of the given labels, sorted and de-duplicated, with one leading
/// `@` stripped. Labels missing from `config` are skipped.
pub fn collect_codeowners<S: AsRef<str>>(labels: &[S], config: &LabelerConfig) -> Vec<String> {
    labels
        .iter()
        .filter_map(|label| config.get(label.as_ref()))
        .flat_map(|label| label.codeowners.iter())
        .map(|owner| owner.strip_prefix('@').unwrap_or(owner).to_string())
        .filter(|owner| !owner.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
