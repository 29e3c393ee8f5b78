//! Folding of shorthand blocks into the canonical rule tree.
//!
//! Per block:
//!
//! 1. `all-files-to-any-glob` becomes one more `changed-files` entry.
//! 2. `base-branch`, `head-branch`, `author` and a non-empty `changed-files`
//!    each become their own rule appended to `any`.
//! 3. Rules already under `any`/`all` get the same `all-files-to-any-glob`
//!    folding.
//! 4. Only blocks left with `any` or `all` rules contribute a matcher entry.

use super::raw::{flatten_opt, Nested, PatternList, RawBlock, RawChangedFiles, RawRule};
use super::{ChangedFilesRule, LabelConfig, LabelerMatch, LabelerRule};
use crate::changed_files::GlobRelation;
use std::collections::BTreeSet;

/// Accumulates the blocks of one label into a [`LabelConfig`].
#[derive(Debug, Default)]
pub struct LabelConfigBuilder {
    matcher: Vec<LabelerMatch>,
    color: Option<String>,
    description: Option<String>,
    codeowners: BTreeSet<String>,
}

impl LabelConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_block(&mut self, block: RawBlock) {
        let RawBlock {
            any,
            all,
            changed_files,
            base_branch,
            head_branch,
            author,
            all_files_to_any_glob,
            color,
            description,
            codeowners,
        } = block;

        let changed_files = fold_changed_files(changed_files, all_files_to_any_glob);

        let mut any = normalize_rules(any);
        if let Some(patterns) = base_branch {
            any.push(LabelerRule {
                base_branch: Some(patterns.into_vec()),
                ..Default::default()
            });
        }
        if let Some(patterns) = head_branch {
            any.push(LabelerRule {
                head_branch: Some(patterns.into_vec()),
                ..Default::default()
            });
        }
        if let Some(patterns) = author {
            any.push(LabelerRule {
                author: Some(patterns.into_vec()),
                ..Default::default()
            });
        }
        if !changed_files.is_empty() {
            any.push(LabelerRule {
                changed_files,
                ..Default::default()
            });
        }

        let entry = LabelerMatch {
            any,
            all: normalize_rules(all),
        };
        if !entry.is_empty() {
            self.matcher.push(entry);
        }

        keep_first_non_empty(&mut self.color, color);
        keep_first_non_empty(&mut self.description, description);
        if let Some(owners) = codeowners {
            self.codeowners.extend(owners.into_vec());
        }
    }

    pub fn build(self) -> LabelConfig {
        LabelConfig {
            matcher: self.matcher,
            color: self.color,
            description: self.description,
            codeowners: self.codeowners,
        }
    }
}

fn keep_first_non_empty(slot: &mut Option<String>, candidate: Option<String>) {
    if slot.is_none() {
        *slot = candidate.filter(|v| !v.is_empty());
    }
}

fn normalize_rules(rules: Option<Nested<RawRule>>) -> Vec<LabelerRule> {
    flatten_opt(rules).into_iter().map(normalize_rule).collect()
}

fn normalize_rule(rule: RawRule) -> LabelerRule {
    LabelerRule {
        changed_files: fold_changed_files(rule.changed_files, rule.all_files_to_any_glob),
        base_branch: rule.base_branch.map(PatternList::into_vec),
        head_branch: rule.head_branch.map(PatternList::into_vec),
        author: rule.author.map(PatternList::into_vec),
    }
}

/// Canonical `changed-files` list with the `all-files-to-any-glob` shorthand
/// appended as its own entry.
fn fold_changed_files(
    entries: Option<Nested<RawChangedFiles>>,
    all_files_to_any_glob: Option<PatternList>,
) -> Vec<ChangedFilesRule> {
    let mut rules: Vec<ChangedFilesRule> = flatten_opt(entries)
        .into_iter()
        .map(|raw| ChangedFilesRule {
            any_glob_to_any_file: raw.any_glob_to_any_file.into_vec(),
            any_glob_to_all_files: raw.any_glob_to_all_files.into_vec(),
            all_globs_to_any_file: raw.all_globs_to_any_file.into_vec(),
            all_globs_to_all_files: raw.all_globs_to_all_files.into_vec(),
            all_files_to_any_glob: raw.all_files_to_any_glob.into_vec(),
        })
        .collect();

    if let Some(patterns) = all_files_to_any_glob.map(PatternList::into_vec) {
        if !patterns.is_empty() {
            rules.push(ChangedFilesRule::single(
                GlobRelation::AllFilesToAnyGlob,
                patterns,
            ));
        }
    }
    rules
}
