//! Quantified relations between glob pattern sets and changed files.

use crate::config::ChangedFilesRule;
use crate::glob::GlobCache;
use crate::options::MatcherOptions;
use serde::Serialize;
use std::fmt;

/// How a pattern set relates to the set of changed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlobRelation {
    /// Some pattern matches some file.
    AnyGlobToAnyFile,
    /// Some pattern matches every file; false when no files changed.
    AnyGlobToAllFiles,
    /// Every pattern matches some file; true for an empty pattern set.
    AllGlobsToAnyFile,
    /// Every pattern matches every file; false when no files changed.
    AllGlobsToAllFiles,
    /// Every file matches some pattern; true when no files changed.
    AllFilesToAnyGlob,
}

impl GlobRelation {
    pub const ALL: [GlobRelation; 5] = [
        GlobRelation::AnyGlobToAnyFile,
        GlobRelation::AnyGlobToAllFiles,
        GlobRelation::AllGlobsToAnyFile,
        GlobRelation::AllGlobsToAllFiles,
        GlobRelation::AllFilesToAnyGlob,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GlobRelation::AnyGlobToAnyFile => "any-glob-to-any-file",
            GlobRelation::AnyGlobToAllFiles => "any-glob-to-all-files",
            GlobRelation::AllGlobsToAnyFile => "all-globs-to-any-file",
            GlobRelation::AllGlobsToAllFiles => "all-globs-to-all-files",
            GlobRelation::AllFilesToAnyGlob => "all-files-to-any-glob",
        }
    }
}

impl fmt::Display for GlobRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates changed-files rules, caching compiled globs across calls.
#[derive(Debug, Default)]
pub struct ChangedFilesEvaluator {
    globs: GlobCache,
}

impl ChangedFilesEvaluator {
    pub fn new(options: MatcherOptions) -> Self {
        Self {
            globs: GlobCache::new(options),
        }
    }

    pub fn glob_cache(&self) -> &GlobCache {
        &self.globs
    }

    /// Evaluate one relation between `patterns` and `files`.
    pub fn relation(&mut self, relation: GlobRelation, patterns: &[String], files: &[String]) -> bool {
        let globs = &mut self.globs;
        match relation {
            GlobRelation::AnyGlobToAnyFile => patterns
                .iter()
                .any(|p| files.iter().any(|f| globs.is_match(p, f))),
            GlobRelation::AnyGlobToAllFiles => {
                !files.is_empty()
                    && patterns
                        .iter()
                        .any(|p| files.iter().all(|f| globs.is_match(p, f)))
            }
            GlobRelation::AllGlobsToAnyFile => patterns
                .iter()
                .all(|p| files.iter().any(|f| globs.is_match(p, f))),
            GlobRelation::AllGlobsToAllFiles => {
                !files.is_empty()
                    && patterns
                        .iter()
                        .all(|p| files.iter().all(|f| globs.is_match(p, f)))
            }
            GlobRelation::AllFilesToAnyGlob => files
                .iter()
                .all(|f| patterns.iter().any(|p| globs.is_match(p, f))),
        }
    }

    /// OR over the rule's non-empty pattern sets.
    pub fn rule_any(&mut self, rule: &ChangedFilesRule, files: &[String]) -> bool {
        rule.groups()
            .any(|(relation, patterns)| self.relation(relation, patterns, files))
    }

    /// AND over the rule's non-empty pattern sets.
    pub fn rule_all(&mut self, rule: &ChangedFilesRule, files: &[String]) -> bool {
        rule.groups()
            .all(|(relation, patterns)| self.relation(relation, patterns, files))
    }

    /// Changed-files field of a rule in any-context: some entry passes its
    /// any-check.
    pub fn match_any(&mut self, rules: &[ChangedFilesRule], files: &[String]) -> bool {
        rules.iter().any(|rule| self.rule_any(rule, files))
    }

    /// Changed-files field of a rule in all-context: every entry passes its
    /// all-check.
    pub fn match_all(&mut self, rules: &[ChangedFilesRule], files: &[String]) -> bool {
        rules.iter().all(|rule| self.rule_all(rule, files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn eval(relation: GlobRelation, patterns: &[&str], files: &[&str]) -> bool {
        ChangedFilesEvaluator::default().relation(relation, &strings(patterns), &strings(files))
    }

    #[test]
    fn test_any_glob_to_any_file() {
        use GlobRelation::AnyGlobToAnyFile as R;
        assert!(eval(R, &["*.md", "*.go"], &["main.go", "src/lib.rs"]));
        assert!(!eval(R, &["*.md"], &["main.go"]));
        assert!(!eval(R, &["*.md"], &[]));
        assert!(!eval(R, &[], &["main.go"]));
    }

    #[test]
    fn test_any_glob_to_all_files() {
        use GlobRelation::AnyGlobToAllFiles as R;
        assert!(eval(R, &["*.md", "docs/**"], &["docs/a.md", "docs/b/c.txt"]));
        assert!(!eval(R, &["*.md", "*.go"], &["a.md", "b.go"]));
        assert!(!eval(R, &["**"], &[]));
    }

    #[test]
    fn test_all_globs_to_any_file() {
        use GlobRelation::AllGlobsToAnyFile as R;
        assert!(eval(R, &["*.md", "*.go"], &["a.md", "b.go", "c.rs"]));
        assert!(!eval(R, &["*.md", "*.go"], &["a.md"]));
        assert!(eval(R, &[], &["anything"]));
        assert!(eval(R, &[], &[]));
    }

    #[test]
    fn test_all_globs_to_all_files() {
        use GlobRelation::AllGlobsToAllFiles as R;
        assert!(eval(R, &["src/**", "**/*.rs"], &["src/a.rs", "src/b/c.rs"]));
        assert!(!eval(R, &["src/**", "**/*.rs"], &["src/a.rs", "src/b.toml"]));
        assert!(!eval(R, &["src/**"], &[]));
    }

    #[test]
    fn test_all_files_to_any_glob() {
        use GlobRelation::AllFilesToAnyGlob as R;
        assert!(eval(R, &["docs/**", "*.md"], &["docs/a.txt", "README.md"]));
        assert!(!eval(R, &["docs/**"], &["docs/a.txt", "src/main.go"]));
        assert!(eval(R, &["docs/**"], &[]));
    }

    #[test]
    fn test_rule_any_and_all_skip_empty_groups() {
        let mut evaluator = ChangedFilesEvaluator::default();
        let rule = ChangedFilesRule {
            any_glob_to_any_file: strings(&["*.go"]),
            all_globs_to_all_files: strings(&["*.md"]),
            ..Default::default()
        };
        let files = strings(&["main.go", "README.md"]);
        assert!(evaluator.rule_any(&rule, &files));
        assert!(!evaluator.rule_all(&rule, &files));

        let empty = ChangedFilesRule::default();
        assert!(!evaluator.rule_any(&empty, &files));
        assert!(evaluator.rule_all(&empty, &files));
    }

    #[test]
    fn test_rule_lists() {
        let mut evaluator = ChangedFilesEvaluator::default();
        let rules = vec![
            ChangedFilesRule::single(GlobRelation::AnyGlobToAnyFile, strings(&["*.go"])),
            ChangedFilesRule::single(GlobRelation::AnyGlobToAnyFile, strings(&["*.md"])),
        ];
        let files = strings(&["main.go"]);
        assert!(evaluator.match_any(&rules, &files));
        assert!(!evaluator.match_all(&rules, &files));
        assert_eq!(evaluator.glob_cache().len(), 2);
    }

    #[test]
    fn test_relation_names() {
        let names: Vec<_> = GlobRelation::ALL.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "any-glob-to-any-file",
                "any-glob-to-all-files",
                "all-globs-to-any-file",
                "all-globs-to-all-files",
                "all-files-to-any-glob",
            ]
        );
    }
}
