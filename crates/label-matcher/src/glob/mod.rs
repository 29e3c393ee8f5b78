//! Glob and extglob matching for changed file paths.
//!
//! A pattern is compiled once into a [`CompiledGlob`] and then evaluated
//! against many paths. Compilation picks one of four strategies:
//!
//! - plain path globs go to `globset` (`*` and `?` stay inside a segment,
//!   `**` crosses segments, a trailing `/**` also matches zero segments);
//! - a whole-pattern `!(alts)` becomes a lookahead regex;
//! - any other pattern with a `!(...)` group is split into excluded patterns
//!   plus a structural pattern where each negation is replaced by `*`;
//! - remaining extglob patterns are translated to a regex.
//!
//! Compilation never fails. A pattern that cannot be built by any strategy
//! compiles to [`CompiledGlob::Never`].

mod extglob;
mod translate;

pub use extglob::{split_alternatives, ExtglobKind, ExtglobNode, GroupSpan};

use crate::options::MatcherOptions;
use extglob::{
    contains_extglob, contains_negation, negated_alternatives, replace_negations_with_wildcard,
};
use fancy_regex::Regex;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Compiled form of a single glob pattern.
#[derive(Debug, Clone)]
pub enum CompiledGlob {
    /// Plain path glob, plus the bare prefix when the pattern ends in `/**`.
    Path(GlobSet),
    /// Extglob translated to an anchored regex.
    Regex(Arc<Regex>),
    /// A path matches when it matches none of `excluded` and does match
    /// `structure`.
    Exclude {
        excluded: Vec<CompiledGlob>,
        structure: Box<CompiledGlob>,
    },
    /// Pattern could not be compiled; matches nothing.
    Never,
}

impl CompiledGlob {
    /// Compile with default options (extglob enabled).
    pub fn compile(pattern: &str) -> Self {
        Self::compile_with(pattern, &MatcherOptions::default())
    }

    pub fn compile_with(pattern: &str, options: &MatcherOptions) -> Self {
        if !options.extglob || !contains_extglob(pattern) {
            return path_glob(pattern);
        }

        if let Some(node) = ExtglobNode::parse_whole(pattern) {
            return match (node.kind, node.remainder.is_empty()) {
                (ExtglobKind::Not, true) => {
                    regex_or_fallback(pattern, translate::negation_regex(&node.alternatives))
                }
                (ExtglobKind::Not, false) => exclusion(pattern, options),
                _ => regex_or_fallback(pattern, translate::to_anchored_regex(pattern)),
            };
        }

        if contains_negation(pattern) {
            return exclusion(pattern, options);
        }

        regex_or_fallback(pattern, translate::to_anchored_regex(pattern))
    }

    /// Check a path against the compiled pattern.
    pub fn is_match(&self, path: &str) -> bool {
        match self {
            CompiledGlob::Path(glob) => glob.is_match(path),
            CompiledGlob::Regex(regex) => match regex.is_match(path) {
                Ok(matched) => matched,
                Err(e) => {
                    debug!(regex = %regex.as_str(), path, error = %e, "glob regex evaluation failed");
                    false
                }
            },
            CompiledGlob::Exclude {
                excluded,
                structure,
            } => !excluded.iter().any(|g| g.is_match(path)) && structure.is_match(path),
            CompiledGlob::Never => false,
        }
    }

    /// Short name of the compilation strategy, used in logs and tests.
    pub fn strategy(&self) -> &'static str {
        match self {
            CompiledGlob::Path(_) => "path",
            CompiledGlob::Regex(_) => "regex",
            CompiledGlob::Exclude { .. } => "exclude",
            CompiledGlob::Never => "never",
        }
    }
}

fn path_glob(pattern: &str) -> CompiledGlob {
    let mut builder = GlobSetBuilder::new();
    for glob in path_glob_forms(pattern) {
        match GlobBuilder::new(glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
        {
            Ok(glob) => {
                builder.add(glob);
            }
            Err(e) => {
                debug!(pattern, error = %e, "invalid path glob, pattern matches nothing");
                return CompiledGlob::Never;
            }
        }
    }
    match builder.build() {
        Ok(set) => CompiledGlob::Path(set),
        Err(e) => {
            debug!(pattern, error = %e, "invalid path glob, pattern matches nothing");
            CompiledGlob::Never
        }
    }
}

/// `dir/**` matches `dir` itself as well as everything below it.
fn path_glob_forms(pattern: &str) -> Vec<&str> {
    match pattern.strip_suffix("/**") {
        Some(prefix)
            if !prefix.is_empty() && !prefix.ends_with('\\') && !prefix.ends_with('/') =>
        {
            vec![pattern, prefix]
        }
        _ => vec![pattern],
    }
}

/// Compile a translated regex, falling back to a literal path glob.
fn regex_or_fallback(pattern: &str, source: String) -> CompiledGlob {
    match Regex::new(&source) {
        Ok(regex) => CompiledGlob::Regex(Arc::new(regex)),
        Err(e) => {
            debug!(pattern, regex = %source, error = %e, "extglob regex failed to compile, using path glob");
            path_glob(pattern)
        }
    }
}

fn exclusion(pattern: &str, options: &MatcherOptions) -> CompiledGlob {
    let excluded = negated_alternatives(pattern)
        .iter()
        .map(|p| CompiledGlob::compile_with(p, options))
        .collect();
    let structure = CompiledGlob::compile_with(&replace_negations_with_wildcard(pattern), options);
    CompiledGlob::Exclude {
        excluded,
        structure: Box::new(structure),
    }
}

/// Per-run cache of compiled glob patterns.
#[derive(Debug, Default)]
pub struct GlobCache {
    options: MatcherOptions,
    compiled: HashMap<String, Arc<CompiledGlob>>,
}

impl GlobCache {
    pub fn new(options: MatcherOptions) -> Self {
        Self {
            options,
            compiled: HashMap::new(),
        }
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Compiled form of `pattern`, compiling on first use.
    pub fn get(&mut self, pattern: &str) -> Arc<CompiledGlob> {
        if let Some(compiled) = self.compiled.get(pattern) {
            return Arc::clone(compiled);
        }
        let compiled = Arc::new(CompiledGlob::compile_with(pattern, &self.options));
        self.compiled
            .insert(pattern.to_string(), Arc::clone(&compiled));
        compiled
    }

    pub fn is_match(&mut self, pattern: &str, path: &str) -> bool {
        self.get(pattern).is_match(path)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

/// Compile `pattern` and test one path against it.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    CompiledGlob::compile(pattern).is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_globs() {
        assert!(glob_match("*.go", "main.go"));
        assert!(!glob_match("*.md", "main.go"));
        assert!(glob_match("docs/*", "docs/readme.md"));
        assert!(!glob_match("docs/*", "src/readme.md"));
        assert!(glob_match("**", ".github/labeler.yml"));
        assert!(!glob_match("*", ".github/labeler.yml"));
        assert!(glob_match("*", "aqua.yml"));
        assert!(glob_match("docs/**", "docs/subdir/file.txt"));
        assert!(glob_match("docs/**", "docs"));
        assert!(!glob_match("docs/**", "docsite"));
        assert!(glob_match("*/**", "main.go"));
        assert!(glob_match("src/**/test.go", "src/test.go"));
        assert!(glob_match("src/**/test.go", "src/a/b/test.go"));
        assert!(!glob_match("src/**/test.go", "src/a/b/test.txt"));
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(CompiledGlob::compile("*.go").strategy(), "path");
        assert_eq!(CompiledGlob::compile("!(*.md)").strategy(), "regex");
        assert_eq!(CompiledGlob::compile("!(test)/**").strategy(), "exclude");
        assert_eq!(CompiledGlob::compile("**/!(test)/**/*.go").strategy(), "exclude");
        assert_eq!(CompiledGlob::compile("@(*.js|*.ts)").strategy(), "regex");
        assert_eq!(CompiledGlob::compile("src/**/*.@(js|ts)").strategy(), "regex");
    }

    #[test]
    fn test_whole_pattern_negation() {
        assert!(!glob_match("!(ab|def)", "ab"));
        assert!(!glob_match("!(ab|def)", "def"));
        assert!(glob_match("!(ab|def)", "xyz"));
        assert!(glob_match("!(*.md)", "main.go"));
        assert!(!glob_match("!(*.md)", "README.md"));
        assert!(!glob_match("!(*.md)", "docs/README.md"));
        assert!(glob_match("!(docs/**)", "src/main.go"));
        assert!(!glob_match("!(docs/**)", "docs/guide.md"));
        assert!(glob_match("!(**/*_test.go)", "main.go"));
        assert!(!glob_match("!(**/*_test.go)", "src/main_test.go"));
        assert!(!glob_match("!(**/*_test.go)", "main_test.go"));
    }

    #[test]
    fn test_negation_with_remainder_keeps_structure() {
        assert!(glob_match("!(test)/*", "src/main.go"));
        assert!(!glob_match("!(test)/*", "test/main.go"));
        assert!(!glob_match("!(test)/*", "src/common/main.go"));
        assert!(glob_match("!(test)/**", "src/main.go"));
        assert!(!glob_match("!(test)/**", "test/helper.go"));
        assert!(glob_match("!(test)/**", "main.go"));
        assert!(!glob_match("!(test)/**", "test"));
    }

    #[test]
    fn test_negation_edge_cases() {
        assert!(!glob_match("!(*)/**", "any/file.txt"));
        assert!(!glob_match("!(*)/**", "main.go"));
        assert!(glob_match("!()/**", "src/main.go"));
        assert!(glob_match("!()/**", "main.go"));
    }

    #[test]
    fn test_nested_extglob() {
        assert!(glob_match("!(+(ab|def)*)", "xyz"));
        assert!(glob_match("!(+(ab|def)*)", ""));
        assert!(!glob_match("!(+(ab|def)*)", "abab"));
        assert!(glob_match("@(*.@(js|ts))", "app.js"));
        assert!(!glob_match("@(*.@(js|ts))", "app.jsx"));
    }

    #[test]
    fn test_negated_class_stays_in_segment() {
        assert!(glob_match("@(x)[!a]", "xb"));
        assert!(!glob_match("@(x)[!a]", "xa"));
        assert!(!glob_match("@(x)[!a]", "x/"));
        assert!(!glob_match("x[!a]", "x/"));
    }

    #[test]
    fn test_trailing_double_star_in_regex_form() {
        assert!(glob_match("+(src|lib)/**", "src"));
        assert!(glob_match("+(src|lib)/**", "lib/a/b.rs"));
        assert!(!glob_match("+(src|lib)/**", "srcs"));
    }

    #[test]
    fn test_disabled_extglob_is_literal() {
        let options = MatcherOptions { extglob: false };
        let compiled = CompiledGlob::compile_with("*.@(js|ts)", &options);
        assert_eq!(compiled.strategy(), "path");
        assert!(!compiled.is_match("file.js"));
        assert!(compiled.is_match("file.@(js|ts)"));
        assert!(CompiledGlob::compile_with("*.js", &options).is_match("file.js"));
    }

    #[test]
    fn test_invalid_glob_matches_nothing() {
        let compiled = CompiledGlob::compile("src/[");
        assert!(!compiled.is_match("src/["));
        assert!(!compiled.is_match("src/a"));
    }

    #[test]
    fn test_cache_reuses_compiled_patterns() {
        let mut cache = GlobCache::new(MatcherOptions::default());
        assert!(cache.is_empty());
        let first = cache.get("*.go");
        let second = cache.get("*.go");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_match("!(test)/*", "src/main.go"));
        assert_eq!(cache.len(), 2);
    }
}
