//! Compiled regex cache shared by branch and author matching.
//!
//! Patterns are compiled with `fancy_regex` so exclusion filters such as
//! `^(?!ci/).*` work. An invalid pattern is remembered as invalid and never
//! matches.

use fancy_regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct RegexCache {
    entries: HashMap<String, Option<Arc<Regex>>>,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled regex for `pattern`, or `None` if it does not compile.
    pub fn get(&mut self, pattern: &str) -> Option<Arc<Regex>> {
        if let Some(entry) = self.entries.get(pattern) {
            return entry.clone();
        }
        let entry = match Regex::new(pattern) {
            Ok(regex) => Some(Arc::new(regex)),
            Err(e) => {
                warn!(pattern, error = %e, "invalid regex pattern, it will never match");
                None
            }
        };
        self.entries.insert(pattern.to_string(), entry.clone());
        entry
    }

    /// Unanchored search of `pattern` in `value`.
    pub fn is_match(&mut self, pattern: &str, value: &str) -> bool {
        let Some(regex) = self.get(pattern) else {
            return false;
        };
        match regex.is_match(value) {
            Ok(matched) => matched,
            Err(e) => {
                // Backtrack limit exceeded
                debug!(pattern, value, error = %e, "regex evaluation failed");
                false
            }
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
