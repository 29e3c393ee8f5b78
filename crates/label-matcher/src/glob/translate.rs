//! Glob/extglob to regex translation.
//!
//! Outside extglob groups `*` and `?` stay inside one path segment and `**`
//! spans segments. Inside group content both wildcards may cross `/`, which
//! is how bash treats extglob bodies.

use super::extglob::{group_at, split_alternatives, ExtglobKind};

/// Wildcard semantics for the text being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Plain path glob text.
    Path,
    /// Text inside an extglob group.
    Group,
}

impl Scope {
    fn any_run(self) -> &'static str {
        match self {
            Scope::Path => "[^/]*",
            Scope::Group => ".*",
        }
    }

    fn any_char(self) -> &'static str {
        match self {
            Scope::Path => "[^/]",
            Scope::Group => ".",
        }
    }
}

/// Translate a whole pattern into an anchored regex.
pub fn to_anchored_regex(pattern: &str) -> String {
    format!("^{}$", translate(pattern, Scope::Path))
}

/// Regex for a whole-pattern `!(alts)`: matches any path that is not exactly
/// one of the alternatives.
pub fn negation_regex(alternatives: &[&str]) -> String {
    format!("^(?!{}$).*$", alternation(alternatives))
}

/// Translate the alternatives of a group into a non-capturing regex group.
fn alternation(alternatives: &[&str]) -> String {
    let translated: Vec<String> = alternatives
        .iter()
        .map(|alt| translate(alt, Scope::Group))
        .collect();
    format!("(?:{})", translated.join("|"))
}

/// Translate glob text into an unanchored regex fragment.
pub fn translate(pattern: &str, scope: Scope) -> String {
    let bytes = pattern.as_bytes();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < bytes.len() {
        if let Some(span) = group_at(pattern, i) {
            let alternatives = split_alternatives(span.content(pattern));
            let group = alternation(&alternatives);
            match span.kind {
                ExtglobKind::Not => {
                    // Only reached for negations nested in other groups; the
                    // lookahead is anchored at the end of the whole input.
                    out.push_str(&format!("(?!{group}$){}", scope.any_run()));
                }
                kind => {
                    out.push_str(&group);
                    out.push_str(kind.quantifier());
                }
            }
            i = span.end + 1;
            continue;
        }

        match bytes[i] {
            b'/' if i > 0 && &pattern[i..] == "/**" => {
                out.push_str("(?:/.*)?");
                i += 3;
            }
            b'*' => {
                let double = bytes.get(i + 1) == Some(&b'*');
                match (scope, double) {
                    (Scope::Path, true) if bytes.get(i + 2) == Some(&b'/') => {
                        out.push_str("(?:[^/]*/)*");
                        i += 3;
                    }
                    (Scope::Group, true) if bytes.get(i + 2) == Some(&b'/') => {
                        out.push_str("(?:.*/)?");
                        i += 3;
                    }
                    (_, true) => {
                        out.push_str(".*");
                        i += 2;
                    }
                    (_, false) => {
                        out.push_str(scope.any_run());
                        i += 1;
                    }
                }
            }
            b'?' => {
                out.push_str(scope.any_char());
                i += 1;
            }
            b'[' => match bracket_class(pattern, i, scope) {
                Some((class, next)) => {
                    out.push_str(&class);
                    i = next;
                }
                None => {
                    out.push_str(r"\[");
                    i += 1;
                }
            },
            b'{' => match brace_alternation(pattern, i, scope) {
                Some((group, next)) => {
                    out.push_str(&group);
                    i = next;
                }
                None => {
                    out.push_str(r"\{");
                    i += 1;
                }
            },
            b'\\' if i + 1 < bytes.len() => {
                let escaped = next_char(pattern, i + 1);
                out.push_str(&regex::escape(escaped));
                i += 1 + escaped.len();
            }
            _ => {
                let literal = next_char(pattern, i);
                out.push_str(&regex::escape(literal));
                i += literal.len();
            }
        }
    }

    out
}

fn next_char(pattern: &str, at: usize) -> &str {
    let len = pattern[at..].chars().next().map_or(1, char::len_utf8);
    &pattern[at..at + len]
}

/// Translate `[...]` starting at `open`. Returns the regex class and the index
/// after `]`, or `None` when the class is never closed. A negated class in
/// path text never matches `/`.
fn bracket_class(pattern: &str, open: usize, scope: Scope) -> Option<(String, usize)> {
    let bytes = pattern.as_bytes();
    let mut i = open + 1;
    let negated = matches!(bytes.get(i), Some(b'!') | Some(b'^'));
    if negated {
        i += 1;
    }
    let body_start = i;
    // A `]` directly after the opening (or negation) is a literal member.
    if bytes.get(i) == Some(&b']') {
        i += 1;
    }
    while i < bytes.len() && bytes[i] != b']' {
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }

    let mut class = String::from("[");
    if negated {
        class.push('^');
        if scope == Scope::Path {
            class.push('/');
        }
    }
    for c in pattern[body_start..i].chars() {
        if matches!(c, '\\' | '[' | ']' | '&' | '~' | '^') {
            class.push('\\');
        }
        class.push(c);
    }
    class.push(']');
    Some((class, i + 1))
}

/// Translate `{a,b}` starting at `open` into `(?:a|b)`.
fn brace_alternation(pattern: &str, open: usize, scope: Scope) -> Option<(String, usize)> {
    let bytes = pattern.as_bytes();
    let mut depth = 0usize;
    let mut parts = Vec::new();
    let mut start = open + 1;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b',' if depth == 1 => {
                parts.push(&pattern[start..i]);
                start = i + 1;
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    parts.push(&pattern[start..i]);
                    let translated: Vec<String> =
                        parts.iter().map(|p| translate(p, scope)).collect();
                    return Some((format!("(?:{})", translated.join("|")), i + 1));
                }
            }
            _ => {}
        }
    }
    None
}
