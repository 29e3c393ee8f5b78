//! Extended glob (`!() ?() +() *() @()`) parsing.
//!
//! Groups are located by scanning for an operator byte followed by `(` and
//! then counting parenthesis depth to find the matching `)`. A single fixed
//! regex cannot do this for nested groups such as `@(*.@(js|ts))`.

use serde::Serialize;
use std::fmt;

/// Operator of an extglob group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtglobKind {
    /// `!(a|b)` - anything except the alternatives
    Not,
    /// `?(a|b)` - zero or one occurrence
    ZeroOrOne,
    /// `+(a|b)` - one or more occurrences
    OneOrMore,
    /// `*(a|b)` - zero or more occurrences
    ZeroOrMore,
    /// `@(a|b)` - exactly one occurrence
    Exactly,
}

impl ExtglobKind {
    /// Map an operator byte to its kind.
    pub fn from_operator(op: u8) -> Option<Self> {
        match op {
            b'!' => Some(ExtglobKind::Not),
            b'?' => Some(ExtglobKind::ZeroOrOne),
            b'+' => Some(ExtglobKind::OneOrMore),
            b'*' => Some(ExtglobKind::ZeroOrMore),
            b'@' => Some(ExtglobKind::Exactly),
            _ => None,
        }
    }

    /// Regex quantifier applied to the translated group.
    pub fn quantifier(&self) -> &'static str {
        match self {
            ExtglobKind::ZeroOrOne => "?",
            ExtglobKind::OneOrMore => "+",
            ExtglobKind::ZeroOrMore => "*",
            ExtglobKind::Exactly | ExtglobKind::Not => "",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtglobKind::Not => "not",
            ExtglobKind::ZeroOrOne => "zero-or-one",
            ExtglobKind::OneOrMore => "one-or-more",
            ExtglobKind::ZeroOrMore => "zero-or-more",
            ExtglobKind::Exactly => "exactly",
        }
    }
}

impl fmt::Display for ExtglobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte span of one extglob group inside a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSpan {
    pub kind: ExtglobKind,
    /// Index of the operator byte.
    pub start: usize,
    /// Index of the matching `)`.
    pub end: usize,
}

impl GroupSpan {
    /// Text between the parentheses.
    pub fn content<'a>(&self, pattern: &'a str) -> &'a str {
        &pattern[self.start + 2..self.end]
    }

    /// Text after the closing parenthesis.
    pub fn suffix<'a>(&self, pattern: &'a str) -> &'a str {
        &pattern[self.end + 1..]
    }
}

/// A pattern that is exactly one extglob group plus a trailing suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtglobNode<'a> {
    pub kind: ExtglobKind,
    pub alternatives: Vec<&'a str>,
    pub remainder: &'a str,
}

impl<'a> ExtglobNode<'a> {
    /// Parse a pattern that consists of a single extglob expression,
    /// optionally followed by a plain suffix starting with `/*` (`/*`, `/**`,
    /// `/**/*.json`, ...). Returns `None` for anything else.
    pub fn parse_whole(pattern: &'a str) -> Option<Self> {
        let span = group_at(pattern, 0)?;
        let remainder = span.suffix(pattern);
        if contains_extglob(remainder) {
            return None;
        }
        if !remainder.is_empty() && !remainder.starts_with("/*") {
            return None;
        }
        Some(ExtglobNode {
            kind: span.kind,
            alternatives: split_alternatives(span.content(pattern)),
            remainder,
        })
    }
}

/// Return the group starting at `pos` when the operator there is followed by
/// `(` and the parenthesis is closed.
pub fn group_at(pattern: &str, pos: usize) -> Option<GroupSpan> {
    let bytes = pattern.as_bytes();
    if pos + 1 >= bytes.len() || bytes[pos + 1] != b'(' {
        return None;
    }
    let kind = ExtglobKind::from_operator(bytes[pos])?;
    let end = find_matching_paren(pattern, pos + 1)?;
    Some(GroupSpan {
        kind,
        start: pos,
        end,
    })
}

/// Find the first well-formed extglob group at or after `from`.
pub fn find_group(pattern: &str, from: usize) -> Option<GroupSpan> {
    (from..pattern.len()).find_map(|i| group_at(pattern, i))
}

/// Find the first well-formed `!(...)` group at or after `from`.
pub fn find_negation(pattern: &str, from: usize) -> Option<GroupSpan> {
    let bytes = pattern.as_bytes();
    (from..pattern.len())
        .filter(|&i| bytes[i] == b'!')
        .find_map(|i| group_at(pattern, i))
}

/// Whether the pattern has at least one well-formed extglob group.
pub fn contains_extglob(pattern: &str) -> bool {
    find_group(pattern, 0).is_some()
}

/// Whether the pattern has at least one well-formed `!(...)` group.
pub fn contains_negation(pattern: &str) -> bool {
    find_negation(pattern, 0).is_some()
}

/// Index of the `)` closing the `(` at `open`, honouring nesting.
pub fn find_matching_paren(pattern: &str, open: usize) -> Option<usize> {
    let bytes = pattern.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split group content on top-level `|`. A `|` nested inside parentheses
/// belongs to the inner group. Alternatives are trimmed. Content without any
/// `|` yields itself (so `!()` has one empty alternative); a trailing empty
/// alternative after the last `|` is dropped.
pub fn split_alternatives(content: &str) -> Vec<&str> {
    if !content.contains('|') {
        return vec![content.trim()];
    }

    let mut alternatives = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, b) in content.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b'|' if depth == 0 => {
                alternatives.push(content[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < content.len() {
        alternatives.push(content[start..].trim());
    }
    alternatives
}

/// Patterns describing what each `!(...)` group excludes: for every negation
/// group and every alternative in it, the pattern with that group replaced
/// literally by the alternative. Other groups are left in place.
pub fn negated_alternatives(pattern: &str) -> Vec<String> {
    let mut expanded = Vec::new();
    let mut from = 0;
    while let Some(span) = find_negation(pattern, from) {
        let before = &pattern[..span.start];
        let after = span.suffix(pattern);
        for alt in split_alternatives(span.content(pattern)) {
            expanded.push(format!("{before}{alt}{after}"));
        }
        from = span.end + 1;
    }
    expanded
}

/// Replace every `!(...)` group with `*`, e.g. `**/!(test)/**/*.go` becomes
/// `**/*/**/*.go`.
pub fn replace_negations_with_wildcard(pattern: &str) -> String {
    let mut result = String::with_capacity(pattern.len());
    let mut from = 0;
    while let Some(span) = find_negation(pattern, from) {
        result.push_str(&pattern[from..span.start]);
        result.push('*');
        from = span.end + 1;
    }
    result.push_str(&pattern[from..]);
    result
}
