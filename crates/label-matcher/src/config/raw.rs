//! Decoded YAML shapes before normalization.
//!
//! These types accept the shorthand forms found in labeler files: a bare
//! scalar where a list is expected, lists nested inside lists (what an alias
//! to a list expands to), and a single block where a list of blocks is
//! expected. Unknown keys are ignored.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// A scalar or arbitrarily nested list of scalars, flattened in order.
///
/// Numbers and booleans are kept as text so a branch pattern such as `1.0` is
/// not rejected. Floats keep their fractional part (`1.0` stays `1.0`).
/// `null` entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternList(pub Vec<String>);

impl PatternList {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'de> Deserialize<'de> for PatternList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PatternListVisitor)
    }
}

struct PatternListVisitor;

impl<'de> Visitor<'de> for PatternListVisitor {
    type Value = PatternList;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or a (nested) list of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PatternList(vec![v.to_string()]))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(PatternList(vec![v]))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(PatternList(vec![v.to_string()]))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(PatternList(vec![v.to_string()]))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(PatternList(vec![v.to_string()]))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(PatternList(vec![format!("{v:?}")]))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(PatternList::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(PatternList::default())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut patterns = Vec::new();
        while let Some(inner) = seq.next_element::<PatternList>()? {
            patterns.extend(inner.0);
        }
        Ok(PatternList(patterns))
    }
}

/// Text of a scalar that YAML may have typed as a number or boolean
/// (`color: 123456`).
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<PatternList>::deserialize(deserializer)?;
    Ok(text.and_then(|list| list.0.into_iter().next()))
}

/// One item or a nested list of items, flattened in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Many(Vec<Nested<T>>),
    One(T),
}

impl<T> Nested<T> {
    pub fn flatten(self) -> Vec<T> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<T>) {
        match self {
            Nested::One(item) => out.push(item),
            Nested::Many(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

/// Flatten an optional nested list, treating absence as empty.
pub fn flatten_opt<T>(nested: Option<Nested<T>>) -> Vec<T> {
    nested.map(Nested::flatten).unwrap_or_default()
}

/// One `changed-files` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawChangedFiles {
    #[serde(default)]
    pub any_glob_to_any_file: PatternList,
    #[serde(default)]
    pub any_glob_to_all_files: PatternList,
    #[serde(default)]
    pub all_globs_to_any_file: PatternList,
    #[serde(default)]
    pub all_globs_to_all_files: PatternList,
    #[serde(default)]
    pub all_files_to_any_glob: PatternList,
}

/// A rule nested under `any` or `all`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawRule {
    #[serde(default)]
    pub changed_files: Option<Nested<RawChangedFiles>>,
    #[serde(default)]
    pub base_branch: Option<PatternList>,
    #[serde(default)]
    pub head_branch: Option<PatternList>,
    #[serde(default)]
    pub author: Option<PatternList>,
    #[serde(default)]
    pub all_files_to_any_glob: Option<PatternList>,
}

/// One block in a label's list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawBlock {
    #[serde(default)]
    pub any: Option<Nested<RawRule>>,
    #[serde(default)]
    pub all: Option<Nested<RawRule>>,
    #[serde(default)]
    pub changed_files: Option<Nested<RawChangedFiles>>,
    #[serde(default)]
    pub base_branch: Option<PatternList>,
    #[serde(default)]
    pub head_branch: Option<PatternList>,
    #[serde(default)]
    pub author: Option<PatternList>,
    #[serde(default)]
    pub all_files_to_any_glob: Option<PatternList>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub codeowners: Option<PatternList>,
}

/// Whole file: label name to its blocks. A `null` label has no blocks.
pub type RawConfig = BTreeMap<String, Option<Nested<RawBlock>>>;
