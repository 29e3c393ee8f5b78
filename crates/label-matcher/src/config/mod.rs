//! Labeler configuration: canonical rule tree and YAML loading.
//!
//! A labeler file maps each label name to a list of blocks. Blocks are
//! decoded leniently (see [`raw`]) and folded by the normalizer into the
//! canonical [`LabelConfig`] tree that the rule matcher evaluates.

mod normalize;
pub mod raw;

use crate::changed_files::GlobRelation;
use crate::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

pub use normalize::LabelConfigBuilder;

/// Five independent pattern sets relating globs to changed files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChangedFilesRule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_glob_to_any_file: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_glob_to_all_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_globs_to_any_file: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_globs_to_all_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_files_to_any_glob: Vec<String>,
}

impl ChangedFilesRule {
    /// Rule with a single pattern set.
    pub fn single(relation: GlobRelation, patterns: Vec<String>) -> Self {
        let mut rule = Self::default();
        *rule.patterns_mut(relation) = patterns;
        rule
    }

    pub fn patterns(&self, relation: GlobRelation) -> &[String] {
        match relation {
            GlobRelation::AnyGlobToAnyFile => &self.any_glob_to_any_file,
            GlobRelation::AnyGlobToAllFiles => &self.any_glob_to_all_files,
            GlobRelation::AllGlobsToAnyFile => &self.all_globs_to_any_file,
            GlobRelation::AllGlobsToAllFiles => &self.all_globs_to_all_files,
            GlobRelation::AllFilesToAnyGlob => &self.all_files_to_any_glob,
        }
    }

    fn patterns_mut(&mut self, relation: GlobRelation) -> &mut Vec<String> {
        match relation {
            GlobRelation::AnyGlobToAnyFile => &mut self.any_glob_to_any_file,
            GlobRelation::AnyGlobToAllFiles => &mut self.any_glob_to_all_files,
            GlobRelation::AllGlobsToAnyFile => &mut self.all_globs_to_any_file,
            GlobRelation::AllGlobsToAllFiles => &mut self.all_globs_to_all_files,
            GlobRelation::AllFilesToAnyGlob => &mut self.all_files_to_any_glob,
        }
    }

    /// Non-empty pattern sets in a fixed order.
    pub fn groups(&self) -> impl Iterator<Item = (GlobRelation, &[String])> + '_ {
        GlobRelation::ALL
            .into_iter()
            .map(|relation| (relation, self.patterns(relation)))
            .filter(|(_, patterns)| !patterns.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.groups().next().is_none()
    }
}

/// One rule under `any` or `all`. Absent fields never take part in
/// evaluation; an empty `changed_files` list counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LabelerRule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed_files: Vec<ChangedFilesRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_branch: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<String>>,
}

/// `any` rules are ORed, `all` rules are ANDed, and both must hold when both
/// are present. An entry with neither is true.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelerMatch {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any: Vec<LabelerRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all: Vec<LabelerRule>,
}

impl LabelerMatch {
    pub fn is_empty(&self) -> bool {
        self.any.is_empty() && self.all.is_empty()
    }
}

/// Canonical configuration of a single label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelConfig {
    /// Entries are ANDed. An empty list means the label never matches.
    pub matcher: Vec<LabelerMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub codeowners: BTreeSet<String>,
}

impl LabelConfig {
    /// Colour without a leading `#`.
    pub fn color_hex(&self) -> Option<&str> {
        self.color
            .as_deref()
            .map(|c| c.strip_prefix('#').unwrap_or(c))
    }
}

/// Label name to canonical label configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelerConfig(pub BTreeMap<String, LabelConfig>);

impl LabelerConfig {
    /// Decode and normalize a labeler YAML document. Merge keys (`<<`) are
    /// applied before decoding. An empty document yields an empty
    /// configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        value.apply_merge()?;
        let raw: Option<raw::RawConfig> = serde_yaml::from_value(value)?;
        Ok(Self::from_raw(raw.unwrap_or_default()))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_raw(raw: raw::RawConfig) -> Self {
        let labels = raw
            .into_iter()
            .map(|(label, blocks)| {
                let mut builder = LabelConfigBuilder::new();
                for block in raw::flatten_opt(blocks) {
                    builder.push_block(block);
                }
                (label, builder.build())
            })
            .collect();
        LabelerConfig(labels)
    }

    pub fn get(&self, label: &str) -> Option<&LabelConfig> {
        self.0.get(label)
    }

    pub fn insert(&mut self, label: impl Into<String>, config: LabelConfig) {
        self.0.insert(label.into(), config);
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelConfig)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
