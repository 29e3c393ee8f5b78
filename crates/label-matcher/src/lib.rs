//! Pull request label matching engine.
//!
//! Decides which labels apply to a pull request from a labeler YAML
//! configuration and facts about the PR: changed file paths, base and head
//! branch refs, author login and the labels already attached.
//!
//! ```no_run
//! use label_matcher::{LabelerConfig, PullRequestFacts, RuleMatcher};
//!
//! # async fn run() -> label_matcher::Result<()> {
//! let config = LabelerConfig::from_yaml_str(
//!     "docs:\n  - changed-files:\n      - any-glob-to-any-file: 'docs/**'\n",
//! )?;
//! let facts = PullRequestFacts::new()
//!     .with_changed_files(["docs/guide.md"])
//!     .with_labels(["bug"]);
//!
//! let result = RuleMatcher::default().evaluate(&config, &facts).await;
//! assert_eq!(result.add_to(), vec!["docs"]);
//! # Ok(())
//! # }
//! ```
//!
//! Fetching configuration, calling the GitHub API and applying label changes
//! are left to the caller. Team membership checks go through the
//! [`TeamMembershipLookup`] trait.

pub mod author;
pub mod branch;
pub mod changed_files;
pub mod config;
pub mod error;
pub mod glob;
pub mod matcher;
pub mod options;
pub mod result;

mod regex_cache;

pub use author::{
    AuthorMatcher, Membership, StaticTeamDirectory, TeamMembershipCache, TeamMembershipLookup,
};
pub use branch::BranchMatcher;
pub use changed_files::{ChangedFilesEvaluator, GlobRelation};
pub use config::{ChangedFilesRule, LabelConfig, LabelerConfig, LabelerMatch, LabelerRule};
pub use error::{LabelerError, Result};
pub use glob::{glob_match, CompiledGlob, GlobCache};
pub use matcher::{PullRequestFacts, RuleMatcher};
pub use options::MatcherOptions;
pub use result::{collect_codeowners, MatchResult};
