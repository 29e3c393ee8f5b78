//! Errors surfaced by the label matcher.
//!
//! Only configuration loading can fail. Pattern problems and membership
//! lookup failures are absorbed during evaluation and show up as "no match".

use thiserror::Error;

/// Errors that can occur when loading a labeler configuration
#[derive(Error, Debug)]
pub enum LabelerError {
    #[error("Failed to decode labeler config: {0}")]
    Decode(#[from] serde_yaml::Error),
    #[error("Failed to read labeler config: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LabelerError>;
