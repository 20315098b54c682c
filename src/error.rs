// Error types for factory extraction
//
// Every variant describes why a single file contributed nothing. Directory-level
// outcomes (missing directory, empty directory) are not errors and never show up here.

use std::path::PathBuf;
use thiserror::Error;

/// Per-file failure while turning Ruby source into fixture records
#[derive(Debug, Error)]
pub enum FixtureError {
    /// `source` already names the path it failed on
    #[error("{source:#}")]
    Read {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The parser built a tree, but it contains ERROR or MISSING nodes
    #[error("syntax errors in {origin}")]
    Syntax { origin: String },

    #[error("parser produced no tree for {origin}")]
    NoTree { origin: String },

    /// Grammar could not be loaded into the parser
    #[error(transparent)]
    Language(#[from] anyhow::Error),

    #[error("invalid factory file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to serialize factories: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FixtureError>;
