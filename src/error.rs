// Error kinds for the merge pipeline
// Every variant aborts the run; nothing is retried.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    /// Remote endpoint could not be reached (refused, DNS, timeout, dropped body)
    #[error("could not reach remote store at {url}")]
    Connectivity {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Remote answered with a non-success status
    #[error("failed to read {path} from remote store: status {status}, reason {reason}")]
    Fetch {
        path: String,
        status: u16,
        reason: String,
    },

    /// Input text is not well-formed delimited data
    #[error("malformed CSV in {origin}: {reason}")]
    Parse { origin: String, reason: String },

    /// Local filesystem failure while producing the output
    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be rendered as CSV
    #[error("failed to serialize records: {0}")]
    Serialize(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl MergeError {
    pub fn parse(origin: &str, line: Option<u64>, reason: impl std::fmt::Display) -> Self {
        let reason = match line {
            Some(line) => format!("line {line}: {reason}"),
            None => reason.to_string(),
        };
        MergeError::Parse {
            origin: origin.to_string(),
            reason,
        }
    }

    /// Short machine-friendly kind name, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            MergeError::Connectivity { .. } => "connectivity",
            MergeError::Fetch { .. } => "fetch",
            MergeError::Parse { .. } => "parse",
            MergeError::Write { .. } => "write",
            MergeError::Serialize(_) => "serialize",
            MergeError::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
