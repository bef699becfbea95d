use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A field name on the event surface that is not one of the form's fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown field `{0}`")]
pub struct UnknownField(pub String);

/// Failure reported by a submission sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The remote side could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The remote side answered but refused the data.
    #[error("server rejected submission: {0}")]
    Rejected(String),
}

/// Errors raised while loading a [`FormConfig`](crate::config::FormConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported config extension for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("invalid {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Top-level failure of the `userform` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
