//! Error types for procx-core.

use thiserror::Error;

/// Errors from parsing Procfiles, formations and extra variables.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A Procfile line that is neither blank, a comment, nor `name: command`.
    #[error("invalid Procfile line {line}: {content:?}")]
    InvalidProcfileLine { line: usize, content: String },

    /// The same process type was declared twice.
    #[error("duplicate process type '{name}' on line {line}")]
    DuplicateProcessType { name: String, line: usize },

    /// A command that cannot be split into shell words.
    #[error("cannot parse command for process type '{name}': {source}")]
    InvalidCommand {
        name: String,
        #[source]
        source: shell_words::ParseError,
    },

    /// A malformed `name=count` item in a formation string.
    #[error("invalid formation entry {0:?}; expected name=count")]
    InvalidFormation(String),

    /// An extra variable with the wrong shape.
    #[error("variable '{name}' must be {expected}")]
    InvalidVariable { name: String, expected: &'static str },

    /// Variables file is not a YAML mapping.
    #[error("failed to parse variables: {0}")]
    VarsYaml(#[source] serde_yaml::Error),
}
