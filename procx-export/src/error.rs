//! Error types for procx-export.

use std::path::PathBuf;

use thiserror::Error;

use procx_core::{PortError, Target};
use procx_renderer::RenderError;

/// All errors that can arise from an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Template lookup, compilation or rendering failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error creating file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error writing output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error setting mode on {path}: {source}")]
    Permissions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target needs a variable the caller did not supply.
    #[error("missing required variable '{name}' for target {target}")]
    MissingVariable { name: &'static str, target: Target },

    /// A variable is present but unusable.
    #[error("variable '{name}' must be {expected}")]
    InvalidVariable { name: String, expected: &'static str },

    /// More instances than fit in one port block.
    #[error("process type '{process_type}' asks for {count} instances; at most {max} are supported")]
    FormationTooLarge {
        process_type: String,
        count: u32,
        max: u32,
    },

    #[error("port allocation failed: {0}")]
    Port(#[from] PortError),
}
