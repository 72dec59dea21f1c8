//! Error types for procx-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No provider knows a template by this name.
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// Extra variables with the wrong shape (e.g. a non-mapping `env`).
    #[error("invalid template variables: {0}")]
    Vars(#[from] procx_core::CoreError),

    /// Tera template engine error (parse or render).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error while loading user templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
