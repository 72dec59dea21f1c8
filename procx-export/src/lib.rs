//! # procx-export
//!
//! Expands a Procfile and formation into supervisor configuration on disk.
//!
//! Call [`export`] with an [`ExportRequest`] and a template provider
//! (usually [`procx_renderer::BuiltinTemplates`]). The returned
//! [`ExportReport`] lists every directory and file written.

pub mod emitter;
pub mod error;
pub mod pipeline;
pub mod targets;
pub mod writer;

pub use emitter::{emitter_for, ExportScope, TargetEmitter};
pub use error::ExportError;
pub use pipeline::{export, ExportRequest, DEFAULT_BASE_PORT};
pub use writer::{ArtifactWriter, ExportReport, ARTIFACT_MODE};
