//! procx core library: process-type entries, formations, port allocation.
//!
//! - [`types`]: [`ProcessTypeEntry`], [`Target`], [`TemplateVars`]
//! - [`formation`]: instance counts per process type
//! - [`port`]: deterministic per-instance ports
//! - [`procfile`]: `name: command` parsing
//! - [`error`]: [`CoreError`]

pub mod error;
pub mod formation;
pub mod port;
pub mod procfile;
pub mod types;

pub use error::CoreError;
pub use formation::Formation;
pub use port::{port_for, PortError, PORT_STRIDE};
pub use procfile::parse_procfile;
pub use types::{ProcessTypeEntry, Target, TemplateVars};
