//! # procx-renderer
//!
//! Per-instance template contexts and the Tera engine that renders
//! supervisor configuration from them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use procx_core::{ProcessTypeEntry, TemplateVars};
//! use procx_renderer::{BuiltinTemplates, InstanceContext, TemplateEngine};
//!
//! fn render_unit(entry: &ProcessTypeEntry, vars: &TemplateVars) {
//!     let name = "systemd/program.service.tera";
//!     if let Ok(engine) = TemplateEngine::load(&BuiltinTemplates, &[name]) {
//!         let ctx = InstanceContext::build("shop", entry, "web-1", 1, 5000, vars);
//!         if let Ok(unit) = engine.render(name, &ctx) {
//!             println!("{unit}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{AggregateContext, InstanceContext, RenderContext};
pub use engine::{BuiltinTemplates, DirectoryTemplates, Layered, TemplateEngine, TemplateProvider};
pub use error::RenderError;
