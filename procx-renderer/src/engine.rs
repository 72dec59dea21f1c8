//! Template providers and the Tera engine that compiles them.
//!
//! # Built-in template names
//!
//! | Target       | Template name(s)                                              |
//! |--------------|---------------------------------------------------------------|
//! | launchd      | `launchd/launchd.plist.tera`                                  |
//! | runit        | `runit/run.tera`, `runit/log/run.tera`                        |
//! | systemd      | `systemd/program.service.tera`, `systemd/control.target.tera` |
//! | systemd-user | `systemd-user/program.service.tera`                           |
//! | sysv         | `sysv/init.sh.tera`                                           |
//! | upstart      | `upstart/program.conf.tera`, `upstart/process-type.conf.tera`, `upstart/control.conf.tera` |

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::RenderContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("launchd/launchd.plist.tera", include_str!("templates/launchd/launchd.plist.tera")),
    ("runit/run.tera", include_str!("templates/runit/run.tera")),
    ("runit/log/run.tera", include_str!("templates/runit/log/run.tera")),
    (
        "systemd/program.service.tera",
        include_str!("templates/systemd/program.service.tera"),
    ),
    (
        "systemd/control.target.tera",
        include_str!("templates/systemd/control.target.tera"),
    ),
    (
        "systemd-user/program.service.tera",
        include_str!("templates/systemd-user/program.service.tera"),
    ),
    ("sysv/init.sh.tera", include_str!("templates/sysv/init.sh.tera")),
    ("upstart/program.conf.tera", include_str!("templates/upstart/program.conf.tera")),
    (
        "upstart/process-type.conf.tera",
        include_str!("templates/upstart/process-type.conf.tera"),
    ),
    ("upstart/control.conf.tera", include_str!("templates/upstart/control.conf.tera")),
];

// ---------------------------------------------------------------------------
// TemplateProvider
// ---------------------------------------------------------------------------

/// Resolves a template name to its source text.
pub trait TemplateProvider {
    fn template(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// The template set shipped with procx.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    /// Names of every embedded template.
    pub fn names() -> impl Iterator<Item = &'static str> {
        TPLS.iter().map(|(name, _)| *name)
    }
}

impl TemplateProvider for BuiltinTemplates {
    fn template(&self, name: &str) -> Option<Cow<'_, str>> {
        let wanted = normalize_template_name(Path::new(name));
        TPLS.iter()
            .find(|(n, _)| *n == wanted)
            .map(|(_, body)| Cow::Borrowed(*body))
    }
}

/// `.tera` files loaded from a user directory, keyed by their lowercased
/// path relative to that directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTemplates {
    templates: HashMap<String, String>,
}

impl DirectoryTemplates {
    /// Load every `.tera` file under `dir`. A missing directory is empty.
    pub fn load(dir: &Path) -> Result<Self, RenderError> {
        let templates = load_user_templates(dir)?.into_iter().collect();
        Ok(DirectoryTemplates { templates })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateProvider for DirectoryTemplates {
    fn template(&self, name: &str) -> Option<Cow<'_, str>> {
        self.templates
            .get(&normalize_template_name(Path::new(name)))
            .map(|body| Cow::Borrowed(body.as_str()))
    }
}

/// Two providers stacked: `upper` wins, `lower` fills the gaps.
#[derive(Debug, Clone)]
pub struct Layered<U, L> {
    pub upper: U,
    pub lower: L,
}

impl<U, L> Layered<U, L> {
    pub fn new(upper: U, lower: L) -> Self {
        Layered { upper, lower }
    }
}

impl<U: TemplateProvider, L: TemplateProvider> TemplateProvider for Layered<U, L> {
    fn template(&self, name: &str) -> Option<Cow<'_, str>> {
        self.upper
            .template(name)
            .or_else(|| self.lower.template(name))
    }
}

impl<T: TemplateProvider + ?Sized> TemplateProvider for &T {
    fn template(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).template(name)
    }
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path
            .strip_prefix(dir)
            .unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Compiled set of templates for one export run.
///
/// Only the names passed to [`TemplateEngine::load`] are compiled, so a
/// broken override for a target nobody asked for cannot fail the run.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Fetch `names` from `provider` and compile them.
    ///
    /// Fails with [`RenderError::TemplateNotFound`] for the first unknown
    /// name, or [`RenderError::Tera`] when a template does not parse.
    pub fn load<P>(provider: &P, names: &[&str]) -> Result<Self, RenderError>
    where
        P: TemplateProvider + ?Sized,
    {
        let mut items: Vec<(String, String)> = Vec::with_capacity(names.len());
        for name in names {
            let body = provider
                .template(name)
                .ok_or_else(|| RenderError::TemplateNotFound {
                    name: (*name).to_string(),
                })?;
            items.push((normalize_template_name(Path::new(name)), body.into_owned()));
        }

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(items)?;
        Ok(TemplateEngine { tera })
    }

    /// Render template `name` against `ctx`.
    pub fn render(&self, name: &str, ctx: &dyn RenderContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let name = normalize_template_name(Path::new(name));
        Ok(self.tera.render(&name, &tera_ctx)?)
    }

    /// Whether `name` was compiled into this engine.
    pub fn has_template(&self, name: &str) -> bool {
        let name = normalize_template_name(Path::new(name));
        self.tera.get_template_names().any(|n| n == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
