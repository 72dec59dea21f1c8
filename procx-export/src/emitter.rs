//! The [`TargetEmitter`] seam shared by every supervisor.
//!
//! The pipeline owns the instance loop; an emitter only decides where files
//! go and which templates produce them. Emitters that need an aggregate unit
//! keep their accumulator in `self` and write it from [`TargetEmitter::finalize`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use procx_core::{ProcessTypeEntry, Target, TemplateVars};
use procx_renderer::InstanceContext;

use crate::error::ExportError;
use crate::targets::{Launchd, Runit, Systemd, SystemdUser, Sysv, Upstart};
use crate::writer::ArtifactWriter;

/// Read-only inputs shared by every emitter call of one run.
#[derive(Debug, Clone, Copy)]
pub struct ExportScope<'a> {
    pub app: &'a str,
    /// Output root; every artifact lands somewhere below it.
    pub location: &'a Path,
    /// Extra variables with defaults applied.
    pub vars: &'a TemplateVars,
}

pub trait TargetEmitter {
    fn target(&self) -> Target;

    /// Templates this emitter renders; all are compiled before the first write.
    fn template_names(&self) -> &'static [&'static str];

    /// Check required variables. Runs before anything touches the filesystem.
    fn validate(&self, _scope: &ExportScope<'_>) -> Result<(), ExportError> {
        Ok(())
    }

    /// Directory the emitter writes into, created before the instance loop.
    fn layout(&self, scope: &ExportScope<'_>) -> Result<PathBuf, ExportError>;

    /// Called once per process type, before its instances, with its resolved count.
    fn begin_process_type(
        &mut self,
        _writer: &mut ArtifactWriter<'_>,
        _scope: &ExportScope<'_>,
        _entry: &ProcessTypeEntry,
        _count: u32,
    ) -> Result<(), ExportError> {
        Ok(())
    }

    fn artifacts_for_instance(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        ctx: &InstanceContext,
    ) -> Result<(), ExportError>;

    /// Write aggregate artifacts once every entry has been visited.
    fn finalize(
        &mut self,
        _writer: &mut ArtifactWriter<'_>,
        _scope: &ExportScope<'_>,
    ) -> Result<(), ExportError> {
        Ok(())
    }

    /// Reminders printed after a successful run.
    fn hints(&self) -> &'static [&'static str] {
        &[]
    }
}

/// The `env` variable as a string map, or `InvalidVariable` when it is not a
/// mapping.
pub fn env_map(vars: &TemplateVars) -> Result<BTreeMap<String, String>, ExportError> {
    vars.env().map_err(|_| ExportError::InvalidVariable {
        name: "env".to_string(),
        expected: "a mapping of names to values",
    })
}

/// A fresh emitter for `target`.
pub fn emitter_for(target: Target) -> Box<dyn TargetEmitter> {
    match target {
        Target::Launchd => Box::new(Launchd),
        Target::Runit => Box::new(Runit),
        Target::Systemd => Box::new(Systemd::default()),
        Target::SystemdUser => Box::new(SystemdUser),
        Target::Sysv => Box::new(Sysv),
        Target::Upstart => Box::new(Upstart),
    }
}
