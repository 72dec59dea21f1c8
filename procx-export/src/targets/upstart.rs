use std::path::PathBuf;

use procx_core::{ProcessTypeEntry, Target};
use procx_renderer::{AggregateContext, InstanceContext};

use crate::emitter::{ExportScope, TargetEmitter};
use crate::error::ExportError;
use crate::writer::ArtifactWriter;

const PROGRAM: &str = "upstart/program.conf.tera";
const PROCESS_TYPE: &str = "upstart/process-type.conf.tera";
const CONTROL: &str = "upstart/control.conf.tera";

/// Three-level job tree under `etc/init`: `{app}.conf` starts every
/// `{app}-{type}.conf`, which starts its `{app}-{type}-{num}.conf` jobs.
#[derive(Debug, Default)]
pub struct Upstart;

impl TargetEmitter for Upstart {
    fn target(&self) -> Target {
        Target::Upstart
    }

    fn template_names(&self) -> &'static [&'static str] {
        &[PROGRAM, PROCESS_TYPE, CONTROL]
    }

    fn layout(&self, scope: &ExportScope<'_>) -> Result<PathBuf, ExportError> {
        Ok(scope.location.join("etc").join("init"))
    }

    fn begin_process_type(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        entry: &ProcessTypeEntry,
        count: u32,
    ) -> Result<(), ExportError> {
        if count == 0 {
            tracing::debug!("upstart: no instances of '{}', skipping its job", entry.name);
            return Ok(());
        }
        let ctx = AggregateContext::new(scope.app, scope.vars).with("process_type", entry.name.as_str());
        let path = self
            .layout(scope)?
            .join(format!("{}-{}.conf", scope.app, entry.name));
        writer.render(PROCESS_TYPE, &path, &ctx)
    }

    fn artifacts_for_instance(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        ctx: &InstanceContext,
    ) -> Result<(), ExportError> {
        let path = self
            .layout(scope)?
            .join(format!("{}-{}.conf", scope.app, ctx.process_name));
        writer.render(PROGRAM, &path, ctx)
    }

    fn finalize(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
    ) -> Result<(), ExportError> {
        let ctx = AggregateContext::new(scope.app, scope.vars);
        let path = self.layout(scope)?.join(format!("{}.conf", scope.app));
        writer.render(CONTROL, &path, &ctx)
    }
}
