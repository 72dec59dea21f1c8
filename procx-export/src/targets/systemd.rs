use std::path::PathBuf;

use procx_core::Target;
use procx_renderer::{AggregateContext, InstanceContext};

use crate::emitter::{ExportScope, TargetEmitter};
use crate::error::ExportError;
use crate::writer::ArtifactWriter;

const SERVICE: &str = "systemd/program.service.tera";
const TARGET: &str = "systemd/control.target.tera";

/// One `.service` per instance plus an `{app}.target` that wants all of them.
#[derive(Debug, Default)]
pub struct Systemd {
    /// Unit names written so far, in order.
    units: Vec<String>,
}

impl TargetEmitter for Systemd {
    fn target(&self) -> Target {
        Target::Systemd
    }

    fn template_names(&self) -> &'static [&'static str] {
        &[SERVICE, TARGET]
    }

    fn layout(&self, scope: &ExportScope<'_>) -> Result<PathBuf, ExportError> {
        Ok(scope.location.join("etc").join("systemd").join("system"))
    }

    fn artifacts_for_instance(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        ctx: &InstanceContext,
    ) -> Result<(), ExportError> {
        let unit = format!("{}-{}.{}.service", scope.app, ctx.process_type, ctx.num);
        self.units.push(unit.clone());
        writer.render(SERVICE, &self.layout(scope)?.join(unit), ctx)
    }

    fn finalize(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
    ) -> Result<(), ExportError> {
        let ctx = AggregateContext::new(scope.app, scope.vars).with("processes", self.units.clone());
        let path = self.layout(scope)?.join(format!("{}.target", scope.app));
        writer.render(TARGET, &path, &ctx)
    }

    fn hints(&self) -> &'static [&'static str] {
        &["You will want to run 'systemctl --system daemon-reload' to activate the service on the target host"]
    }
}
