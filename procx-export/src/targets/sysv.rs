use std::path::PathBuf;

use procx_core::Target;
use procx_renderer::InstanceContext;

use crate::emitter::{ExportScope, TargetEmitter};
use crate::error::ExportError;
use crate::writer::ArtifactWriter;

const INIT_SCRIPT: &str = "sysv/init.sh.tera";

/// One init script per instance under `etc/init.d`.
#[derive(Debug, Default)]
pub struct Sysv;

impl TargetEmitter for Sysv {
    fn target(&self) -> Target {
        Target::Sysv
    }

    fn template_names(&self) -> &'static [&'static str] {
        &[INIT_SCRIPT]
    }

    fn layout(&self, scope: &ExportScope<'_>) -> Result<PathBuf, ExportError> {
        Ok(scope.location.join("etc").join("init.d"))
    }

    fn artifacts_for_instance(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        ctx: &InstanceContext,
    ) -> Result<(), ExportError> {
        let path = self
            .layout(scope)?
            .join(format!("{}-{}", scope.app, ctx.process_name));
        writer.render(INIT_SCRIPT, &path, ctx)
    }
}
