use std::path::PathBuf;

use procx_core::Target;
use procx_renderer::InstanceContext;

use crate::emitter::{ExportScope, TargetEmitter};
use crate::error::ExportError;
use crate::writer::ArtifactWriter;

const PLIST: &str = "launchd/launchd.plist.tera";

/// One `.plist` per instance under `Library/LaunchDaemons`.
#[derive(Debug, Default)]
pub struct Launchd;

impl TargetEmitter for Launchd {
    fn target(&self) -> Target {
        Target::Launchd
    }

    fn template_names(&self) -> &'static [&'static str] {
        &[PLIST]
    }

    fn layout(&self, scope: &ExportScope<'_>) -> Result<PathBuf, ExportError> {
        Ok(scope.location.join("Library").join("LaunchDaemons"))
    }

    fn artifacts_for_instance(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        ctx: &InstanceContext,
    ) -> Result<(), ExportError> {
        let path = self
            .layout(scope)?
            .join(format!("{}-{}.plist", scope.app, ctx.process_name));
        writer.render(PLIST, &path, ctx)
    }
}
