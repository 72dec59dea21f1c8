use std::path::PathBuf;

use procx_core::Target;
use procx_renderer::InstanceContext;

use crate::emitter::{env_map, ExportScope, TargetEmitter};
use crate::error::ExportError;
use crate::writer::ArtifactWriter;

const RUN: &str = "runit/run.tera";
const LOG_RUN: &str = "runit/log/run.tera";

/// A service directory per instance: `run`, `log/run`, and one `env/<KEY>`
/// file per environment variable (chpst `-e` layout).
#[derive(Debug, Default)]
pub struct Runit;

impl TargetEmitter for Runit {
    fn target(&self) -> Target {
        Target::Runit
    }

    fn template_names(&self) -> &'static [&'static str] {
        &[RUN, LOG_RUN]
    }

    fn validate(&self, scope: &ExportScope<'_>) -> Result<(), ExportError> {
        match env_map(scope.vars)?.keys().find(|key| !is_env_file_name(key)) {
            Some(key) => Err(ExportError::InvalidVariable {
                name: format!("env.{key}"),
                expected: "a name usable as a file in the env directory",
            }),
            None => Ok(()),
        }
    }

    fn layout(&self, scope: &ExportScope<'_>) -> Result<PathBuf, ExportError> {
        Ok(scope.location.join("service"))
    }

    fn artifacts_for_instance(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        ctx: &InstanceContext,
    ) -> Result<(), ExportError> {
        let service = self
            .layout(scope)?
            .join(format!("{}-{}", scope.app, ctx.process_name));
        let env_dir = service.join("env");
        let log_dir = service.join("log");
        writer.ensure_dir(&service)?;
        writer.ensure_dir(&env_dir)?;
        writer.ensure_dir(&log_dir)?;

        writer.render(RUN, &service.join("run"), ctx)?;

        let mut env = env_map(scope.vars)?;
        env.insert("PORT".to_string(), ctx.port.to_string());
        env.insert("PS".to_string(), format!("{}-{}", scope.app, ctx.process_name));
        for (key, value) in &env {
            writer.write_plain(&env_dir.join(key), value)?;
        }

        writer.render(LOG_RUN, &log_dir.join("run"), ctx)
    }
}

/// Each key becomes a file directly inside `env/`.
fn is_env_file_name(key: &str) -> bool {
    !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains(['/', '\\', '=', '\0'])
}
