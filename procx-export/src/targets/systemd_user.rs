use std::path::PathBuf;

use procx_core::Target;
use procx_renderer::InstanceContext;

use crate::emitter::{ExportScope, TargetEmitter};
use crate::error::ExportError;
use crate::writer::ArtifactWriter;

const SERVICE: &str = "systemd-user/program.service.tera";

/// One user `.service` per instance under `<home>/.config/systemd/user`,
/// rooted at the output location. Needs the `home` variable.
#[derive(Debug, Default)]
pub struct SystemdUser;

impl SystemdUser {
    fn home<'s>(scope: &ExportScope<'s>) -> Result<&'s str, ExportError> {
        match scope.vars.get("home") {
            None | Some(serde_json::Value::Null) => Err(ExportError::MissingVariable {
                name: "home",
                target: Target::SystemdUser,
            }),
            Some(serde_json::Value::String(home)) if !home.trim().is_empty() => Ok(home.as_str()),
            Some(serde_json::Value::String(_)) => Err(ExportError::MissingVariable {
                name: "home",
                target: Target::SystemdUser,
            }),
            Some(_) => Err(ExportError::InvalidVariable {
                name: "home".to_string(),
                expected: "a path string",
            }),
        }
    }
}

impl TargetEmitter for SystemdUser {
    fn target(&self) -> Target {
        Target::SystemdUser
    }

    fn template_names(&self) -> &'static [&'static str] {
        &[SERVICE]
    }

    fn validate(&self, scope: &ExportScope<'_>) -> Result<(), ExportError> {
        Self::home(scope).map(|_| ())
    }

    fn layout(&self, scope: &ExportScope<'_>) -> Result<PathBuf, ExportError> {
        // `home` is absolute on the target host; keep it under the output root.
        let home = Self::home(scope)?.trim_start_matches('/');
        Ok(scope
            .location
            .join(home)
            .join(".config")
            .join("systemd")
            .join("user"))
    }

    fn artifacts_for_instance(
        &mut self,
        writer: &mut ArtifactWriter<'_>,
        scope: &ExportScope<'_>,
        ctx: &InstanceContext,
    ) -> Result<(), ExportError> {
        let path = self
            .layout(scope)?
            .join(format!("{}-{}.service", scope.app, ctx.process_name));
        writer.render(SERVICE, &path, ctx)
    }

    fn hints(&self) -> &'static [&'static str] {
        &["You will want to run 'systemctl --user daemon-reload' to activate the service on the target host"]
    }
}
