//! Export pipeline shared by every target.
//!
//! The instance loop lives here and only here:
//! formation → port → context → emitter, for each entry in declared order.

use std::path::PathBuf;

use procx_core::{port_for, Formation, ProcessTypeEntry, Target, TemplateVars, PORT_STRIDE};
use procx_renderer::{InstanceContext, TemplateEngine, TemplateProvider};

use crate::emitter::{emitter_for, env_map, ExportScope};
use crate::error::ExportError;
use crate::writer::{ArtifactWriter, ExportReport};

/// Base port used when the caller does not pick one.
pub const DEFAULT_BASE_PORT: u16 = 5000;

/// Everything needed for one export run.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub app: String,
    pub entries: Vec<ProcessTypeEntry>,
    pub formation: Formation,
    pub target: Target,
    /// Output root.
    pub location: PathBuf,
    pub base_port: u16,
    pub vars: TemplateVars,
}

impl ExportRequest {
    /// A request with no entries, `all=1`, the default base port and no
    /// extra variables.
    pub fn new(app: impl Into<String>, target: Target, location: impl Into<PathBuf>) -> Self {
        ExportRequest {
            app: app.into(),
            entries: Vec::new(),
            formation: Formation::all(1),
            target,
            location: location.into(),
            base_port: DEFAULT_BASE_PORT,
            vars: TemplateVars::new(),
        }
    }

    pub fn entries(mut self, entries: Vec<ProcessTypeEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn formation(mut self, formation: Formation) -> Self {
        self.formation = formation;
        self
    }

    pub fn base_port(mut self, base_port: u16) -> Self {
        self.base_port = base_port;
        self
    }

    pub fn vars(mut self, vars: TemplateVars) -> Self {
        self.vars = vars;
        self
    }

    /// Caller variables with `location` and the template defaults filled in.
    pub fn effective_vars(&self) -> TemplateVars {
        let mut vars = self.vars.clone();
        vars.set_default("location", self.location.display().to_string());
        vars.apply_defaults(&self.app);
        vars
    }

    /// Resolved instance count per entry, rejecting formations that would
    /// overlap port blocks or run past the last port.
    pub fn instance_counts(&self) -> Result<Vec<u32>, ExportError> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let count = self.formation.resolve(entry);
                if count > PORT_STRIDE {
                    return Err(ExportError::FormationTooLarge {
                        process_type: entry.name.clone(),
                        count,
                        max: PORT_STRIDE,
                    });
                }
                if count > 0 {
                    port_for(index, count, self.base_port)?;
                }
                Ok(count)
            })
            .collect()
    }
}

/// Run `request`, rendering templates from `provider`.
///
/// Nothing is written unless `env` is a mapping, the target's required
/// variables are present, every count is within limits and every template compiles. After that a
/// failure stops the run where it happened; files already written remain.
pub fn export<P>(request: &ExportRequest, provider: &P) -> Result<ExportReport, ExportError>
where
    P: TemplateProvider + ?Sized,
{
    let vars = request.effective_vars();
    let scope = ExportScope {
        app: &request.app,
        location: &request.location,
        vars: &vars,
    };

    let mut emitter = emitter_for(request.target);
    env_map(&vars)?;
    emitter.validate(&scope)?;
    let counts = request.instance_counts()?;
    let engine = TemplateEngine::load(provider, emitter.template_names())?;

    let mut writer = ArtifactWriter::new(&engine, request.target);
    writer.ensure_dir(&emitter.layout(&scope)?)?;

    for ((index, entry), count) in request.entries.iter().enumerate().zip(counts) {
        tracing::debug!("{}: {} instance(s) of '{}'", request.target, count, entry.name);
        emitter.begin_process_type(&mut writer, &scope, entry, count)?;

        for num in 1..=count {
            let port = port_for(index, num, request.base_port)?;
            let process_name = format!("{}-{}", entry.name, num);
            let ctx = InstanceContext::build(&request.app, entry, &process_name, num, port, &vars);
            emitter.artifacts_for_instance(&mut writer, &scope, &ctx)?;
        }
    }

    emitter.finalize(&mut writer, &scope)?;

    let mut report = writer.into_report();
    report.hints = emitter.hints().to_vec();
    Ok(report)
}
