//! Template contexts: per-instance and aggregate rendering payloads.
//!
//! Every context is assembled from a fresh copy of the caller's
//! [`TemplateVars`] with the derived fields inserted on top, so nothing set
//! while rendering one instance can show up in another.

use serde::Serialize;
use serde_json::{json, Value};

use procx_core::types::{ProcessTypeEntry, TemplateVars};

use crate::error::RenderError;

/// Anything that can be turned into a [`tera::Context`].
pub trait RenderContext {
    fn to_tera_context(&self) -> Result<tera::Context, RenderError>;
}

/// Variables for one numbered instance of a process type.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceContext {
    pub app: String,
    pub process_type: String,
    /// `<type>-<num>`.
    pub process_name: String,
    pub num: u32,
    pub port: u16,
    pub program: String,
    pub args: Vec<String>,
    pub args_escaped: Vec<String>,
    pub command: String,
    pub command_list: Vec<String>,
    /// `<app>-<type>.<num>`.
    pub ps: String,
    pub description: String,
    #[serde(skip)]
    extra: TemplateVars,
}

impl InstanceContext {
    /// Derive the context for instance `num` of `entry`.
    pub fn build(
        app: &str,
        entry: &ProcessTypeEntry,
        process_name: &str,
        num: u32,
        port: u16,
        extra: &TemplateVars,
    ) -> Self {
        let description = match extra.get_str("description") {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => format!("{}.{} process for {}", entry.name, num, app),
        };
        let command_list = entry.command_list();

        InstanceContext {
            app: app.to_string(),
            process_type: entry.name.clone(),
            process_name: process_name.to_string(),
            num,
            port,
            program: command_list.first().cloned().unwrap_or_default(),
            args: entry.args(),
            args_escaped: entry.args_escaped(),
            command: entry.command.clone(),
            command_list,
            ps: format!("{}-{}.{}", app, entry.name, num),
            description,
            extra: extra.clone(),
        }
    }

    /// Flattened variables: extras first, derived fields on top. `env` is
    /// normalised to a string mapping.
    pub fn to_vars(&self) -> Result<TemplateVars, RenderError> {
        let mut vars = self.extra.clone();
        let env = self.extra.env()?;
        vars.insert("env", serde_json::to_value(env)?);
        if let Value::Object(derived) = serde_json::to_value(self)? {
            for (key, value) in derived {
                vars.insert(key, value);
            }
        }
        Ok(vars)
    }
}

impl RenderContext for InstanceContext {
    fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self.to_vars()?).map_err(RenderError::from)
    }
}

/// Variables for artifacts that cover a whole application or process type
/// (systemd target, upstart control units).
#[derive(Debug, Clone)]
pub struct AggregateContext {
    vars: TemplateVars,
}

impl AggregateContext {
    pub fn new(app: &str, extra: &TemplateVars) -> Self {
        let mut vars = extra.clone();
        vars.set_default("env", json!({}));
        vars.insert("app", app);
        AggregateContext { vars }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.vars.insert(key, value);
        self
    }

    pub fn vars(&self) -> &TemplateVars {
        &self.vars
    }
}

impl RenderContext for AggregateContext {
    fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(&self.vars).map_err(RenderError::from)
    }
}
