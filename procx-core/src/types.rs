//! Domain types for procx.
//!
//! Everything here is read-only input to an export run: process-type entries
//! come from the Procfile, the [`Target`] is picked by the caller, and
//! [`TemplateVars`] carries the extra variables handed to every template.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// ProcessTypeEntry
// ---------------------------------------------------------------------------

/// One named process type and the shell command that runs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTypeEntry {
    pub name: String,
    pub command: String,
}

impl ProcessTypeEntry {
    /// Build an entry, rejecting commands that cannot be shell-split.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        let command = command.into();
        if let Err(source) = shell_words::split(&command) {
            return Err(CoreError::InvalidCommand { name, source });
        }
        Ok(Self { name, command })
    }

    /// The full command as shell words.
    ///
    /// Falls back to whitespace splitting for entries built by hand with an
    /// unbalanced quote.
    pub fn command_list(&self) -> Vec<String> {
        shell_words::split(&self.command).unwrap_or_else(|_| {
            self.command
                .split_whitespace()
                .map(str::to_owned)
                .collect()
        })
    }

    /// First shell word of the command, or `""` for an empty command.
    pub fn program(&self) -> String {
        self.command_list().into_iter().next().unwrap_or_default()
    }

    /// Every shell word after the program.
    pub fn args(&self) -> Vec<String> {
        self.command_list().into_iter().skip(1).collect()
    }

    /// [`args`](Self::args) with `"` escaped, for wrapping each one in double
    /// quotes (systemd `ExecStart=`).
    pub fn args_escaped(&self) -> Vec<String> {
        self.args()
            .into_iter()
            .map(|arg| arg.replace('"', "\\\""))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

/// Supported process supervisors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    Launchd,
    Runit,
    Systemd,
    SystemdUser,
    Sysv,
    Upstart,
}

impl Target {
    /// All targets in a stable order.
    pub fn all() -> &'static [Target] {
        &[
            Target::Launchd,
            Target::Runit,
            Target::Systemd,
            Target::SystemdUser,
            Target::Sysv,
            Target::Upstart,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Launchd => "launchd",
            Target::Runit => "runit",
            Target::Systemd => "systemd",
            Target::SystemdUser => "systemd-user",
            Target::Sysv => "sysv",
            Target::Upstart => "upstart",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Target::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Target::all().iter().map(Target::as_str).collect();
                format!("unknown target '{s}'; expected one of: {}", known.join(", "))
            })
    }
}

// ---------------------------------------------------------------------------
// TemplateVars
// ---------------------------------------------------------------------------

/// Extra variables made available to every template.
///
/// Ordered so that anything iterated from it (environment files, `env` blocks
/// in units) comes out the same on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateVars(pub BTreeMap<String, Value>);

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert `key` only when it is not already set.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Fill the variables the built-in templates rely on, keeping anything
    /// the caller already set.
    ///
    /// `user` and `group` default to the app name, `log_path` to
    /// `/var/log/<app>`, `working_directory` to `/app`, `timeout` to 5 and
    /// `env` to an empty mapping.
    pub fn apply_defaults(&mut self, app: &str) {
        self.set_default("app", app);
        self.set_default("user", app);
        self.set_default("group", app);
        self.set_default("log_path", format!("/var/log/{app}"));
        self.set_default("working_directory", "/app");
        self.set_default("timeout", 5);
        self.set_default("location", "");
        self.set_default("env", Value::Object(Default::default()));
    }

    /// The `env` variable as an ordered string map.
    ///
    /// Missing `env` is an empty map. Non-string values are rendered with
    /// their JSON text; a non-object `env` is an error.
    pub fn env(&self) -> Result<BTreeMap<String, String>, CoreError> {
        match self.0.get("env") {
            None | Some(Value::Null) => Ok(BTreeMap::new()),
            Some(Value::Object(map)) => Ok(map
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect()),
            Some(_) => Err(CoreError::InvalidVariable {
                name: "env".to_string(),
                expected: "a mapping of names to values",
            }),
        }
    }

    /// Merge variables from a YAML mapping; keys already set are overwritten.
    pub fn merge_yaml(&mut self, yaml: &str) -> Result<(), CoreError> {
        let parsed: BTreeMap<String, Value> =
            serde_yaml::from_str(yaml).map_err(CoreError::VarsYaml)?;
        self.0.extend(parsed);
        Ok(())
    }
}

impl From<BTreeMap<String, Value>> for TemplateVars {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
