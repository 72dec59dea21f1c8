//! `procx export`: write supervisor configuration for a Procfile.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::{Map, Value};

use procx_core::{Formation, Target, TemplateVars};
use procx_export::{export, ExportRequest, DEFAULT_BASE_PORT};
use procx_renderer::{BuiltinTemplates, DirectoryTemplates, Layered, TemplateProvider};

/// Arguments for `procx export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Supervisor to export for: launchd | runit | systemd | systemd-user | sysv | upstart.
    pub target: Target,

    /// Output root; every generated path is created below it.
    #[arg(long, short = 'l', default_value = ".")]
    pub location: PathBuf,

    /// Path to the Procfile.
    #[arg(long, short = 'f', default_value = "Procfile")]
    pub procfile: PathBuf,

    /// Application name. Defaults to the current directory name.
    #[arg(long, short = 'a')]
    pub app: Option<String>,

    /// Instance counts, e.g. `all=1,web=2`.
    #[arg(long, short = 'm', default_value = "all=1")]
    pub formation: String,

    /// First port handed out; each process type gets a block of 100.
    #[arg(long, short = 'p', default_value_t = DEFAULT_BASE_PORT)]
    pub port: u16,

    /// Environment variable for every instance (repeatable).
    #[arg(long = "env", short = 'e', value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,

    /// Extra template variable (repeatable).
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// YAML mapping of extra template variables.
    #[arg(long)]
    pub vars_file: Option<PathBuf>,

    /// Directory of `.tera` files overriding the built-in templates.
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Home directory on the target host (systemd-user). Defaults to yours.
    #[arg(long)]
    pub home: Option<String>,

    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub group: Option<String>,

    #[arg(long)]
    pub working_directory: Option<String>,

    #[arg(long)]
    pub log_path: Option<String>,

    /// Description used for every instance instead of `<type>.<num> process for <app>`.
    #[arg(long)]
    pub description: Option<String>,
}

impl ExportArgs {
    pub fn run(self) -> Result<()> {
        let entries = super::read_procfile(&self.procfile)?;
        let app = match &self.app {
            Some(app) => app.clone(),
            None => app_from_cwd()?,
        };
        let formation = Formation::parse(&self.formation)
            .with_context(|| format!("invalid formation '{}'", self.formation))?;
        let vars = self.template_vars()?;
        tracing::debug!(
            "{} process type(s) from {}, formation '{}'",
            entries.len(),
            self.procfile.display(),
            self.formation
        );

        let request = ExportRequest::new(app.as_str(), self.target, &self.location)
            .entries(entries)
            .formation(formation)
            .base_port(self.port)
            .vars(vars);

        let provider: Box<dyn TemplateProvider> = match &self.templates {
            Some(dir) => Box::new(Layered::new(
                DirectoryTemplates::load(dir)
                    .with_context(|| format!("failed to load templates from {}", dir.display()))?,
                BuiltinTemplates,
            )),
            None => Box::new(BuiltinTemplates),
        };

        let report = export(&request, &*provider)
            .with_context(|| format!("{} export failed for '{app}'", self.target))?;

        println!(
            "{} exported '{}' for {} ({} file{} under {})",
            "✓".green(),
            app,
            report.target,
            report.files.len(),
            if report.files.len() == 1 { "" } else { "s" },
            self.location.display()
        );
        for hint in &report.hints {
            println!("{}", hint.yellow());
        }
        Ok(())
    }

    /// Variables in increasing precedence: vars file, `--var`, the dedicated
    /// flags, then `--env` merged over any `env` mapping already present.
    fn template_vars(&self) -> Result<TemplateVars> {
        let mut vars = TemplateVars::new();

        if let Some(path) = &self.vars_file {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read vars file {}", path.display()))?;
            vars.merge_yaml(&yaml)
                .with_context(|| format!("invalid vars file {}", path.display()))?;
        }

        for (key, value) in &self.vars {
            vars.insert(key.as_str(), value.as_str());
        }

        let flags = [
            ("user", &self.user),
            ("group", &self.group),
            ("working_directory", &self.working_directory),
            ("log_path", &self.log_path),
            ("description", &self.description),
            ("home", &self.home),
        ];
        for (key, value) in flags {
            if let Some(value) = value {
                vars.insert(key, value.as_str());
            }
        }

        if vars.get("home").is_none() {
            if let Some(home) = dirs::home_dir() {
                vars.insert("home", home.display().to_string());
            }
        }

        if !self.env.is_empty() {
            let mut env: Map<String, Value> = vars
                .env()
                .context("'env' must be a mapping")?
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            for (key, value) in &self.env {
                env.insert(key.clone(), Value::String(value.clone()));
            }
            vars.insert("env", Value::Object(env));
        }

        Ok(vars)
    }
}

fn app_from_cwd() -> Result<String> {
    let cwd = std::env::current_dir().context("could not determine current directory")?;
    dir_name(&cwd).with_context(|| format!("cannot derive an app name from {}", cwd.display()))
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ExportArgs,
    }

    fn parse(argv: &[&str]) -> ExportArgs {
        let mut full = vec!["procx"];
        full.extend_from_slice(argv);
        Wrapper::parse_from(full).args
    }

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(parse_key_val("A=b=c").unwrap(), ("A".into(), "b=c".into()));
        assert_eq!(parse_key_val("A=").unwrap(), ("A".into(), String::new()));
        assert!(parse_key_val("=x").is_err());
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn defaults() {
        let args = parse(&["systemd"]);
        assert_eq!(args.target, Target::Systemd);
        assert_eq!(args.location, PathBuf::from("."));
        assert_eq!(args.procfile, PathBuf::from("Procfile"));
        assert_eq!(args.formation, "all=1");
        assert_eq!(args.port, 5000);
    }

    #[test]
    fn flags_override_var_and_env_flags_merge() {
        let args = parse(&[
            "runit",
            "--var",
            "user=nobody",
            "--var",
            "region=eu",
            "--user",
            "deploy",
            "--home",
            "/home/deploy",
            "-e",
            "A=1",
            "-e",
            "B=2",
        ]);
        let vars = args.template_vars().unwrap();
        assert_eq!(vars.get_str("user"), Some("deploy"));
        assert_eq!(vars.get_str("region"), Some("eu"));
        assert_eq!(vars.get_str("home"), Some("/home/deploy"));
        let env = vars.env().unwrap();
        assert_eq!(env.get("A").map(String::as_str), Some("1"));
        assert_eq!(env.get("B").map(String::as_str), Some("2"));
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(Wrapper::try_parse_from(["procx", "openrc"]).is_err());
    }

    #[test]
    fn dir_name_of_root_is_none() {
        assert_eq!(dir_name(Path::new("/")), None);
        assert_eq!(dir_name(Path::new("/srv/shop")), Some("shop".to_string()));
    }
}
