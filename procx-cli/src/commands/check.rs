//! `procx check`: validate a Procfile.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Arguments for `procx check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the Procfile.
    #[arg(long, short = 'f', default_value = "Procfile")]
    pub procfile: PathBuf,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let entries = super::read_procfile(&self.procfile)?;
        println!(
            "{} {} is valid ({} process type{})",
            "✓".green(),
            self.procfile.display(),
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }
}
