//! `procx list`: print process-type names in declared order.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Arguments for `procx list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path to the Procfile.
    #[arg(long, short = 'f', default_value = "Procfile")]
    pub procfile: PathBuf,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        for entry in super::read_procfile(&self.procfile)? {
            println!("{}", entry.name);
        }
        Ok(())
    }
}
