//! procx: export a Procfile to process-supervisor configuration.
//!
//! # Usage
//!
//! ```text
//! procx export <launchd|runit|systemd|systemd-user|sysv|upstart> [-l <dir>] [-f Procfile]
//!              [-a <app>] [-m all=1,web=2] [-p 5000] [-e KEY=VALUE]... [--var KEY=VALUE]...
//!              [--vars-file vars.yml] [--templates <dir>]
//! procx check [-f Procfile]
//! procx list [-f Procfile]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, export::ExportArgs, list::ListArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "procx",
    version,
    about = "Export a Procfile to launchd, runit, systemd, sysv or upstart configuration",
    long_about = None,
)]
struct Cli {
    /// Log decisions as well as writes (same as RUST_LOG=debug).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write supervisor configuration for every process instance.
    Export(ExportArgs),

    /// Parse a Procfile and report whether it is valid.
    Check(CheckArgs),

    /// Print the process types declared in a Procfile.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Export(args) => args.run(),
        Commands::Check(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
