//! Kiln CLI - incremental content build engine
//!
//! Usage: kiln [--json] [-v...] <COMMAND>
//!
//! Commands:
//!   build   Build every source file under the root
//!   watch   Build, then rebuild continuously as files change
//!   deps    Print the resolved includes of one file

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build { root } => commands::build::cmd_build(&root, cli.json),
        Commands::Watch { root } => commands::watch::cmd_watch(&root, cli.json),
        Commands::Deps { file, root } => commands::deps::cmd_deps(&file, &root, cli.json),
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from `warn`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "kiln=info",
        2 => "kiln=debug",
        _ => "kiln=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
