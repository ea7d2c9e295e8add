//! b2-invoke CLI - translate build settings into b2 flags and run b2

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("b2_invoke=debug")
    } else {
        EnvFilter::new("b2_invoke=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Flags(args) => commands::flags::execute(args).map(|_| 0),
        Commands::Build(args) => commands::build::execute(args),
        Commands::Show(args) => commands::show::execute(args).map(|_| 0),
        Commands::Completions(args) => commands::completions::execute(args).map(|_| 0),
    }
}
