//! CLI definitions using clap.

use std::path::PathBuf;

use b2_invoke::UnmappedPolicy;
use clap::{Args, Parser, Subcommand};

/// b2-invoke - translate build settings into b2 flags and run b2
#[derive(Parser)]
#[command(name = "b2-invoke")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the b2 flags for the given settings
    Flags(FlagsArgs),

    /// Invoke b2 with the translated flags
    Build(BuildArgs),

    /// Show the resolved settings snapshot
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings shared by every command that translates flags.
#[derive(Args)]
pub struct SettingsArgs {
    /// TOML profile with [settings] and [options] tables
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Setting override, e.g. `-s compiler.version=11`
    #[arg(short = 's', long = "setting", value_name = "KEY=VALUE")]
    pub settings: Vec<String>,

    /// Option override, e.g. `-o shared=True`
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// How to handle settings with no b2 counterpart (emit, omit)
    #[arg(long)]
    pub unmapped: Option<UnmappedPolicy>,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Print the flags as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Intermediate output build directory
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Program to invoke instead of the configured one
    #[arg(long, value_name = "PROGRAM")]
    pub b2: Option<String>,

    /// Print the command line without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Disable the build step
    #[arg(long)]
    pub skip: bool,

    /// Targets to build, in b2 target syntax
    pub targets: Vec<String>,

    /// Extra arguments passed to b2 before the flags
    #[arg(last = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
