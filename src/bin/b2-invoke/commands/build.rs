//! `b2-invoke build` command

use anyhow::Result;

use super::{load_project_config, load_settings, translator};
use crate::cli::BuildArgs;
use b2_invoke::util::process::quote_command;
use b2_invoke::{B2Invoker, BuildRequest};

/// Returns the exit code b2-invoke should exit with.
pub fn execute(args: BuildArgs) -> Result<i32> {
    let config = load_project_config()?;
    let settings = load_settings(&args.settings, &config)?;

    let program = args.b2.as_deref().unwrap_or_else(|| config.program());
    let invoker = B2Invoker::new(&translator(&args.settings, &config), &settings)
        .with_program(program)
        .with_env(config.env.clone())
        .with_gate(!args.skip);

    // Configured args come first, then CLI args
    let mut request = BuildRequest::new()
        .args(config.b2.args.iter().cloned())
        .args(args.args)
        .targets(args.targets);
    if let Some(dir) = args.build_dir {
        request = request.build_dir(dir);
    }

    if args.dry_run {
        println!("{}", quote_command(&invoker.command_line(&request)));
        return Ok(0);
    }

    match invoker.build(&request)? {
        Some(status) => Ok(status.code().unwrap_or(1)),
        None => Ok(0),
    }
}
