//! `b2-invoke flags` command

use anyhow::Result;

use super::{load_project_config, load_settings, translator};
use crate::cli::FlagsArgs;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let config = load_project_config()?;
    let settings = load_settings(&args.settings, &config)?;

    let flags = translator(&args.settings, &config).translate(&settings);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&flags)?);
    } else {
        for flag in &flags {
            println!("{}", flag);
        }
    }

    Ok(())
}
