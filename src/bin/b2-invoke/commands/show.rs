//! `b2-invoke show` command

use anyhow::Result;

use super::{load_project_config, load_settings, translator};
use crate::cli::ShowArgs;

pub fn execute(args: ShowArgs) -> Result<()> {
    let config = load_project_config()?;
    let settings = load_settings(&args.settings, &config)?;
    let translator = translator(&args.settings, &config);

    println!("Settings:");
    for line in settings.to_string().lines() {
        println!("  {}", line);
    }

    println!();
    println!("Invocation:");
    println!("  program:  {}", config.program());
    println!("  unmapped: {:?}", translator.policy());
    println!("  rules:    {}", translator.registry().names().collect::<Vec<_>>().join(", "));

    Ok(())
}
