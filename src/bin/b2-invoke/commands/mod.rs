//! Command implementations

pub mod build;
pub mod completions;
pub mod flags;
pub mod show;

use anyhow::{Context, Result};

use crate::cli::SettingsArgs;
use b2_invoke::util::config::{global_config_path, load_config, project_config_path};
use b2_invoke::{Config, FlagTranslator, Settings};

/// Load configuration (global + project).
pub fn load_project_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let global = global_config_path();
    Ok(load_config(global.as_deref(), &project_config_path(&cwd)))
}

/// Build the settings snapshot: profile, then `-s`/`-o` overrides.
pub fn load_settings(args: &SettingsArgs, config: &Config) -> Result<Settings> {
    let mut settings = match args.profile {
        Some(ref path) => Settings::load_profile(path)?,
        None => Settings::new(),
    };

    for pair in &args.settings {
        settings.apply_pair(pair)?;
    }
    for pair in &args.options {
        settings.apply_option_pair(pair)?;
    }

    Ok(settings.with_defaults(config.package_defaults()))
}

/// Translator honoring the unmapped policy (CLI overrides config).
pub fn translator(args: &SettingsArgs, config: &Config) -> FlagTranslator {
    let policy = args.unmapped.unwrap_or_else(|| config.unmapped_policy());
    FlagTranslator::new().with_policy(policy)
}
