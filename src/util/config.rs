//! Configuration file support for b2-invoke.
//!
//! Two configuration file locations are read:
//! - Global: `~/.b2-invoke/config.toml` - User-wide defaults
//! - Project: `.b2-invoke/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::PackageDefaults;
use crate::translate::UnmappedPolicy;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".b2-invoke";

/// Tool invoked when no program is configured.
pub const DEFAULT_PROGRAM: &str = "b2";

/// b2-invoke configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Invocation settings
    pub b2: B2Config,

    /// Package defaults for options
    pub defaults: DefaultsConfig,

    /// Run-time environment for the b2 process
    pub env: BTreeMap<String, String>,
}

/// How b2 is invoked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct B2Config {
    /// Program to run (defaults to `b2`)
    pub program: Option<String>,

    /// Arguments placed before any command-line arguments
    pub args: Vec<String>,

    /// Handling of settings with no b2 counterpart
    pub unmapped: Option<UnmappedPolicy>,
}

/// Package-level option defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default for the `shared` option
    pub shared: Option<bool>,

    /// Default for the `fPIC` option
    pub fpic: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.b2.program.is_some() {
            self.b2.program = other.b2.program;
        }
        if !other.b2.args.is_empty() {
            self.b2.args = other.b2.args;
        }
        if other.b2.unmapped.is_some() {
            self.b2.unmapped = other.b2.unmapped;
        }

        if other.defaults.shared.is_some() {
            self.defaults.shared = other.defaults.shared;
        }
        if other.defaults.fpic.is_some() {
            self.defaults.fpic = other.defaults.fpic;
        }

        // Environment merges per variable
        self.env.extend(other.env);
    }

    /// Program to invoke.
    pub fn program(&self) -> &str {
        self.b2.program.as_deref().unwrap_or(DEFAULT_PROGRAM)
    }

    /// Unmapped-value policy.
    pub fn unmapped_policy(&self) -> UnmappedPolicy {
        self.b2.unmapped.unwrap_or_default()
    }

    /// Package defaults for options.
    pub fn package_defaults(&self) -> PackageDefaults {
        PackageDefaults {
            shared: self.defaults.shared.unwrap_or(false),
            fpic: self.defaults.fpic.unwrap_or(false),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.b2-invoke/config.toml)
/// 2. Global config (~/.b2-invoke/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    // Project config overrides global
    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.b2-invoke).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the global config path (~/.b2-invoke/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.b2-invoke/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}
