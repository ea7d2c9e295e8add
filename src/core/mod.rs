//! Core data types.

pub mod settings;

pub use settings::{Options, PackageDefaults, Settings, SettingsError};
