//! b2-invoke - translate build settings into Boost.Build flags and run `b2`
//!
//! This crate provides the flag translator, the `b2` invoker and the
//! configuration layer used by the `b2-invoke` binary.

pub mod core;
pub mod invoke;
pub mod translate;
pub mod util;

/// Test utilities for b2-invoke unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{Options, PackageDefaults, Settings, SettingsError};
pub use invoke::{B2Invoker, BuildRequest, CommandRunner, SystemRunner, Targets};
pub use translate::{Flag, FlagTranslator, MappingRule, RuleRegistry, UnmappedPolicy};
pub use util::Config;
