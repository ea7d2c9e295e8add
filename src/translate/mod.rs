//! Settings to b2 flag translation.
//!
//! The translator is a registry of independent [`MappingRule`]s. Each rule
//! reads the settings snapshot and returns the flags for one concern; the
//! translator runs them in registration order and concatenates the results.
//!
//! Translation never fails. A rule that cannot map its input returns an
//! unmapped [`Flag`], which is rendered according to [`UnmappedPolicy`] and
//! left for b2 to reject.

pub mod apple;
pub mod rules;
pub mod tables;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Settings;

/// Literal written in place of a value the tables could not resolve.
pub const UNMAPPED_MARKER: &str = "null";

/// A single b2 command-line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    /// `key=value` feature
    Feature { key: String, value: String },
    /// `key=<marker>` for a value with no b2 counterpart
    Unmapped { key: String },
}

impl Flag {
    pub fn feature(key: impl Into<String>, value: impl Into<String>) -> Self {
        Flag::Feature {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn unmapped(key: impl Into<String>) -> Self {
        Flag::Unmapped { key: key.into() }
    }

    /// Feature when `value` resolved, unmapped otherwise.
    pub fn resolved(key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => Flag::feature(key, value),
            None => Flag::unmapped(key),
        }
    }

    pub fn is_unmapped(&self) -> bool {
        matches!(self, Flag::Unmapped { .. })
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Feature { key, value } => write!(f, "{}={}", key, value),
            Flag::Unmapped { key } => write!(f, "{}={}", key, UNMAPPED_MARKER),
        }
    }
}

/// What to do with flags whose value could not be mapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Emit `key=null` and let b2 reject it.
    #[default]
    Emit,
    /// Drop the flag.
    Omit,
}

impl std::str::FromStr for UnmappedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emit" => Ok(UnmappedPolicy::Emit),
            "omit" => Ok(UnmappedPolicy::Omit),
            _ => Err(format!(
                "invalid unmapped policy '{}'; expected 'emit' or 'omit'",
                s
            )),
        }
    }
}

/// One platform/compiler concern mapped onto b2 flags.
pub trait MappingRule {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Flags for this concern. May be empty.
    fn apply(&self, settings: &Settings) -> Vec<Flag>;
}

/// Ordered list of mapping rules.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn MappingRule>>,
}

impl RuleRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        RuleRegistry { rules: Vec::new() }
    }

    /// Registry with every built-in rule, in b2 command-line order.
    pub fn builtin() -> Self {
        let mut registry = RuleRegistry::new();
        for rule in rules::builtin() {
            registry.register(rule);
        }
        registry
    }

    /// Append a rule. It runs after every rule already registered.
    pub fn register(&mut self, rule: Box<dyn MappingRule>) {
        self.rules.push(rule);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule once, in order.
    pub fn apply(&self, settings: &Settings) -> Vec<Flag> {
        let mut flags = Vec::new();
        for rule in &self.rules {
            let produced = rule.apply(settings);
            tracing::debug!("rule `{}` produced {} flag(s)", rule.name(), produced.len());
            flags.extend(produced);
        }
        flags
    }
}

/// Translates a settings snapshot into b2 flag strings.
pub struct FlagTranslator {
    registry: RuleRegistry,
    policy: UnmappedPolicy,
}

impl FlagTranslator {
    /// Translator with the built-in rules and the default policy.
    pub fn new() -> Self {
        FlagTranslator {
            registry: RuleRegistry::builtin(),
            policy: UnmappedPolicy::default(),
        }
    }

    /// Translator over a custom registry.
    pub fn with_registry(registry: RuleRegistry) -> Self {
        FlagTranslator {
            registry,
            policy: UnmappedPolicy::default(),
        }
    }

    /// Set the unmapped-value policy.
    pub fn with_policy(mut self, policy: UnmappedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append an extra rule after the existing ones.
    pub fn with_rule(mut self, rule: Box<dyn MappingRule>) -> Self {
        self.registry.register(rule);
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn policy(&self) -> UnmappedPolicy {
        self.policy
    }

    /// Ordered flag strings for `settings`.
    pub fn translate(&self, settings: &Settings) -> Vec<String> {
        self.registry
            .apply(settings)
            .into_iter()
            .filter(|flag| match self.policy {
                UnmappedPolicy::Emit => true,
                UnmappedPolicy::Omit => !flag.is_unmapped(),
            })
            .map(|flag| flag.to_string())
            .collect()
    }
}

impl Default for FlagTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Threading;

    impl MappingRule for Threading {
        fn name(&self) -> &str {
            "threading"
        }

        fn apply(&self, settings: &Settings) -> Vec<Flag> {
            match settings.get("compiler.threads") {
                Some("posix") => vec![Flag::feature("threading", "multi")],
                _ => Vec::new(),
            }
        }
    }

    fn linux_gcc() -> Settings {
        Settings::new()
            .with("os", "Linux")
            .with("arch", "x86_64")
            .with("compiler", "gcc")
            .with("compiler.version", "11")
            .with("build_type", "Release")
            .with_shared(false)
            .with_fpic(true)
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(Flag::feature("link", "static").to_string(), "link=static");
        assert_eq!(Flag::unmapped("target-os").to_string(), "target-os=null");
        assert_eq!(
            Flag::resolved("toolset", None::<String>).to_string(),
            "toolset=null"
        );
    }

    #[test]
    fn test_builtin_rule_order() {
        let registry = RuleRegistry::builtin();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "os",
                "address-model",
                "architecture",
                "toolset",
                "variant",
                "cxxstd",
                "cxxstd-dialect",
                "runtime-link",
                "runtime-debugging",
                "stdlib",
                "link",
                "other",
            ]
        );
    }

    #[test]
    fn test_linux_gcc_release() {
        let flags = FlagTranslator::new().translate(&linux_gcc());
        assert_eq!(
            flags,
            vec![
                "target-os=linux",
                "address-model=64",
                "architecture=x86",
                "toolset=gcc-11",
                "variant=release",
                "stdlib=native",
                "link=static",
                "cxxflags=-fPIC",
            ]
        );
    }

    #[test]
    fn test_translation_is_repeatable() {
        let settings = linux_gcc().with("build_type", "Debug");
        let translator = FlagTranslator::new();

        let first = translator.translate(&settings);
        let second = translator.translate(&settings);
        assert_eq!(first, second);
        assert!(first.contains(&"variant=debug".to_string()));
    }

    #[test]
    fn test_unmapped_policy() {
        let settings = Settings::new().with("os", "Haiku").with("arch", "x86");

        let emitted = FlagTranslator::new().translate(&settings);
        assert_eq!(emitted[0], "target-os=null");
        assert!(emitted.contains(&"toolset=null".to_string()));

        let omitted = FlagTranslator::new()
            .with_policy(UnmappedPolicy::Omit)
            .translate(&settings);
        assert!(omitted.iter().all(|f| !f.ends_with("=null")));
        assert_eq!(omitted[0], "address-model=32");
    }

    #[test]
    fn test_custom_rule_appended() {
        let translator = FlagTranslator::new().with_rule(Box::new(Threading));
        let settings = linux_gcc().with("compiler.threads", "posix");

        let flags = translator.translate(&settings);
        assert_eq!(flags.last().map(String::as_str), Some("threading=multi"));
        assert_eq!(translator.registry().len(), 13);
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = RuleRegistry::new();
        assert!(registry.is_empty());
        registry.register(Box::new(Threading));

        let translator = FlagTranslator::with_registry(registry);
        assert!(translator.translate(&linux_gcc()).is_empty());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("emit".parse::<UnmappedPolicy>().unwrap(), UnmappedPolicy::Emit);
        assert_eq!("Omit".parse::<UnmappedPolicy>().unwrap(), UnmappedPolicy::Omit);
        assert!("drop".parse::<UnmappedPolicy>().is_err());
    }
}
