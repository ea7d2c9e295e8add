//! Platform and compiler settings snapshot.
//!
//! Settings use the dotted key grammar of package-manager profiles
//! (`os`, `os.version`, `compiler.version`, `compiler.libcxx`, ...). Any key
//! is accepted and stored; the typed accessors below cover the keys the
//! flag translator reads. Absent keys resolve to `None`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error while building a settings snapshot from user input.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid setting `{0}`: expected `key=value`")]
    InvalidPair(String),

    #[error("invalid value `{value}` for option `{option}`: expected a boolean")]
    InvalidBool { option: String, value: String },

    #[error("unknown option `{0}`: expected `shared` or `fPIC`")]
    UnknownOption(String),

    #[error("failed to read profile {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "setting `{key}` in profile {} is a decimal number; quote it as a string to keep every digit",
        .path.display()
    )]
    UnquotedDecimal { key: String, path: PathBuf },

    #[error("failed to parse profile {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Package-level defaults for options that were not explicitly set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageDefaults {
    pub shared: bool,
    pub fpic: bool,
}

/// Build options with a package default fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Explicit `shared` override
    pub shared: Option<bool>,
    /// Explicit `fPIC` override
    pub fpic: Option<bool>,
    /// Fallbacks used when no override is present
    pub defaults: PackageDefaults,
}

impl Options {
    /// Effective `shared` value.
    pub fn shared(&self) -> bool {
        self.shared.unwrap_or(self.defaults.shared)
    }

    /// Effective `fPIC` value.
    pub fn fpic(&self) -> bool {
        self.fpic.unwrap_or(self.defaults.fpic)
    }

    /// Set an option from its textual form.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
        let parsed = parse_bool(name, value)?;
        match name {
            "shared" => self.shared = Some(parsed),
            "fPIC" | "fpic" => self.fpic = Some(parsed),
            _ => return Err(SettingsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(option: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidBool {
            option: option.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Immutable snapshot of the target platform and compiler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
    options: Options,
}

impl Settings {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Set a value, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set the `shared` option, builder style.
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.options.shared = Some(shared);
        self
    }

    /// Set the `fPIC` option, builder style.
    pub fn with_fpic(mut self, fpic: bool) -> Self {
        self.options.fpic = Some(fpic);
        self
    }

    /// Replace the package defaults, builder style.
    pub fn with_defaults(mut self, defaults: PackageDefaults) -> Self {
        self.options.defaults = defaults;
        self
    }

    /// Set a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Apply a `key=value` setting override.
    pub fn apply_pair(&mut self, pair: &str) -> Result<(), SettingsError> {
        let (key, value) = split_pair(pair)?;
        self.set(key, value);
        Ok(())
    }

    /// Apply a `name=value` option override.
    pub fn apply_option_pair(&mut self, pair: &str) -> Result<(), SettingsError> {
        let (name, value) = split_pair(pair)?;
        self.options.set(name, value)
    }

    /// Look up any setting by its dotted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn os(&self) -> Option<&str> {
        self.get("os")
    }

    pub fn os_version(&self) -> Option<&str> {
        self.get("os.version")
    }

    pub fn os_sdk(&self) -> Option<&str> {
        self.get("os.sdk")
    }

    pub fn os_subsystem(&self) -> Option<&str> {
        self.get("os.subsystem")
    }

    pub fn arch(&self) -> Option<&str> {
        self.get("arch")
    }

    /// Compiler family name (`gcc`, `msvc`, `Visual Studio`, ...).
    pub fn compiler(&self) -> Option<&str> {
        self.get("compiler")
    }

    pub fn compiler_version(&self) -> Option<&str> {
        self.get("compiler.version")
    }

    pub fn cppstd(&self) -> Option<&str> {
        self.get("compiler.cppstd")
    }

    pub fn libcxx(&self) -> Option<&str> {
        self.get("compiler.libcxx")
    }

    pub fn runtime(&self) -> Option<&str> {
        self.get("compiler.runtime")
    }

    pub fn build_type(&self) -> Option<&str> {
        self.get("build_type")
    }

    /// Load a snapshot from a TOML profile.
    ///
    /// ```toml
    /// [settings]
    /// os = "Linux"
    /// "compiler.version" = "11"
    ///
    /// [options]
    /// shared = false
    /// fPIC = true
    /// ```
    pub fn load_profile(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let profile: Profile = toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        profile.into_settings(path)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.values {
            writeln!(f, "{}={}", key, value)?;
        }
        writeln!(f, "shared={}", self.options.shared())?;
        write!(f, "fPIC={}", self.options.fpic())
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str), SettingsError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(SettingsError::InvalidPair(pair.to_string())),
    }
}

/// On-disk profile layout.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Profile {
    settings: BTreeMap<String, ProfileValue>,
    options: BTreeMap<String, ProfileValue>,
}

/// Profile values may be written as TOML strings, integers or booleans.
///
/// Decimal numbers are parsed so they can be rejected: TOML reads them as
/// floats, which turns `10.10` into `10.1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ProfileValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ProfileValue {
    fn into_text(self, key: &str, path: &Path) -> Result<String, SettingsError> {
        match self {
            ProfileValue::Bool(b) => Ok(b.to_string()),
            ProfileValue::Integer(i) => Ok(i.to_string()),
            ProfileValue::Float(_) => Err(SettingsError::UnquotedDecimal {
                key: key.to_string(),
                path: path.to_path_buf(),
            }),
            ProfileValue::Text(s) => Ok(s),
        }
    }
}

impl Profile {
    fn into_settings(self, path: &Path) -> Result<Settings, SettingsError> {
        let mut settings = Settings::new();
        for (key, value) in self.settings {
            let value = value.into_text(&key, path)?;
            settings.set(key, value);
        }
        for (name, value) in self.options {
            let value = value.into_text(&name, path)?;
            settings.options.set(&name, &value)?;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_values_are_none() {
        let settings = Settings::new();
        assert!(settings.os().is_none());
        assert!(settings.compiler_version().is_none());
        assert!(settings.get("compiler.threads").is_none());
    }

    #[test]
    fn test_apply_pair() {
        let mut settings = Settings::new();
        settings.apply_pair("compiler.version=11").unwrap();
        settings.apply_pair(" os = Linux ").unwrap();

        assert_eq!(settings.compiler_version(), Some("11"));
        assert_eq!(settings.os(), Some("Linux"));
        assert!(settings.apply_pair("no-equals").is_err());
        assert!(settings.apply_pair("=value").is_err());
    }

    #[test]
    fn test_option_defaults() {
        let settings = Settings::new().with_defaults(PackageDefaults {
            shared: true,
            fpic: false,
        });
        assert!(settings.options().shared());
        assert!(!settings.options().fpic());

        let settings = settings.with_shared(false).with_fpic(true);
        assert!(!settings.options().shared());
        assert!(settings.options().fpic());
    }

    #[test]
    fn test_option_pairs() {
        let mut settings = Settings::new();
        settings.apply_option_pair("shared=True").unwrap();
        settings.apply_option_pair("fPIC=0").unwrap();

        assert_eq!(settings.options().shared, Some(true));
        assert_eq!(settings.options().fpic, Some(false));

        assert!(matches!(
            settings.apply_option_pair("shared=maybe"),
            Err(SettingsError::InvalidBool { .. })
        ));
        assert!(matches!(
            settings.apply_option_pair("header_only=True"),
            Err(SettingsError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_load_profile() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("linux-gcc.toml");

        std::fs::write(
            &path,
            r#"
[settings]
os = "Linux"
arch = "x86_64"
compiler = "gcc"
"compiler.version" = 11
"compiler.libcxx" = "libstdc++11"
build_type = "Release"

[options]
shared = false
fPIC = "True"
"#,
        )
        .unwrap();

        let settings = Settings::load_profile(&path).unwrap();
        assert_eq!(settings.os(), Some("Linux"));
        assert_eq!(settings.compiler_version(), Some("11"));
        assert_eq!(settings.libcxx(), Some("libstdc++11"));
        assert_eq!(settings.options().shared, Some(false));
        assert_eq!(settings.options().fpic, Some(true));
    }

    #[test]
    fn test_load_profile_rejects_unquoted_decimal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("macos.toml");
        std::fs::write(&path, "[settings]\nos = \"Macos\"\n\"os.version\" = 10.10\n").unwrap();

        let err = Settings::load_profile(&path).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::UnquotedDecimal { ref key, .. } if key == "os.version"
        ));
        assert!(err.to_string().contains("quote it"));
    }

    #[test]
    fn test_load_profile_keeps_quoted_decimal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("macos.toml");
        std::fs::write(
            &path,
            "[settings]\n\"os.version\" = \"10.10\"\n\"compiler.version\" = \"4.10\"\n",
        )
        .unwrap();

        let settings = Settings::load_profile(&path).unwrap();
        assert_eq!(settings.os_version(), Some("10.10"));
        assert_eq!(settings.compiler_version(), Some("4.10"));
    }

    #[test]
    fn test_load_profile_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Settings::load_profile(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn test_display() {
        let settings = Settings::new().with("os", "Linux").with_fpic(true);
        let text = settings.to_string();
        assert!(text.contains("os=Linux"));
        assert!(text.contains("shared=false"));
        assert!(text.contains("fPIC=true"));
    }
}
