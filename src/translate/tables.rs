//! Fixed value tables mapping settings onto b2 feature values.
//!
//! Every lookup returns `None` when the input has no b2 counterpart. The
//! caller decides whether that becomes an unmapped flag or no flag at all.

use crate::core::Settings;

/// Architectures with a 64-bit address model.
pub const ADDRESS_MODEL_64: &[&str] = &[
    "x86_64", "ppc64", "ppc64le", "mips64", "armv8", "armv8.3", "sparcv9",
];

/// Architecture prefixes. Resolution picks the longest matching prefix.
const ARCHITECTURES: &[(&str, &str)] = &[
    ("arm", "arm"),
    ("mips", "mips1"),
    ("mips64", "mips64"),
    ("ppc", "power"),
    ("s390", "s390x"),
    ("sparc", "sparc"),
    ("x86", "x86"),
];

/// `target-os` value for a settings `os`.
pub fn target_os(os: &str) -> Option<&'static str> {
    let value = match os {
        "AIX" => "aix",
        "Android" => "android",
        "FreeBSD" => "freebsd",
        "iOS" => "iphone",
        "Linux" => "linux",
        "Macos" => "darwin",
        "SunOS" => "solaris",
        "tvOS" => "appletv",
        "watchOS" => "iphone",
        "Windows" | "WindowsStore" | "WindowsCE" => "windows",
        _ => return None,
    };
    Some(value)
}

/// `address-model` value. Unknown or unset architectures are 32-bit.
pub fn address_model(arch: Option<&str>) -> &'static str {
    match arch {
        Some(arch) if ADDRESS_MODEL_64.contains(&arch) => "64",
        _ => "32",
    }
}

/// `architecture` value, by longest matching prefix.
pub fn architecture(arch: &str) -> Option<&'static str> {
    ARCHITECTURES
        .iter()
        .filter(|(prefix, _)| arch.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(_, value)| *value)
}

/// b2 toolset family for a compiler family name.
pub fn toolset_family(compiler: &str) -> Option<&'static str> {
    let value = match compiler {
        "apple-clang" | "clang" => "clang",
        "gcc" => "gcc",
        "sun-cc" => "sun",
        "Visual Studio" | "msvc" => "msvc",
        _ => return None,
    };
    Some(value)
}

/// Legacy Visual Studio IDE version to MSVC toolset version.
pub fn visual_studio_toolset(version: &str) -> Option<&'static str> {
    let value = match version {
        "8" => "8.0",
        "9" => "9.0",
        "10" => "10.0",
        "11" => "11.0",
        "12" => "12.0",
        "14" => "14.0",
        "15" => "14.1",
        "16" => "14.2",
        "17" => "14.3",
        _ => return None,
    };
    Some(value)
}

/// MSVC compiler version code to MSVC toolset version.
pub fn msvc_toolset(version: &str) -> Option<&'static str> {
    let value = match version {
        "140" => "8.0",
        "150" => "9.0",
        "160" => "10.0",
        "170" => "11.0",
        "180" => "12.0",
        "190" => "14.0",
        "191" => "14.1",
        "192" => "14.2",
        "193" => "14.3",
        _ => return None,
    };
    Some(value)
}

/// Toolset version derived from the compiler family and version.
pub fn toolset_version(settings: &Settings) -> Option<String> {
    let version = settings.compiler_version()?;
    match settings.compiler() {
        Some("Visual Studio") => visual_studio_toolset(version).map(str::to_string),
        Some("msvc") => msvc_toolset(version).map(str::to_string),
        Some("apple-clang") => version.split('.').next().map(str::to_string),
        _ => Some(version.to_string()),
    }
}

/// Full `<family>-<version>` toolset. Unmapped when either half is.
pub fn toolset(settings: &Settings) -> Option<String> {
    let family = toolset_family(settings.compiler()?)?;
    let version = toolset_version(settings)?;
    Some(format!("{}-{}", family, version))
}

/// Whether the resolved toolset is MSVC.
pub fn is_msvc(settings: &Settings) -> bool {
    settings.compiler().and_then(toolset_family) == Some("msvc")
}

/// Build variant derived from `build_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Debug,
    Release,
    MinSizeRel,
    RelWithDebInfo,
}

impl Variant {
    /// Unset or unknown build types fall back to debug.
    pub fn from_build_type(build_type: Option<&str>) -> Self {
        match build_type {
            Some("Release") => Variant::Release,
            Some("MinSizeRel") => Variant::MinSizeRel,
            Some("RelWithDebInfo") => Variant::RelWithDebInfo,
            _ => Variant::Debug,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Debug => "debug",
            Variant::Release => "release",
            Variant::MinSizeRel => "minsizerel",
            Variant::RelWithDebInfo => "relwithdebinfo",
        }
    }
}

/// `stdlib` value. Unset or unknown libraries use the native one.
pub fn stdlib(libcxx: Option<&str>) -> &'static str {
    match libcxx {
        Some("libstdc++") => "gnu",
        Some("libstdc++11") => "gnu11",
        Some("libc++") => "libc++",
        Some("libstlport") => "sun-stlport",
        _ => "native",
    }
}
