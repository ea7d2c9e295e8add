//! Apple platform deployment flags.

use crate::core::Settings;

/// Target passed to both compiler and linker for Mac Catalyst builds.
pub const CATALYST_TARGET: &str = "--target=arm64-apple-ios-macabi";

/// Whether the settings `os` is an Apple platform.
pub fn is_apple_os(settings: &Settings) -> bool {
    matches!(settings.os(), Some("Macos" | "iOS" | "watchOS" | "tvOS"))
}

/// Whether the settings select the Mac Catalyst subsystem.
pub fn is_catalyst(settings: &Settings) -> bool {
    settings.os_subsystem() == Some("catalyst")
}

fn default_sdk(os: &str) -> Option<&'static str> {
    match os {
        "Macos" => Some("macosx"),
        "iOS" => Some("iphoneos"),
        "watchOS" => Some("watchos"),
        "tvOS" => Some("appletvos"),
        _ => None,
    }
}

/// SDK the build targets. Catalyst always builds against the iOS SDK.
pub fn sdk(settings: &Settings) -> Option<&str> {
    if is_catalyst(settings) {
        return Some("iphoneos");
    }
    settings.os_sdk().or_else(|| settings.os().and_then(default_sdk))
}

/// Compiler flag selecting the minimum deployment version, if any.
pub fn min_version_flag(settings: &Settings) -> Option<String> {
    let version = settings.os_version()?;
    let option = match sdk(settings)? {
        "macosx" => "-mmacosx-version-min",
        "iphoneos" => "-mios-version-min",
        "iphonesimulator" => "-mios-simulator-version-min",
        "watchos" => "-mwatchos-version-min",
        "watchsimulator" => "-mwatchos-simulator-version-min",
        "appletvos" => "-mtvos-version-min",
        "appletvsimulator" => "-mtvos-simulator-version-min",
        _ => return None,
    };
    Some(format!("{}={}", option, version))
}
