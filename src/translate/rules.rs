//! Built-in mapping rules, one per b2 feature.

use crate::core::Settings;

use super::apple;
use super::tables::{self, Variant};
use super::{Flag, MappingRule};

/// Built-in rules in the order b2 expects their flags.
pub fn builtin() -> Vec<Box<dyn MappingRule>> {
    vec![
        Box::new(TargetOs),
        Box::new(AddressModel),
        Box::new(Architecture),
        Box::new(Toolset),
        Box::new(BuildVariant),
        Box::new(CxxStd),
        Box::new(CxxStdDialect),
        Box::new(RuntimeLink),
        Box::new(RuntimeDebugging),
        Box::new(StdLib),
        Box::new(Link),
        Box::new(OtherFlags),
    ]
}

/// `target-os=<os>`
pub struct TargetOs;

impl MappingRule for TargetOs {
    fn name(&self) -> &str {
        "os"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        let value = settings.os().and_then(tables::target_os);
        vec![Flag::resolved("target-os", value)]
    }
}

/// `address-model=32|64`
pub struct AddressModel;

impl MappingRule for AddressModel {
    fn name(&self) -> &str {
        "address-model"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        vec![Flag::feature(
            "address-model",
            tables::address_model(settings.arch()),
        )]
    }
}

/// `architecture=<family>`, only when the architecture is recognized.
pub struct Architecture;

impl MappingRule for Architecture {
    fn name(&self) -> &str {
        "architecture"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        settings
            .arch()
            .and_then(tables::architecture)
            .map(|value| Flag::feature("architecture", value))
            .into_iter()
            .collect()
    }
}

/// `toolset=<family>-<version>`
pub struct Toolset;

impl MappingRule for Toolset {
    fn name(&self) -> &str {
        "toolset"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        vec![Flag::resolved("toolset", tables::toolset(settings))]
    }
}

/// `variant=debug|release`, or an optimization bundle for the size and
/// debug-info release flavours b2 has no variant for.
pub struct BuildVariant;

impl BuildVariant {
    fn optimized(optimization: &str) -> Vec<Flag> {
        vec![
            Flag::feature("optimization", optimization),
            Flag::feature("debug-symbols", "off"),
            Flag::feature("inlining", "full"),
            Flag::feature("runtime-debugging", "off"),
        ]
    }
}

impl MappingRule for BuildVariant {
    fn name(&self) -> &str {
        "variant"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        let variant = Variant::from_build_type(settings.build_type());
        match variant {
            Variant::Debug | Variant::Release => vec![Flag::feature("variant", variant.as_str())],
            Variant::MinSizeRel => Self::optimized("space"),
            Variant::RelWithDebInfo => Self::optimized("speed"),
        }
    }
}

const GNU_DIALECT: &str = "gnu";

/// `cxxstd=<standard>` with any GNU prefix removed.
pub struct CxxStd;

impl MappingRule for CxxStd {
    fn name(&self) -> &str {
        "cxxstd"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        let Some(std) = settings.cppstd() else {
            return Vec::new();
        };
        let std = std.strip_prefix(GNU_DIALECT).unwrap_or(std);
        if std.is_empty() {
            return Vec::new();
        }
        vec![Flag::feature("cxxstd", std)]
    }
}

/// `cxxstd-dialect=gnu` for GNU extension standards.
pub struct CxxStdDialect;

impl MappingRule for CxxStdDialect {
    fn name(&self) -> &str {
        "cxxstd-dialect"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        match settings.cppstd() {
            Some(std) if std.starts_with(GNU_DIALECT) => {
                vec![Flag::feature("cxxstd-dialect", GNU_DIALECT)]
            }
            _ => Vec::new(),
        }
    }
}

/// `runtime-link=static|shared` for MSVC toolsets.
pub struct RuntimeLink;

impl MappingRule for RuntimeLink {
    fn name(&self) -> &str {
        "runtime-link"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        if !tables::is_msvc(settings) {
            return Vec::new();
        }
        let runtime = settings.runtime().unwrap_or_default();
        let link = if runtime.contains("MT") { "static" } else { "shared" };
        vec![Flag::feature("runtime-link", link)]
    }
}

/// `runtime-debugging=on|off` for MSVC toolsets.
pub struct RuntimeDebugging;

impl MappingRule for RuntimeDebugging {
    fn name(&self) -> &str {
        "runtime-debugging"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        if !tables::is_msvc(settings) {
            return Vec::new();
        }
        let runtime = settings.runtime().unwrap_or_default();
        let debugging = if runtime.contains('d') { "on" } else { "off" };
        vec![Flag::feature("runtime-debugging", debugging)]
    }
}

/// `stdlib=<library>`
pub struct StdLib;

impl MappingRule for StdLib {
    fn name(&self) -> &str {
        "stdlib"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        vec![Flag::feature("stdlib", tables::stdlib(settings.libcxx()))]
    }
}

/// `link=shared|static`
pub struct Link;

impl MappingRule for Link {
    fn name(&self) -> &str {
        "link"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        let link = if settings.options().shared() {
            "shared"
        } else {
            "static"
        };
        vec![Flag::feature("link", link)]
    }
}

/// Raw compiler and linker flags: Apple deployment target, Catalyst
/// target triple and PIC.
pub struct OtherFlags;

impl MappingRule for OtherFlags {
    fn name(&self) -> &str {
        "other"
    }

    fn apply(&self, settings: &Settings) -> Vec<Flag> {
        let mut cxxflags = Vec::new();
        let mut linkflags = Vec::new();

        if apple::is_apple_os(settings) && settings.os_version().is_some() {
            cxxflags.extend(apple::min_version_flag(settings));
            if apple::is_catalyst(settings) {
                cxxflags.push(apple::CATALYST_TARGET.to_string());
                linkflags.push(apple::CATALYST_TARGET.to_string());
            }
        }

        if settings.options().fpic() {
            cxxflags.push("-fPIC".to_string());
        }

        cxxflags
            .into_iter()
            .map(|f| Flag::feature("cxxflags", f))
            .chain(linkflags.into_iter().map(|f| Flag::feature("linkflags", f)))
            .collect()
    }
}
