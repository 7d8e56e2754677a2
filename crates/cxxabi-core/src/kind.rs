//! The closed set of C++ ABI kinds.
//!
//! Each kind names a family of object-layout and calling rules. The set is
//! fixed: there is no registration of new kinds at run time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AbiError;

/// The basic C++ ABI kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CxxAbiKind {
    /// The standard ABI of most open-source and Unix-like platforms,
    /// documented at <http://www.codesourcery.com/public/cxx-abi/>.
    #[default]
    #[serde(rename = "generic-itanium")]
    GenericItanium,

    /// ARM's modified Itanium ABI (IHI0041C).
    ///
    /// Member function pointers avoid the Thumb bit, constructors and
    /// destructors return `this`, guard variables are smaller, inline
    /// functions are never key functions, and array cookies differ.
    #[serde(rename = "generic-arm")]
    GenericArm,

    /// A partial implementation of the ARM ABI.
    ///
    /// Takes ARM's member function pointers, guard variables, array cookies
    /// and constructor/destructor signatures, but not the rest.
    #[serde(rename = "ios")]
    Ios,

    /// Follows ARM's published 64-bit ABI (IHI0059A) closely, though not
    /// guaranteed perfectly.
    #[serde(rename = "ios64")]
    Ios64,

    /// The iOS64 ABI ported to 32 bits. RTTI objects must still be unique.
    #[serde(rename = "watchos")]
    WatchOs,

    /// Itanium with ARM-style member function pointers and smaller guard
    /// variables.
    #[serde(rename = "generic-aarch64")]
    GenericAArch64,

    /// Itanium with ARM-style member function pointers.
    #[serde(rename = "generic-mips")]
    GenericMips,

    /// Itanium with ARM-style member pointers, `this`-returning
    /// constructors, 32-bit guard variables on wasm32, no inline key
    /// functions, unaligned member functions, and C++11 POD tail padding.
    ///
    /// Not yet considered stable.
    #[serde(rename = "webassembly")]
    WebAssembly,

    /// Itanium with `this`-returning constructors and destructors.
    #[serde(rename = "fuchsia")]
    Fuchsia,

    /// The ABI used by Microsoft Visual C++ and compatible compilers.
    #[serde(rename = "microsoft")]
    Microsoft,
}

impl CxxAbiKind {
    /// Every kind, in declaration order.
    pub const ALL: [CxxAbiKind; 10] = [
        CxxAbiKind::GenericItanium,
        CxxAbiKind::GenericArm,
        CxxAbiKind::Ios,
        CxxAbiKind::Ios64,
        CxxAbiKind::WatchOs,
        CxxAbiKind::GenericAArch64,
        CxxAbiKind::GenericMips,
        CxxAbiKind::WebAssembly,
        CxxAbiKind::Fuchsia,
        CxxAbiKind::Microsoft,
    ];

    /// Stable kebab-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            CxxAbiKind::GenericItanium => "generic-itanium",
            CxxAbiKind::GenericArm => "generic-arm",
            CxxAbiKind::Ios => "ios",
            CxxAbiKind::Ios64 => "ios64",
            CxxAbiKind::WatchOs => "watchos",
            CxxAbiKind::GenericAArch64 => "generic-aarch64",
            CxxAbiKind::GenericMips => "generic-mips",
            CxxAbiKind::WebAssembly => "webassembly",
            CxxAbiKind::Fuchsia => "fuchsia",
            CxxAbiKind::Microsoft => "microsoft",
        }
    }

    /// One-line description of how this ABI departs from generic Itanium.
    pub fn summary(self) -> &'static str {
        match self {
            CxxAbiKind::GenericItanium => "Standard Itanium C++ ABI (most Unix-like platforms)",
            CxxAbiKind::GenericArm => {
                "ARM C++ ABI: Thumb-safe member pointers, this-returning ctors, small guards"
            }
            CxxAbiKind::Ios => "Partial ARM ABI as shipped with the first iOS compilers",
            CxxAbiKind::Ios64 => "ARM 64-bit C++ ABI as used by iOS, C++11 POD tail padding",
            CxxAbiKind::WatchOs => "iOS64 ABI ported to 32 bits, unique RTTI",
            CxxAbiKind::GenericAArch64 => "AArch64 C++ ABI: ARM member pointers, small guards",
            CxxAbiKind::GenericMips => "Itanium with ARM-style member function pointers",
            CxxAbiKind::WebAssembly => "Itanium variant for wasm, unaligned member functions",
            CxxAbiKind::Fuchsia => "Itanium with this-returning ctors and dtors",
            CxxAbiKind::Microsoft => "Microsoft Visual C++ ABI",
        }
    }
}

impl fmt::Display for CxxAbiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CxxAbiKind {
    type Err = AbiError;

    /// Resolve a kind by name. Matching ignores ASCII case and treats `_`
    /// as `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        CxxAbiKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| AbiError::UnknownKind { name: s.into() })
    }
}
