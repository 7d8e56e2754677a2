//! The ABI descriptor value.
//!
//! Passed by value through layout, vtable, and mangling code. Every query
//! is a pure function of the held kind.

use serde::{Deserialize, Serialize};

use crate::kind::CxxAbiKind;
use crate::tail_padding::TailPaddingUseRules;

/// The target C++ ABI.
///
/// Kept to a single `Copy` field so it stays cheap to pass around. The
/// default is generic Itanium, standing in for an ABI not yet resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetCxxAbi {
    kind: CxxAbiKind,
}

impl From<CxxAbiKind> for TargetCxxAbi {
    fn from(kind: CxxAbiKind) -> Self {
        Self::new(kind)
    }
}

impl TargetCxxAbi {
    pub fn new(kind: CxxAbiKind) -> Self {
        Self { kind }
    }

    /// Replace the held kind.
    pub fn set(&mut self, kind: CxxAbiKind) {
        self.kind = kind;
    }

    pub fn kind(&self) -> CxxAbiKind {
        self.kind
    }

    /// Does this ABI generally fall into the Itanium family of ABIs?
    pub fn is_itanium_family(&self) -> bool {
        match self.kind {
            CxxAbiKind::Fuchsia
            | CxxAbiKind::GenericAArch64
            | CxxAbiKind::GenericItanium
            | CxxAbiKind::GenericArm
            | CxxAbiKind::Ios
            | CxxAbiKind::Ios64
            | CxxAbiKind::WatchOs
            | CxxAbiKind::GenericMips
            | CxxAbiKind::WebAssembly => true,

            CxxAbiKind::Microsoft => false,
        }
    }

    /// Is this ABI an MSVC-compatible ABI?
    pub fn is_microsoft(&self) -> bool {
        match self.kind {
            CxxAbiKind::Fuchsia
            | CxxAbiKind::GenericAArch64
            | CxxAbiKind::GenericItanium
            | CxxAbiKind::GenericArm
            | CxxAbiKind::Ios
            | CxxAbiKind::Ios64
            | CxxAbiKind::WatchOs
            | CxxAbiKind::GenericMips
            | CxxAbiKind::WebAssembly => false,

            CxxAbiKind::Microsoft => true,
        }
    }

    /// Are member functions specially aligned?
    ///
    /// Many Itanium-style ABIs align member functions so that the least
    /// significant bit of a function pointer is zero, letting member
    /// function pointers use that bit to tell virtual from non-virtual
    /// functions. ABIs that discriminate some other way don't need it.
    pub fn are_member_functions_aligned(&self) -> bool {
        match self.kind {
            CxxAbiKind::WebAssembly => false,

            // ARM-style member pointers keep the discriminator in the this
            // adjustment, so these could also drop the alignment.
            CxxAbiKind::Fuchsia
            | CxxAbiKind::GenericArm
            | CxxAbiKind::GenericAArch64
            | CxxAbiKind::GenericMips
            | CxxAbiKind::GenericItanium
            | CxxAbiKind::Ios
            | CxxAbiKind::Ios64
            | CxxAbiKind::WatchOs
            | CxxAbiKind::Microsoft => true,
        }
    }

    /// Are arguments to a call destroyed left to right in the callee?
    ///
    /// When true, objects passed by value do not live to the end of the
    /// full expression, and both caller and callee need access to the
    /// destructor. Temporaries bound to const references are unaffected.
    pub fn are_args_destroyed_left_to_right_in_callee(&self) -> bool {
        self.is_microsoft()
    }

    /// Does this ABI have separate complete-object and base-subobject
    /// constructor entry points?
    pub fn has_constructor_variants(&self) -> bool {
        self.is_itanium_family()
    }

    /// Can a virtual base be a primary base class?
    pub fn has_primary_vbases(&self) -> bool {
        self.is_itanium_family()
    }

    /// Does this ABI use key functions?
    ///
    /// If so, class data such as the vtable is emitted with strong linkage
    /// by the translation unit that defines the key function.
    pub fn has_key_functions(&self) -> bool {
        self.is_itanium_family()
    }

    /// Can an out-of-line inline function serve as a key function?
    ///
    /// Only meaningful where type data is emitted alongside a key virtual
    /// function. The usual choice is the first virtual function not defined
    /// in the class body; if that function is defined inline, the data has
    /// to be emitted weakly everywhere.
    ///
    /// ARM observed that an inline virtual function must be defined in every
    /// TU that defines the class, so it never needs to be a key function.
    /// Acting on that can mix weak and strong definitions of the same type
    /// data, so it takes an ABI break and generic Itanium can't adopt it.
    pub fn can_key_function_be_inline(&self) -> bool {
        match self.kind {
            CxxAbiKind::Fuchsia
            | CxxAbiKind::GenericArm
            | CxxAbiKind::Ios64
            | CxxAbiKind::WebAssembly
            | CxxAbiKind::WatchOs => false,

            CxxAbiKind::GenericAArch64
            | CxxAbiKind::GenericItanium
            // old iOS compilers did not follow the ARM rule
            | CxxAbiKind::Ios
            | CxxAbiKind::Microsoft
            | CxxAbiKind::GenericMips => true,
        }
    }

    /// When may record layout allocate objects in the tail padding of a
    /// base class?
    ///
    /// Frozen per kind: changing an existing answer breaks binary
    /// compatibility with already-compiled code.
    pub fn tail_padding_use_rules(&self) -> TailPaddingUseRules {
        match self.kind {
            // Generic Itanium locked POD to the C++ TR1 rules, and the
            // derived ABIs inherited that.
            CxxAbiKind::GenericItanium
            | CxxAbiKind::GenericAArch64
            | CxxAbiKind::GenericArm
            | CxxAbiKind::Ios
            | CxxAbiKind::GenericMips => TailPaddingUseRules::UseTailPaddingUnlessPod03,

            // C++11 POD rules, without the Itanium exception for classes
            // with over-large bitfields.
            CxxAbiKind::Fuchsia
            | CxxAbiKind::Ios64
            | CxxAbiKind::WebAssembly
            | CxxAbiKind::WatchOs => TailPaddingUseRules::UseTailPaddingUnlessPod11,

            // MSVC uses base tail padding even for POD bases.
            CxxAbiKind::Microsoft => TailPaddingUseRules::AlwaysUseTailPadding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> impl Iterator<Item = TargetCxxAbi> {
        CxxAbiKind::ALL.into_iter().map(TargetCxxAbi::new)
    }

    #[test]
    fn default_is_generic_itanium() {
        assert_eq!(TargetCxxAbi::default(), TargetCxxAbi::new(CxxAbiKind::GenericItanium));
        assert_eq!(TargetCxxAbi::default().kind(), CxxAbiKind::GenericItanium);
    }

    #[test]
    fn set_then_kind_round_trips() {
        let mut abi = TargetCxxAbi::default();
        for kind in CxxAbiKind::ALL {
            abi.set(kind);
            assert_eq!(abi.kind(), kind);
            assert_eq!(abi, TargetCxxAbi::from(kind));
        }
    }

    #[test]
    fn equality_is_structural() {
        for a in CxxAbiKind::ALL {
            for b in CxxAbiKind::ALL {
                let (x, y) = (TargetCxxAbi::new(a), TargetCxxAbi::new(b));
                assert_eq!(x == y, a == b);
                assert_eq!(x != y, a != b);
                assert_eq!(y == x, x == y);
            }
            assert_eq!(TargetCxxAbi::new(a), TargetCxxAbi::new(a));
        }
    }

    #[test]
    fn exactly_one_family() {
        for abi in all() {
            assert_eq!(abi.is_itanium_family(), !abi.is_microsoft(), "{}", abi.kind());
        }
        assert!(TargetCxxAbi::new(CxxAbiKind::Microsoft).is_microsoft());
        assert_eq!(all().filter(|a| a.is_microsoft()).count(), 1);
    }

    #[test]
    fn callee_destroys_args_only_on_microsoft() {
        for abi in all() {
            assert_eq!(abi.are_args_destroyed_left_to_right_in_callee(), abi.is_microsoft());
        }
    }

    #[test]
    fn itanium_structural_features_follow_family() {
        for abi in all() {
            let itanium = abi.is_itanium_family();
            assert_eq!(abi.has_constructor_variants(), itanium);
            assert_eq!(abi.has_primary_vbases(), itanium);
            assert_eq!(abi.has_key_functions(), itanium);
        }
    }

    #[test]
    fn member_functions_unaligned_only_on_wasm() {
        for abi in all() {
            assert_eq!(
                abi.are_member_functions_aligned(),
                abi.kind() != CxxAbiKind::WebAssembly,
                "{}",
                abi.kind()
            );
        }
    }

    #[test]
    fn inline_key_function_table() {
        use CxxAbiKind::*;
        let expected = [
            (GenericItanium, true),
            (GenericArm, false),
            (Ios, true),
            (Ios64, false),
            (WatchOs, false),
            (GenericAArch64, true),
            (GenericMips, true),
            (WebAssembly, false),
            (Fuchsia, false),
            (Microsoft, true),
        ];
        for (kind, inline) in expected {
            assert_eq!(TargetCxxAbi::new(kind).can_key_function_be_inline(), inline, "{kind}");
        }
    }

    #[test]
    fn tail_padding_table() {
        use CxxAbiKind::*;
        use TailPaddingUseRules::*;
        let expected = [
            (GenericItanium, UseTailPaddingUnlessPod03),
            (GenericArm, UseTailPaddingUnlessPod03),
            (Ios, UseTailPaddingUnlessPod03),
            (Ios64, UseTailPaddingUnlessPod11),
            (WatchOs, UseTailPaddingUnlessPod11),
            (GenericAArch64, UseTailPaddingUnlessPod03),
            (GenericMips, UseTailPaddingUnlessPod03),
            (WebAssembly, UseTailPaddingUnlessPod11),
            (Fuchsia, UseTailPaddingUnlessPod11),
            (Microsoft, AlwaysUseTailPadding),
        ];
        for (kind, rule) in expected {
            assert_eq!(TargetCxxAbi::new(kind).tail_padding_use_rules(), rule, "{kind}");
        }
    }

    #[test]
    fn descriptor_is_a_plain_value() {
        fn assert_traits<T: Copy + Send + Sync + 'static>() {}
        assert_traits::<TargetCxxAbi>();
        assert_eq!(
            std::mem::size_of::<TargetCxxAbi>(),
            std::mem::size_of::<CxxAbiKind>()
        );
    }

    #[test]
    fn serializes_as_kind_name() {
        let abi = TargetCxxAbi::new(CxxAbiKind::GenericAArch64);
        assert_eq!(serde_json::to_string(&abi).unwrap(), "\"generic-aarch64\"");
    }
}
