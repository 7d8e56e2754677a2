//! Snapshot of every derived ABI fact.
//!
//! Used where the facts need to leave the process (reports, profile files)
//! or be compared by key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::abi::TargetCxxAbi;
use crate::error::AbiError;
use crate::kind::CxxAbiKind;
use crate::tail_padding::TailPaddingUseRules;

/// A boolean ABI fact, addressable by a stable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbiProperty {
    ItaniumFamily,
    Microsoft,
    MemberFunctionsAligned,
    ArgsDestroyedLeftToRightInCallee,
    ConstructorVariants,
    #[serde(rename = "primary-vbases")]
    PrimaryVBases,
    KeyFunctions,
    KeyFunctionCanBeInline,
}

impl AbiProperty {
    pub const ALL: [AbiProperty; 8] = [
        AbiProperty::ItaniumFamily,
        AbiProperty::Microsoft,
        AbiProperty::MemberFunctionsAligned,
        AbiProperty::ArgsDestroyedLeftToRightInCallee,
        AbiProperty::ConstructorVariants,
        AbiProperty::PrimaryVBases,
        AbiProperty::KeyFunctions,
        AbiProperty::KeyFunctionCanBeInline,
    ];

    /// Stable kebab-case key, matching the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            AbiProperty::ItaniumFamily => "itanium-family",
            AbiProperty::Microsoft => "microsoft",
            AbiProperty::MemberFunctionsAligned => "member-functions-aligned",
            AbiProperty::ArgsDestroyedLeftToRightInCallee => {
                "args-destroyed-left-to-right-in-callee"
            }
            AbiProperty::ConstructorVariants => "constructor-variants",
            AbiProperty::PrimaryVBases => "primary-vbases",
            AbiProperty::KeyFunctions => "key-functions",
            AbiProperty::KeyFunctionCanBeInline => "key-function-can-be-inline",
        }
    }

    /// Evaluate this fact for `abi`.
    pub fn eval(self, abi: &TargetCxxAbi) -> bool {
        match self {
            AbiProperty::ItaniumFamily => abi.is_itanium_family(),
            AbiProperty::Microsoft => abi.is_microsoft(),
            AbiProperty::MemberFunctionsAligned => abi.are_member_functions_aligned(),
            AbiProperty::ArgsDestroyedLeftToRightInCallee => {
                abi.are_args_destroyed_left_to_right_in_callee()
            }
            AbiProperty::ConstructorVariants => abi.has_constructor_variants(),
            AbiProperty::PrimaryVBases => abi.has_primary_vbases(),
            AbiProperty::KeyFunctions => abi.has_key_functions(),
            AbiProperty::KeyFunctionCanBeInline => abi.can_key_function_be_inline(),
        }
    }
}

impl fmt::Display for AbiProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AbiProperty {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AbiProperty::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| AbiError::UnknownProperty { name: s.into() })
    }
}

/// All derived facts of one ABI kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AbiProperties {
    pub kind: CxxAbiKind,
    pub itanium_family: bool,
    pub microsoft: bool,
    pub member_functions_aligned: bool,
    pub args_destroyed_left_to_right_in_callee: bool,
    pub constructor_variants: bool,
    #[serde(rename = "primary-vbases")]
    pub primary_vbases: bool,
    pub key_functions: bool,
    pub key_function_can_be_inline: bool,
    pub tail_padding: TailPaddingUseRules,
}

impl AbiProperties {
    /// Look up a boolean fact by key.
    pub fn get(&self, property: AbiProperty) -> bool {
        match property {
            AbiProperty::ItaniumFamily => self.itanium_family,
            AbiProperty::Microsoft => self.microsoft,
            AbiProperty::MemberFunctionsAligned => self.member_functions_aligned,
            AbiProperty::ArgsDestroyedLeftToRightInCallee => {
                self.args_destroyed_left_to_right_in_callee
            }
            AbiProperty::ConstructorVariants => self.constructor_variants,
            AbiProperty::PrimaryVBases => self.primary_vbases,
            AbiProperty::KeyFunctions => self.key_functions,
            AbiProperty::KeyFunctionCanBeInline => self.key_function_can_be_inline,
        }
    }

    /// Iterate over `(property, value)` pairs in [`AbiProperty::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (AbiProperty, bool)> + '_ {
        AbiProperty::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

impl TargetCxxAbi {
    /// Snapshot every derived fact of this ABI.
    pub fn properties(&self) -> AbiProperties {
        AbiProperties {
            kind: self.kind(),
            itanium_family: self.is_itanium_family(),
            microsoft: self.is_microsoft(),
            member_functions_aligned: self.are_member_functions_aligned(),
            args_destroyed_left_to_right_in_callee: self
                .are_args_destroyed_left_to_right_in_callee(),
            constructor_variants: self.has_constructor_variants(),
            primary_vbases: self.has_primary_vbases(),
            key_functions: self.has_key_functions(),
            key_function_can_be_inline: self.can_key_function_be_inline(),
            tail_padding: self.tail_padding_use_rules(),
        }
    }
}
