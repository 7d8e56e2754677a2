//! Rules for allocating derived-class fields in a base's tail padding.
//!
//! ISO C++98 only permitted tail padding reuse for non-POD bases. DR 43
//! removed that restriction retroactively, but many platforms keep a
//! variant of the old rule for binary compatibility, so the choice is part
//! of the ABI and can never change for an existing kind.

use serde::{Deserialize, Serialize};

/// When record layout may place objects in the tail padding of a base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TailPaddingUseRules {
    /// Tail padding of a base is always available, even if it is POD.
    AlwaysUseTailPadding,
    /// Only reuse tail padding if the base is not POD under C++ TR1 rules.
    UseTailPaddingUnlessPod03,
    /// Only reuse tail padding if the base is not POD under C++11 rules.
    UseTailPaddingUnlessPod11,
}

/// PODness of a base class under both historical definitions.
///
/// Computed by the layout consumer; this crate never inspects classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BasePodness {
    /// POD according to C++ TR1 (C++03) rules.
    pub pod_03: bool,
    /// POD according to C++11 rules.
    pub pod_11: bool,
}

impl TailPaddingUseRules {
    /// Whether fields may be allocated in the tail padding of `base`.
    pub fn allows_reuse(self, base: BasePodness) -> bool {
        match self {
            TailPaddingUseRules::AlwaysUseTailPadding => true,
            TailPaddingUseRules::UseTailPaddingUnlessPod03 => !base.pod_03,
            TailPaddingUseRules::UseTailPaddingUnlessPod11 => !base.pod_11,
        }
    }

    /// Stable kebab-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            TailPaddingUseRules::AlwaysUseTailPadding => "always-use-tail-padding",
            TailPaddingUseRules::UseTailPaddingUnlessPod03 => "use-tail-padding-unless-pod03",
            TailPaddingUseRules::UseTailPaddingUnlessPod11 => "use-tail-padding-unless-pod11",
        }
    }
}
