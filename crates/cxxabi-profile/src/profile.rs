//! The profile document model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cxxabi_core::{AbiProperty, CxxAbiKind, TailPaddingUseRules, TargetCxxAbi};

/// ABI facts a consumer relies on, checked against the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Expectations {
    /// Pinned boolean facts, keyed by property.
    #[serde(flatten)]
    pub properties: BTreeMap<AbiProperty, bool>,
    /// Pinned tail padding rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail_padding: Option<TailPaddingUseRules>,
}

impl Expectations {
    /// Pin every current fact of `abi`.
    pub fn pin_all(abi: &TargetCxxAbi) -> Self {
        let props = abi.properties();
        Self {
            properties: props.iter().collect(),
            tail_padding: Some(props.tail_padding),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.tail_padding.is_none()
    }
}

/// A named ABI selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AbiProfile {
    /// Profile name (e.g., "android-arm64", "msvc-x64").
    pub name: String,
    /// The selected ABI kind.
    pub abi: CxxAbiKind,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Facts the consumer expects this ABI to have.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<Expectations>,
}

impl AbiProfile {
    pub fn new(name: impl Into<String>, abi: CxxAbiKind) -> Self {
        Self {
            name: name.into(),
            abi,
            description: None,
            expect: None,
        }
    }

    /// The descriptor this profile selects.
    pub fn descriptor(&self) -> TargetCxxAbi {
        TargetCxxAbi::new(self.abi)
    }

    /// Expectations that disagree with the descriptor, as
    /// `(key, expected, actual)` triples.
    pub fn mismatches(&self) -> Vec<(String, String, String)> {
        let Some(expect) = &self.expect else {
            return Vec::new();
        };
        let abi = self.descriptor();
        let mut out = Vec::new();
        for (&property, &expected) in &expect.properties {
            let actual = property.eval(&abi);
            if actual != expected {
                out.push((
                    property.key().to_string(),
                    expected.to_string(),
                    actual.to_string(),
                ));
            }
        }
        if let Some(expected) = expect.tail_padding {
            let actual = abi.tail_padding_use_rules();
            if actual != expected {
                out.push((
                    "tail-padding".into(),
                    expected.name().into(),
                    actual.name().into(),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_follows_abi() {
        let profile = AbiProfile::new("msvc", CxxAbiKind::Microsoft);
        assert!(profile.descriptor().is_microsoft());
    }

    #[test]
    fn pinned_expectations_never_mismatch() {
        for kind in CxxAbiKind::ALL {
            let mut profile = AbiProfile::new("p", kind);
            profile.expect = Some(Expectations::pin_all(&profile.descriptor()));
            assert!(profile.mismatches().is_empty(), "{kind}");
        }
    }

    #[test]
    fn detects_mismatch() {
        let mut profile = AbiProfile::new("wasm", CxxAbiKind::WebAssembly);
        let mut expect = Expectations::default();
        expect.properties.insert(AbiProperty::MemberFunctionsAligned, true);
        expect.tail_padding = Some(TailPaddingUseRules::UseTailPaddingUnlessPod03);
        profile.expect = Some(expect);

        let mismatches = profile.mismatches();
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].0, "member-functions-aligned");
        assert_eq!(mismatches[0].2, "false");
        assert_eq!(mismatches[1].0, "tail-padding");
        assert_eq!(mismatches[1].2, "use-tail-padding-unless-pod11");
    }

    #[test]
    fn no_expectations_no_mismatches() {
        let profile = AbiProfile::new("plain", CxxAbiKind::GenericArm);
        assert!(profile.mismatches().is_empty());
    }
}
