//! TOML parsing, serialization, validation, and discovery for ABI profiles.
//!
//! Profiles are stored as `.abi.toml` files in the `abi/` directory of a
//! project. This module provides functions to load, validate, serialize,
//! and discover these files.

use std::fmt;
use std::path::{Path, PathBuf};

use cxxabi_core::{CxxAbiKind, TargetCxxAbi};

use crate::error::{ProfileError, Result};
use crate::profile::{AbiProfile, Expectations};

/// File suffix of profile documents.
pub const PROFILE_SUFFIX: &str = ".abi.toml";

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A validation issue found in a profile.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Whether the issue makes the profile unusable.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Load a profile from a `.abi.toml` file.
pub fn load_profile_toml(path: &Path) -> Result<AbiProfile> {
    if !path.exists() {
        return Err(ProfileError::NotFound {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(path = %path.display(), "loading ABI profile");
    let content = std::fs::read_to_string(path)?;
    parse_profile_toml(&content)
}

/// Parse a profile from a TOML string.
pub fn parse_profile_toml(toml_str: &str) -> Result<AbiProfile> {
    let profile: AbiProfile = toml::from_str(toml_str)?;
    Ok(profile)
}

/// Serialize a profile to pretty TOML.
pub fn profile_to_toml(profile: &AbiProfile) -> Result<String> {
    let toml_str = toml::to_string_pretty(profile)?;
    Ok(toml_str)
}

/// Validate a profile for structural correctness and agreement with the
/// descriptor it selects.
///
/// Returns `Ok(())` if no issues were found, or `Err(issues)` with every
/// problem, warnings included.
pub fn validate_profile(profile: &AbiProfile) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. Name is usable as a file stem
    if let Some(message) = name_problem(&profile.name) {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            message,
        });
    }

    // 2. Pinned facts agree with the selected ABI
    for (key, expected, actual) in profile.mismatches() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            message: format!(
                "expected {key} = {expected} but ABI '{}' has {actual}",
                profile.abi
            ),
        });
    }

    // 3. An [expect] table that pins nothing
    if profile.expect.as_ref().is_some_and(Expectations::is_empty) {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            message: "[expect] table is present but pins no facts".into(),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Why `name` cannot be used as a profile name, if it can't.
///
/// Names become file stems under `abi/`, so they must stay inside it.
fn name_problem(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        Some("profile name is empty".into())
    } else if name
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '\\')
    {
        Some(format!(
            "profile name '{name}' contains whitespace or a path separator"
        ))
    } else if name.starts_with('.') {
        Some(format!("profile name '{name}' starts with '.'"))
    } else {
        None
    }
}

/// Check that `name` can be used as a profile name and file stem.
pub fn check_profile_name(name: &str) -> Result<()> {
    match name_problem(name) {
        Some(reason) => Err(ProfileError::InvalidName {
            name: name.into(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Generate a template `.abi.toml` that pins every current fact of `kind`.
///
/// Fails with [`ProfileError::InvalidName`] if `name` would not validate.
pub fn generate_template(name: &str, kind: CxxAbiKind) -> Result<String> {
    check_profile_name(name)?;
    let mut profile = AbiProfile::new(name, kind);
    profile.description = Some(kind.summary().into());
    profile.expect = Some(Expectations::pin_all(&TargetCxxAbi::new(kind)));
    profile_to_toml(&profile)
}

/// Discover all `.abi.toml` files in a project's `abi/` directory.
///
/// Returns a list of (profile_name, file_path) pairs sorted by name.
pub fn discover_profiles(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let abi_dir = project_dir.join("abi");
    if !abi_dir.is_dir() {
        tracing::debug!(dir = %abi_dir.display(), "no abi directory");
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    for entry in std::fs::read_dir(&abi_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping non-UTF-8 file name");
            continue;
        };
        match file_name.strip_suffix(PROFILE_SUFFIX) {
            Some("") => {
                tracing::warn!(path = %path.display(), "skipping profile file with no name");
            }
            Some(name) => profiles.push((name.to_string(), path.clone())),
            None => {}
        }
    }
    profiles.sort_by(|a, b| a.0.cmp(&b.0));
    tracing::debug!(count = profiles.len(), "discovered ABI profiles");
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxxabi_core::{AbiProperty, TailPaddingUseRules};

    #[test]
    fn toml_round_trip() {
        let original = {
            let mut p = AbiProfile::new("msvc-x64", CxxAbiKind::Microsoft);
            p.expect = Some(Expectations::pin_all(&p.descriptor()));
            p
        };
        let toml_str = profile_to_toml(&original).unwrap();
        let parsed = parse_profile_toml(&toml_str).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn parse_minimal_toml() {
        let profile = parse_profile_toml(
            r#"
name = "wasm32"
abi = "webassembly"
"#,
        )
        .unwrap();
        assert_eq!(profile.abi, CxxAbiKind::WebAssembly);
        assert!(profile.expect.is_none());
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn parse_expectations() {
        let profile = parse_profile_toml(
            r#"
name = "android-arm64"
abi = "generic-aarch64"
description = "Android on 64-bit ARM"

[expect]
key-function-can-be-inline = true
primary-vbases = true
tail-padding = "use-tail-padding-unless-pod03"
"#,
        )
        .unwrap();
        let expect = profile.expect.as_ref().unwrap();
        assert_eq!(expect.properties.len(), 2);
        assert_eq!(
            expect.properties.get(&AbiProperty::KeyFunctionCanBeInline),
            Some(&true)
        );
        assert_eq!(
            expect.tail_padding,
            Some(TailPaddingUseRules::UseTailPaddingUnlessPod03)
        );
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn parse_unknown_abi_returns_error() {
        let result = parse_profile_toml(
            r#"
name = "x"
abi = "borland"
"#,
        );
        assert!(matches!(result, Err(ProfileError::Toml(_))));
    }

    #[test]
    fn parse_unknown_expectation_returns_error() {
        let result = parse_profile_toml(
            r#"
name = "x"
abi = "fuchsia"

[expect]
vtable-layout = true
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(parse_profile_toml("this is not valid toml [[[").is_err());
    }

    #[test]
    fn parse_missing_field_returns_error() {
        assert!(parse_profile_toml("name = \"incomplete\"\n").is_err());
    }

    #[test]
    fn validate_mismatched_expectation() {
        let profile = parse_profile_toml(
            r#"
name = "ios64"
abi = "ios64"

[expect]
key-function-can-be-inline = true
"#,
        )
        .unwrap();
        let issues = validate_profile(&profile).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("key-function-can-be-inline"));
        assert!(issues[0].message.contains("ios64"));
    }

    #[test]
    fn validate_bad_names() {
        let issues = validate_profile(&AbiProfile::new("  ", CxxAbiKind::Fuchsia)).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("empty")));

        let issues =
            validate_profile(&AbiProfile::new("a/b", CxxAbiKind::Fuchsia)).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("path separator")));

        let issues =
            validate_profile(&AbiProfile::new(".hidden", CxxAbiKind::Fuchsia)).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("starts with '.'")));
    }

    #[test]
    fn generate_template_rejects_bad_names() {
        for name in ["", "two words", "a/b", "..\\up", "../escape", ".hidden"] {
            let result = generate_template(name, CxxAbiKind::Microsoft);
            assert!(
                matches!(result, Err(ProfileError::InvalidName { .. })),
                "{name:?}"
            );
            assert!(validate_profile(&AbiProfile::new(name, CxxAbiKind::Microsoft)).is_err());
        }
    }

    #[test]
    fn parse_unknown_section_returns_error() {
        let result = parse_profile_toml(
            r#"
name = "x"
abi = "ios64"

[expects]
key-function-can-be-inline = true
"#,
        );
        assert!(matches!(result, Err(ProfileError::Toml(_))));
    }

    #[test]
    fn parse_unknown_top_level_key_returns_error() {
        let result = parse_profile_toml("name = \"x\"\nabi = \"ios\"\ndescripton = \"typo\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_empty_expect_is_warning() {
        let mut profile = AbiProfile::new("p", CxxAbiKind::GenericMips);
        profile.expect = Some(Expectations::default());
        let issues = validate_profile(&profile).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn generate_template_is_valid() {
        for kind in CxxAbiKind::ALL {
            let toml_str = generate_template("my-abi", kind).unwrap();
            let profile = parse_profile_toml(&toml_str).unwrap();
            assert_eq!(profile.name, "my-abi");
            assert_eq!(profile.abi, kind);
            assert!(validate_profile(&profile).is_ok(), "{kind}");
        }
    }

    #[test]
    fn discover_profiles_finds_files() {
        let dir = tempfile::tempdir().unwrap();
        let abi_dir = dir.path().join("abi");
        std::fs::create_dir_all(&abi_dir).unwrap();

        let template = generate_template("x", CxxAbiKind::GenericItanium).unwrap();
        std::fs::write(abi_dir.join("zeta.abi.toml"), &template).unwrap();
        std::fs::write(abi_dir.join("alpha.abi.toml"), &template).unwrap();
        // Non-.abi.toml file should be ignored
        std::fs::write(abi_dir.join("notes.toml"), "ignore me").unwrap();
        // So should a nameless file and a directory with the suffix
        std::fs::write(abi_dir.join(".abi.toml"), &template).unwrap();
        std::fs::create_dir_all(abi_dir.join("sub.abi.toml")).unwrap();

        let profiles = discover_profiles(dir.path()).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].0, "alpha");
        assert_eq!(profiles[1].0, "zeta");
    }

    #[test]
    fn discover_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_profiles(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn load_not_found() {
        let result = load_profile_toml(Path::new("/nonexistent/path.abi.toml"));
        assert!(matches!(result.unwrap_err(), ProfileError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.abi.toml");
        std::fs::write(&path, generate_template("file-test", CxxAbiKind::WatchOs).unwrap())
            .unwrap();

        let profile = load_profile_toml(&path).unwrap();
        assert_eq!(profile.name, "file-test");
        assert_eq!(profile.descriptor(), TargetCxxAbi::new(CxxAbiKind::WatchOs));
    }
}
