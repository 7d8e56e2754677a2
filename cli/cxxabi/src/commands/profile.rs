//! `cxxabi check`, `cxxabi new`, and `cxxabi profiles` — ABI profile files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use cxxabi_core::CxxAbiKind;
use cxxabi_profile::{
    check_profile_name, discover_profiles, generate_template, load_profile_toml,
    validate_profile, Severity,
};

/// Load and validate a profile, reporting every issue.
pub fn check(path: &Path) -> Result<()> {
    let profile =
        load_profile_toml(path).with_context(|| format!("loading {}", path.display()))?;

    let errors = match validate_profile(&profile) {
        Ok(()) => 0,
        Err(issues) => {
            for issue in &issues {
                eprintln!("{}: {}", issue.severity, issue.message);
            }
            issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .count()
        }
    };

    if errors > 0 {
        bail!("{}: {errors} error(s)", path.display());
    }
    println!("{}: ok ({})", profile.name, profile.abi);
    Ok(())
}

/// Write a template profile for `abi`.
pub fn new(project_dir: &Path, name: &str, abi: &str, output: Option<&Path>) -> Result<()> {
    let path = write_template(project_dir, name, abi, output)?;
    println!("Created {}", path.display());
    Ok(())
}

fn write_template(
    project_dir: &Path,
    name: &str,
    abi: &str,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let kind: CxxAbiKind = abi.parse()?;
    check_profile_name(name)?;
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => project_dir.join("abi").join(format!("{name}.abi.toml")),
    };
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let content = generate_template(name, kind)?;
    std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), %kind, "wrote ABI profile");
    Ok(path)
}

/// List the profiles found under `project_dir/abi/`.
pub fn list(project_dir: &Path) -> Result<()> {
    let profiles = discover_profiles(project_dir)?;
    if profiles.is_empty() {
        println!("No ABI profiles found in {}", project_dir.join("abi").display());
        return Ok(());
    }
    for (name, path) in profiles {
        match load_profile_toml(&path) {
            Ok(profile) => println!("  {name:<25} {}", profile.abi),
            Err(e) => {
                tracing::warn!(path = %path.display(), "unreadable profile");
                println!("  {name:<25} (invalid: {e})");
            }
        }
    }
    Ok(())
}
