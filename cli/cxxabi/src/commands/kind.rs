//! `cxxabi list` and `cxxabi describe` — ABI kind listing and description.

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};

use cxxabi_core::{CxxAbiKind, TargetCxxAbi};

/// List all known ABI kinds.
pub fn list() -> Result<()> {
    print!("{}", render_list()?);
    Ok(())
}

/// Describe one ABI kind in the requested format.
pub fn describe(name: &str, format: Option<&str>) -> Result<()> {
    let kind: CxxAbiKind = name
        .parse()
        .context("use 'cxxabi list' to see available kinds")?;
    tracing::info!(%kind, "describing ABI");
    print!("{}", render_describe(kind, format)?);
    Ok(())
}

fn render_list() -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Known C++ ABIs:")?;
    writeln!(out)?;
    for kind in CxxAbiKind::ALL {
        writeln!(out, "  {:<18} {}", kind.name(), kind.summary())?;
    }
    writeln!(out)?;
    writeln!(out, "Use 'cxxabi describe <kind>' for details.")?;
    Ok(out)
}

fn render_describe(kind: CxxAbiKind, format: Option<&str>) -> Result<String> {
    let props = TargetCxxAbi::new(kind).properties();
    match format.unwrap_or("human") {
        "human" => {
            let mut out = String::new();
            writeln!(out, "=== ABI: {kind} ===")?;
            writeln!(out, "{}", kind.summary())?;
            writeln!(out)?;
            for (property, value) in props.iter() {
                writeln!(out, "  {:<40} {}", property.key(), yes_no(value))?;
            }
            writeln!(out, "  {:<40} {}", "tail-padding", props.tail_padding.name())?;
            Ok(out)
        }
        "toml" => Ok(toml::to_string_pretty(&props)?),
        "json" => Ok(serde_json::to_string_pretty(&props)? + "\n"),
        other => bail!("unknown format '{other}' (expected human, toml, or json)"),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
