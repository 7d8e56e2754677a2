//! ABI profile files.
//!
//! A profile names a C++ ABI kind directly and may pin the derived facts a
//! consumer depends on, so that a layout or mangling component notices when
//! the ABI it was built against no longer matches:
//!
//! ```toml
//! name = "android-arm64"
//! abi = "generic-aarch64"
//!
//! [expect]
//! key-function-can-be-inline = true
//! tail-padding = "use-tail-padding-unless-pod03"
//! ```
//!
//! Profiles live as `<name>.abi.toml` files in a project's `abi/` directory.

pub mod error;
pub mod parse;
pub mod profile;

pub use error::{ProfileError, Result};
pub use parse::{
    check_profile_name, discover_profiles, generate_template, load_profile_toml, parse_profile_toml,
    profile_to_toml, validate_profile, Severity, ValidationIssue,
};
pub use profile::{AbiProfile, Expectations};
