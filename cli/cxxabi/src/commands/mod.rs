//! CLI command implementations.

pub mod kind;
pub mod profile;
