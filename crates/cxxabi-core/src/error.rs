//! Error types for ABI name handling.

/// Errors produced when resolving ABI kinds by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// The name does not match any known ABI kind.
    #[error("unknown C++ ABI kind '{name}'")]
    UnknownKind {
        /// The name that failed to resolve.
        name: String,
    },

    /// The name does not match any known ABI property key.
    #[error("unknown ABI property '{name}'")]
    UnknownProperty {
        /// The key that failed to resolve.
        name: String,
    },
}

/// Result type for ABI name resolution.
pub type Result<T> = std::result::Result<T, AbiError>;
