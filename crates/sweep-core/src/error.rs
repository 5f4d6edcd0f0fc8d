//! Error types for sweep-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sweep-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The integration branch doesn't exist.
    #[error("target branch not found: {0}")]
    TargetNotFound(String),

    /// A non-forced deletion was refused because the branch moved.
    #[error("branch '{0}' is not fully merged")]
    NotFullyMerged(String),

    /// A protection pattern failed to compile.
    #[error("invalid protection pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to compile.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Git operation error.
    #[error("git error: {0}")]
    Git(#[from] sweep_git::Error),
}
