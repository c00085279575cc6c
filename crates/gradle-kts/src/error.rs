//! Error types for script construction.

/// Errors raised while rendering a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DslError {
    /// Block names, property targets and call names must be Kotlin identifiers
    /// (dotted paths and generic arguments allowed).
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// Comments are single-line.
    #[error("Comment must not contain a newline: {0:?}")]
    MultilineComment(String),
}
