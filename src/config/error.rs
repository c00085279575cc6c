use crate::error::ResolveError;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ConfigError {
    /// The underlying resolution error, if loading got that far
    pub fn as_resolve(&self) -> Option<&ResolveError> {
        match self {
            ConfigError::Resolve(e) => Some(e),
            _ => None,
        }
    }
}
