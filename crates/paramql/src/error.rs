//! Error types for paramql

use thiserror::Error;

/// Result type alias for paramql operations
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors raised while declaring descriptors.
///
/// Building fragments never fails: excluded or unsafe values are dropped
/// instead. These errors only surface when a declaration itself is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// Clause kind string did not match any known kind
    #[error("Unknown clause kind: {0}")]
    UnknownClauseKind(String),

    /// Descriptor is missing a required part
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

impl ParamError {
    /// Create an invalid descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }

    /// Check if this is an unknown clause kind error
    pub fn is_unknown_clause_kind(&self) -> bool {
        matches!(self, Self::UnknownClauseKind(_))
    }
}
