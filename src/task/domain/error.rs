//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned when caller-supplied input violates a task precondition.
///
/// These are always detected before any storage access, so a rejected
/// request never reaches persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyText,

    /// The untrimmed task text exceeds the configured maximum.
    #[error("task text is {length} characters, maximum is {max}")]
    TextTooLong {
        /// Length of the rejected input in characters.
        length: usize,
        /// Maximum accepted length in characters.
        max: usize,
    },

    /// The task identifier argument is empty.
    #[error("task identifier must not be empty")]
    MissingId,
}

impl TaskDomainError {
    /// Returns the stable machine-readable kind of this error.
    ///
    /// Presentation layers key their user-facing messages on this value.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::EmptyText => "empty",
            Self::TextTooLong { .. } => "too-long",
            Self::MissingId => "missing-id",
        }
    }
}
