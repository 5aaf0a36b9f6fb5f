//! Text validation rules applied before a task reaches storage.

use super::TaskDomainError;

/// Configurable limits for task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRules {
    /// Maximum length of the untrimmed input, in characters.
    pub max_text_length: usize,
}

impl TaskRules {
    /// Default maximum text length in characters.
    pub const DEFAULT_MAX_TEXT_LENGTH: usize = 500;

    /// Validates raw task text and returns its trimmed form.
    ///
    /// Emptiness is checked on the trimmed text; length is measured on the
    /// untrimmed input, in characters rather than bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyText`] when nothing remains after
    /// trimming, or [`TaskDomainError::TextTooLong`] when the raw input is
    /// longer than [`Self::max_text_length`].
    pub fn validate_text(&self, raw: &str) -> Result<String, TaskDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyText);
        }

        let length = raw.chars().count();
        if length > self.max_text_length {
            return Err(TaskDomainError::TextTooLong {
                length,
                max: self.max_text_length,
            });
        }

        Ok(trimmed.to_owned())
    }
}

impl Default for TaskRules {
    fn default() -> Self {
        Self {
            max_text_length: Self::DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}
