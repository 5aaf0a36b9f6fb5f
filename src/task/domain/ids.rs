//! Identifier type for the task domain.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a task record.
///
/// Freshly generated identifiers start with the creation time so they sort
/// roughly by creation order. Identifiers read back from storage are kept
/// verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Number of random characters appended after the timestamp component.
    pub const SUFFIX_LEN: usize = 9;

    /// Generates a new identifier from the clock's current time.
    ///
    /// The result is the base-36 Unix millisecond timestamp followed by
    /// [`Self::SUFFIX_LEN`] random lowercase alphanumeric characters.
    /// Uniqueness is probabilistic; collisions are not checked.
    #[must_use]
    pub fn generate(clock: &impl Clock) -> Self {
        let millis = clock.utc().timestamp_millis();
        let mut value = to_base36(u64::try_from(millis).unwrap_or_default());
        value.extend(
            Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(Self::SUFFIX_LEN),
        );
        Self(value)
    }

    /// Wraps an existing identifier string without validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the identifier is the empty string.
    ///
    /// Whitespace-only identifiers are not empty; stored records may carry
    /// them and must stay addressable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the identifier, returning the wrapped string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut digits = Vec::new();
    loop {
        let digit = value.rem_euclid(36);
        let index = usize::try_from(digit).unwrap_or_default();
        digits.push(DIGITS.get(index).copied().map_or('0', char::from));
        value = value.div_euclid(36);
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}
