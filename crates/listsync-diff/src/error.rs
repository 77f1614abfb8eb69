//! Error types for the diff engine.

use std::fmt;

/// Which caller-supplied callback was being evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackKind {
    /// The identity callback (`are_items_the_same`).
    Identity,
    /// The content equality callback (`are_contents_the_same`).
    Equality,
    /// The change payload callback.
    Payload,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::Equality => f.write_str("equality"),
            Self::Payload => f.write_str("payload"),
        }
    }
}

/// Failure raised by a caller-supplied diff callback.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure raised by a [`ListConsumer`](crate::ListConsumer) primitive.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConsumerError {
    message: String,
}

impl ConsumerError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// An index (or index + count) outside the consumer's current length.
    pub fn out_of_range(index: usize, count: usize, len: usize) -> Self {
        Self::new(format!(
            "range {index}..{} out of bounds for length {len}",
            index.saturating_add(count)
        ))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur while computing or dispatching a list diff.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Sizes or positions that cannot be diffed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A callback failed; no partial result is produced.
    #[error("{kind} callback failed for old={old_index}, new={new_index}: {source}")]
    Callback {
        kind: CallbackKind,
        old_index: usize,
        new_index: usize,
        #[source]
        source: CallbackError,
    },

    /// A consumer primitive failed mid-dispatch.
    ///
    /// The consumer holds the result of the first `applied` operations and
    /// nothing else.
    #[error("consumer failed after {applied} applied operation(s): {source}")]
    ConsumerDispatch {
        applied: usize,
        #[source]
        source: ConsumerError,
    },
}

impl DiffError {
    /// Index of the last operation a consumer applied before failing.
    ///
    /// `None` for non-dispatch errors, or when the very first operation failed.
    pub fn last_applied(&self) -> Option<usize> {
        match self {
            Self::ConsumerDispatch { applied, .. } => applied.checked_sub(1),
            _ => None,
        }
    }
}

/// Convenience alias for diff results.
pub type Result<T> = std::result::Result<T, DiffError>;
