use core::fmt;

use thiserror::Error;

/// Failures reported by list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// The pool could not obtain storage for another node.
    #[error("node allocation failed: pool cannot grow beyond {capacity} slots")]
    AllocFailed { capacity: usize },

    /// The dup hook refused to copy a value.
    #[error("dup hook failed for the value at position {position}")]
    DupFailed { position: usize },
}

/// An insertion that did not happen.
///
/// The rejected value is handed back so the caller keeps ownership of it,
/// and the list is left exactly as it was before the call.
#[derive(Error)]
#[error("value was not inserted: {error}")]
pub struct InsertError<T> {
    pub value: T,
    #[source]
    pub error: ListError,
}

impl<T> InsertError<T> {
    pub(crate) fn new(value: T, error: ListError) -> Self {
        Self { value, error }
    }

    /// Returns the value that was not inserted.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> fmt::Debug for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> From<InsertError<T>> for ListError {
    fn from(err: InsertError<T>) -> Self {
        err.error
    }
}
