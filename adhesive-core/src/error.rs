//! Error types for adhesive.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`PublishError`] - The value held in a publish operation's error cell
//! - [`ContextError`] - Raised when a listener's context dependencies are missing

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A listener's predicates passed but one of its dependency checks did not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("event: '{event}' had missing context dependencies")]
pub struct ContextError {
    /// The event name that was being fired when the check failed.
    pub event: String,
}

impl ContextError {
    /// Create a new context error for the given event name.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
        }
    }
}

/// Error recorded on a publish operation.
///
/// Once set, further event processing in the same operation is skipped.
#[derive(Error, Debug)]
pub enum PublishError {
    /// A dependency check failed.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A logic or `then` handler returned an error. Kept as returned.
    #[error(transparent)]
    Logic(BoxError),
}

impl PublishError {
    /// Convert a boxed handler error into a `PublishError`.
    ///
    /// Errors that already are a `PublishError` or a `ContextError` are
    /// unwrapped instead of being nested inside `Logic`.
    pub fn from_boxed(err: BoxError) -> Self {
        let err = match err.downcast::<PublishError>() {
            Ok(err) => return *err,
            Err(err) => err,
        };
        match err.downcast::<ContextError>() {
            Ok(err) => PublishError::Context(*err),
            Err(err) => PublishError::Logic(err),
        }
    }

    /// The event name for dependency failures.
    pub fn event(&self) -> Option<&str> {
        match self {
            PublishError::Context(err) => Some(&err.event),
            PublishError::Logic(_) => None,
        }
    }

    /// Returns `true` if this is a dependency failure.
    pub fn is_context(&self) -> bool {
        matches!(self, PublishError::Context(_))
    }

    /// Attempt to view a logic error as a concrete type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            PublishError::Logic(err) => err.downcast_ref::<E>(),
            PublishError::Context(_) => None,
        }
    }
}

impl From<BoxError> for PublishError {
    fn from(err: BoxError) -> Self {
        PublishError::from_boxed(err)
    }
}
