//! # adhesive-core
//!
//! Core data model for the adhesive publish/subscribe dispatcher.
//!
//! This crate has minimal dependencies and holds everything that does not
//! need a registry: the listener records, their commit state, and the error
//! types a publish operation can record.
//!
//! # Model
//!
//! - [`Listener`]: event names plus ordered predicates, dependencies and logic
//!   functions, all evaluated against one shared mutable context.
//! - [`GroupListener`]: event names plus an ordered list of event names to
//!   resolve when the group is matched.
//! - [`Registration`]: `Draft` until the record's required fields are present,
//!   then `Committed` under a stable id.
//!
//! # Error Types
//!
//! - [`PublishError`] - The error cell of a publish operation
//! - [`ContextError`] - Dependency check failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod listener;
mod names;
mod response;

// Re-exports
pub use error::{BoxError, ContextError, PublishError};
pub use listener::{
    Check, GroupId, GroupListener, Invocation, Listener, ListenerId, Logic, Record, Registration,
};
pub use names::{IntoEventNames, task_event_name};
pub use response::IntoOutcome;
