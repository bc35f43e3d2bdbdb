//! # adhesive - In-Process Publish/Subscribe Dispatcher
//!
//! Producers fire named events against a mutable context. Listeners
//! registered for those names run in registration order, gated by predicates
//! and dependency checks, and can halt the whole publish by returning an
//! error. Groups bundle other event names under one name.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adhesive::prelude::*;
//!
//! #[derive(Default)]
//! struct Request {
//!     user: Option<String>,
//!     rows: Vec<String>,
//! }
//!
//! let mut bus = Bus::<Request>::new();
//!
//! bus.subscribe("users:read:query")
//!     .require(|req| req.user.is_some())
//!     .then(|req| req.rows.push("row".into()));
//!
//! bus.group("users:read").tasks("users:read", ["query"]);
//!
//! let mut req = Request { user: Some("ada".into()), ..Default::default() };
//! bus.emit(&mut req, "users:read")?;
//! assert_eq!(req.rows.len(), 1);
//! ```
//!
//! ## Execution
//!
//! For each listener matched by a fired name:
//!
//! 1. Predicates run in order; a `false` skips the listener.
//! 2. Dependencies run in order; a `false` records a [`ContextError`] and
//!    stops the publish.
//! 3. Logic runs in order; an `Err` is recorded and stops the publish.
//!
//! Once stopped, further `events`/`tasks`/`then` calls on the same
//! [`Publish`] are no-ops; `then_catch` and `recover` still run.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod bus;
mod group;
mod subscribe;

pub use bus::Bus;
pub use group::GroupSubscription;
pub use subscribe::Subscription;

pub use adhesive_core::{
    BoxError, Check, ContextError, GroupId, GroupListener, IntoEventNames, IntoOutcome,
    Invocation, Listener, ListenerId, Logic, PublishError, Record, Registration, task_event_name,
};

pub use adhesive_std::{DispatchConfig, Matcher, Publish, Registry, Scope};

/// Configuration defaults.
pub mod config {
    pub use adhesive_std::config::{DEFAULT_MAX_GROUP_DEPTH, DispatchConfig};
}

/// Testing utilities.
pub mod testing {
    pub use adhesive_std::testing::{CallLog, Counter, TestError, counting, failing};
}

/// Prelude module - common imports for adhesive.
///
/// # Usage
///
/// ```rust,ignore
/// use adhesive::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Bus, ContextError, DispatchConfig, GroupListener, Listener, Publish,
        PublishError, Record,
    };
}
