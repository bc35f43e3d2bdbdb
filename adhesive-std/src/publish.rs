//! # Publish Pipeline
//!
//! A [`Publish`] drives one publish operation: it fires event names in order,
//! runs the matched listeners against one shared context, and records the
//! first error in its error cell.
//!
//! # State
//!
//! - **Running**: no error recorded. `events`, `tasks` and `then` run.
//! - **Halted**: an error is recorded. `events`, `tasks` and `then` are no-ops;
//!   `then_catch` and `recover` still run.
//!
//! A failed predicate is not an error: the listener is skipped and the
//! operation stays Running.
//!
//! # Example
//!
//! ```rust,ignore
//! let result = bus
//!     .publish_with(&mut request)
//!     .events(["users:read:build-query", "users:read:query"])
//!     .then(|req| req.format_results())
//!     .into_result();
//! ```

use crate::{context::Scope, routing::Matcher};
use adhesive_core::{IntoEventNames, IntoOutcome, Invocation, PublishError, task_event_name};
use tracing::{debug, debug_span};

/// One publish operation over a registry.
pub struct Publish<'r, 'c, C> {
    matcher: Matcher<'r, C>,
    scope: Scope<'c, C>,
    error: Option<PublishError>,
}

impl<'r, 'c, C> Publish<'r, 'c, C> {
    /// Start a publish operation with the given context.
    pub fn new(matcher: Matcher<'r, C>, scope: Scope<'c, C>) -> Self {
        Self {
            matcher,
            scope,
            error: None,
        }
    }

    /// Rebind the shared context.
    ///
    /// Only functions invoked after this call see the new context. A context
    /// the operation owned is dropped here, so [`Publish::into_parts`] no
    /// longer returns it.
    pub fn context(mut self, cx: &'c mut C) -> Self {
        self.scope = cx.into();
        self
    }

    /// Fire events in order.
    ///
    /// Does nothing once an error is recorded. A dependency failure or logic
    /// error stops processing immediately, including the remaining names.
    pub fn events(mut self, names: impl IntoEventNames) -> Self {
        if self.error.is_some() {
            return self;
        }
        for name in names.into_event_names() {
            if name.is_empty() {
                continue;
            }
            if let Err(err) = self.fire(&name) {
                debug!(event = %name, error = %err, "publish halted");
                self.error = Some(err);
                break;
            }
        }
        self
    }

    /// Alias for [`Publish::events`].
    pub fn event(self, names: impl IntoEventNames) -> Self {
        self.events(names)
    }

    /// Fire `event:task` for each task, in order.
    ///
    /// A task starting with `:` is appended as is.
    pub fn tasks(self, event: &str, tasks: impl IntoEventNames) -> Self {
        let names: Vec<String> = tasks
            .into_event_names()
            .iter()
            .filter(|task| !task.is_empty())
            .map(|task| task_event_name(event, task))
            .collect();
        self.events(names)
    }

    /// Alias for [`Publish::tasks`].
    pub fn task(self, event: &str, task: &str) -> Self {
        self.tasks(event, task)
    }

    /// Run `handler` against the context if no error is recorded.
    ///
    /// An error returned by the handler is recorded.
    pub fn then<F, R>(mut self, handler: F) -> Self
    where
        F: FnOnce(&mut C) -> R,
        R: IntoOutcome,
    {
        if self.error.is_none() {
            if let Err(err) = handler(self.scope.get_mut()).into_outcome() {
                self.error = Some(PublishError::from_boxed(err));
            }
        }
        self
    }

    /// Run `handler` with the context and the current error, whatever it is.
    ///
    /// An error returned by the handler replaces the recorded one. Returning
    /// `Ok` leaves the recorded error in place; use [`Publish::recover`] to
    /// clear it.
    pub fn then_catch<F, R>(mut self, handler: F) -> Self
    where
        F: FnOnce(&mut C, Option<&PublishError>) -> R,
        R: IntoOutcome,
    {
        if let Err(err) = handler(self.scope.get_mut(), self.error.as_ref()).into_outcome() {
            self.error = Some(PublishError::from_boxed(err));
        }
        self
    }

    /// Take the recorded error and hand it to `handler`.
    ///
    /// Runs only when an error is recorded. `Ok` clears the error and the
    /// operation resumes; `Err` records the returned error instead.
    pub fn recover<F, R>(mut self, handler: F) -> Self
    where
        F: FnOnce(&mut C, PublishError) -> R,
        R: IntoOutcome,
    {
        if let Some(err) = self.error.take() {
            match handler(self.scope.get_mut(), err).into_outcome() {
                Ok(()) => debug!("publish recovered"),
                Err(err) => self.error = Some(PublishError::from_boxed(err)),
            }
        }
        self
    }

    /// The recorded error, if any.
    pub fn error(&self) -> Option<&PublishError> {
        self.error.as_ref()
    }

    /// Whether an error is recorded.
    pub fn is_halted(&self) -> bool {
        self.error.is_some()
    }

    /// Shared access to the current context.
    pub fn context_ref(&self) -> &C {
        self.scope.get()
    }

    /// Mutable access to the current context.
    pub fn context_mut(&mut self) -> &mut C {
        self.scope.get_mut()
    }

    /// Finish the operation, returning the recorded error.
    pub fn into_result(self) -> Result<(), PublishError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Finish the operation, returning the owned context and the recorded
    /// error.
    ///
    /// The context is `None` when the operation ran on a borrowed context,
    /// including after [`Publish::context`] replaced an owned one.
    pub fn into_parts(self) -> (Option<C>, Option<PublishError>) {
        (self.scope.into_owned(), self.error)
    }

    fn fire(&mut self, name: &str) -> Result<(), PublishError> {
        let _span = debug_span!("fire", event = name).entered();
        let ids = self.matcher.resolve_ids(name);
        debug!(listeners = ids.len(), "matched");

        let registry = self.matcher.registry();
        let cx = self.scope.get_mut();
        for id in ids {
            let Some(listener) = registry.listener(id) else {
                continue;
            };
            if listener.invoke(name, cx)? == Invocation::Skipped {
                debug!(listener = %id, "predicate failed; skipped");
            }
        }
        Ok(())
    }
}
