//! Testing utilities for adhesive.
//!
//! This module provides helpers to make testing listeners and publish
//! pipelines easier.
//!
//! # Features
//!
//! - [`CallLog`]: Records the order in which labelled callables ran
//! - [`Counter`] and [`counting`]: Logic that counts its invocations
//! - [`failing`]: Logic that always returns a [`TestError`]

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use thiserror::Error;

/// Error returned by [`failing`] logic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TestError(pub String);

/// A shared log of labelled calls.
///
/// Clones share the same log, so a clone can be moved into listener
/// closures while the test keeps one to inspect.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// bus.subscribe("evt").then(log.logic("first"));
/// bus.subscribe("evt").then(log.logic("second"));
///
/// bus.emit(&mut cx, "evt")?;
/// assert_eq!(log.calls(), ["first", "second"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a label.
    pub fn record(&self, label: impl Into<String>) {
        self.guard().push(label.into());
    }

    /// A copy of the recorded labels, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.guard().len()
    }

    /// Number of times `label` was recorded.
    pub fn count_of(&self, label: &str) -> usize {
        self.guard().iter().filter(|l| *l == label).count()
    }

    /// Clear all recorded calls.
    pub fn clear(&self) {
        self.guard().clear();
    }

    /// Logic that records `label` each time it runs.
    pub fn logic<C>(&self, label: impl Into<String>) -> impl Fn(&mut C) + Send + Sync + 'static {
        let log = self.clone();
        let label = label.into();
        move |_: &mut C| log.record(label.clone())
    }

    /// A predicate or dependency that records `label` and returns `result`.
    pub fn check<C>(
        &self,
        label: impl Into<String>,
        result: bool,
    ) -> impl Fn(&mut C) -> bool + Send + Sync + 'static {
        let log = self.clone();
        let label = label.into();
        move |_: &mut C| {
            log.record(label.clone());
            result
        }
    }
}

// ============================================================================
// Counting Logic
// ============================================================================

/// A shared invocation counter.
///
/// # Example
///
/// ```rust,ignore
/// let counter = Counter::new();
/// bus.subscribe("evt").then(counting(&counter));
///
/// bus.emit(&mut cx, ["evt", "evt"])?;
/// assert_eq!(counter.count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Counter {
    count: Arc<AtomicUsize>,
}

impl Counter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

/// Logic that increments `counter` each time it runs.
pub fn counting<C>(counter: &Counter) -> impl Fn(&mut C) + Send + Sync + 'static {
    let count = Arc::clone(&counter.count);
    move |_: &mut C| {
        count.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Failing Logic
// ============================================================================

/// Logic that always fails with `message`.
pub fn failing<C>(
    message: impl Into<String>,
) -> impl Fn(&mut C) -> Result<(), TestError> + Send + Sync + 'static {
    let message = message.into();
    move |_: &mut C| Err(TestError(message.clone()))
}
