//! # Listener Records
//!
//! A [`Listener`] is a unit of reactive logic bound to one or more event
//! names. When an event it listens for is published, its phases run in order
//! against the publish context:
//!
//! 1. **Predicates**: any `false` skips the listener silently.
//! 2. **Dependencies**: any `false` halts the whole publish with a
//!    [`ContextError`].
//! 3. **Logic**: any `Err` halts the whole publish with that error.
//!
//! A [`GroupListener`] is an indirection: when one of its event names is
//! matched it resolves to the listeners of its `fire` event names.
//!
//! # Lazy Commit
//!
//! Records start as drafts. A record becomes visible to matching once its
//! required fields are non-empty (see [`Record::is_complete`]), at which point
//! the registry assigns it a stable slot. [`Registration`] makes that state
//! explicit.

use crate::{
    error::{BoxError, ContextError, PublishError},
    response::IntoOutcome,
};
use std::fmt;

/// A boolean check evaluated against the publish context.
pub type Check<C> = Box<dyn Fn(&mut C) -> bool + Send + Sync + 'static>;

/// Side-effecting listener logic evaluated against the publish context.
pub type Logic<C> = Box<dyn Fn(&mut C) -> Result<(), BoxError> + Send + Sync + 'static>;

/// Stable registry slot of a committed [`Listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub usize);

/// Stable registry slot of a committed [`GroupListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Commit state of a record.
#[derive(Debug)]
pub enum Registration<Id, R> {
    /// Not yet visible to matching; the record is still owned by its builder.
    Draft(R),
    /// Stored in the registry under a permanent id.
    Committed(Id),
}

impl<Id: Copy, R> Registration<Id, R> {
    /// The committed id, if any.
    pub fn id(&self) -> Option<Id> {
        match self {
            Registration::Committed(id) => Some(*id),
            Registration::Draft(_) => None,
        }
    }

    /// Returns `true` once the record has been committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Registration::Committed(_))
    }
}

/// Behaviour shared by listener and group records.
pub trait Record {
    /// Event names this record responds to, in insertion order.
    fn event_names(&self) -> &[String];

    /// Append an event name. Empty names are ignored.
    ///
    /// Returns whether the name was accepted.
    fn add_event_name(&mut self, name: impl Into<String>) -> bool;

    /// Whether all fields required for commit are non-empty.
    fn is_complete(&self) -> bool;

    /// Whether this record responds to `name`.
    fn listens_to(&self, name: &str) -> bool {
        self.event_names().iter().any(|n| n == name)
    }
}

/// Outcome of running one listener against the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// A predicate returned `false`; nothing else ran.
    Skipped,
    /// All phases ran to completion.
    Completed,
}

/// A registered unit of reactive logic.
///
/// Required for commit: at least one event name and one logic function.
pub struct Listener<C> {
    event_names: Vec<String>,
    predicates: Vec<Check<C>>,
    dependencies: Vec<Check<C>>,
    logic: Vec<Logic<C>>,
}

impl<C> Listener<C> {
    /// Create an empty draft listener.
    pub fn new() -> Self {
        Self {
            event_names: Vec::new(),
            predicates: Vec::new(),
            dependencies: Vec::new(),
            logic: Vec::new(),
        }
    }

    /// Append a predicate.
    pub fn add_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&mut C) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
    }

    /// Append a dependency check.
    pub fn add_dependency<F>(&mut self, dependency: F)
    where
        F: Fn(&mut C) -> bool + Send + Sync + 'static,
    {
        self.dependencies.push(Box::new(dependency));
    }

    /// Append a logic function.
    pub fn add_logic<F, R>(&mut self, logic: F)
    where
        F: Fn(&mut C) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.logic.push(Box::new(move |cx| logic(cx).into_outcome()));
    }

    /// Builder form of [`Record::add_event_name`].
    pub fn with_event(mut self, name: impl Into<String>) -> Self {
        self.add_event_name(name);
        self
    }

    /// Builder form of [`Listener::add_predicate`].
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&mut C) -> bool + Send + Sync + 'static,
    {
        self.add_predicate(predicate);
        self
    }

    /// Builder form of [`Listener::add_dependency`].
    pub fn with_dependency<F>(mut self, dependency: F) -> Self
    where
        F: Fn(&mut C) -> bool + Send + Sync + 'static,
    {
        self.add_dependency(dependency);
        self
    }

    /// Builder form of [`Listener::add_logic`].
    pub fn with_logic<F, R>(mut self, logic: F) -> Self
    where
        F: Fn(&mut C) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.add_logic(logic);
        self
    }

    /// Number of predicates.
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// Number of dependency checks.
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Number of logic functions.
    pub fn logic_count(&self) -> usize {
        self.logic.len()
    }

    /// Run the listener's phases for `event` against `cx`.
    ///
    /// Predicates and dependencies stop at the first `false`; logic stops at
    /// the first error.
    pub fn invoke(&self, event: &str, cx: &mut C) -> Result<Invocation, PublishError> {
        if !self.predicates.iter().all(|p| p(cx)) {
            return Ok(Invocation::Skipped);
        }
        if !self.dependencies.iter().all(|d| d(cx)) {
            return Err(ContextError::new(event).into());
        }
        for logic in &self.logic {
            logic(cx).map_err(PublishError::from_boxed)?;
        }
        Ok(Invocation::Completed)
    }
}

impl<C> Default for Listener<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Record for Listener<C> {
    fn event_names(&self) -> &[String] {
        &self.event_names
    }

    fn add_event_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.event_names.push(name);
        true
    }

    fn is_complete(&self) -> bool {
        !self.event_names.is_empty() && !self.logic.is_empty()
    }
}

impl<C> fmt::Debug for Listener<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("event_names", &self.event_names)
            .field("predicates", &self.predicates.len())
            .field("dependencies", &self.dependencies.len())
            .field("logic", &self.logic.len())
            .finish()
    }
}

/// A named indirection to the listeners of other events.
///
/// Required for commit: at least one event name and one fire target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupListener {
    event_names: Vec<String>,
    fire: Vec<String>,
}

impl GroupListener {
    /// Create an empty draft group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event name to resolve when this group matches.
    ///
    /// Empty names are ignored. Returns whether the name was accepted.
    pub fn add_fire(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.fire.push(name);
        true
    }

    /// Builder form of [`Record::add_event_name`].
    pub fn with_event(mut self, name: impl Into<String>) -> Self {
        self.add_event_name(name);
        self
    }

    /// Builder form of [`GroupListener::add_fire`].
    pub fn with_fire(mut self, name: impl Into<String>) -> Self {
        self.add_fire(name);
        self
    }

    /// Event names resolved when this group matches, in declared order.
    pub fn fire(&self) -> &[String] {
        &self.fire
    }
}

impl Record for GroupListener {
    fn event_names(&self) -> &[String] {
        &self.event_names
    }

    fn add_event_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.event_names.push(name);
        true
    }

    fn is_complete(&self) -> bool {
        !self.event_names.is_empty() && !self.fire.is_empty()
    }
}
