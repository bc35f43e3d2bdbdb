//! Fluent listener registration.

use adhesive_core::{IntoEventNames, IntoOutcome, Listener, ListenerId, Record, Registration};
use adhesive_std::Registry;
use tracing::debug;

/// Builder for one listener, returned by [`Bus::subscribe`].
///
/// Every call mutates the same record. The listener starts matching as soon
/// as it has an event name and a logic function; calls made after that update
/// the committed record in place.
///
/// ```rust,ignore
/// bus.subscribe("users:read")
///     .filter(|req| req.is_authenticated())
///     .require(|req| req.db.is_some())
///     .then(|req| req.load_user());
/// ```
///
/// [`Bus::subscribe`]: crate::Bus::subscribe
pub struct Subscription<'b, C> {
    registry: &'b mut Registry<C>,
    state: Registration<ListenerId, Listener<C>>,
}

impl<'b, C> Subscription<'b, C> {
    pub(crate) fn new(registry: &'b mut Registry<C>, names: impl IntoEventNames) -> Self {
        Self {
            registry,
            state: Registration::Draft(Listener::new()),
        }
        .on(names)
    }

    fn apply(mut self, update: impl FnOnce(&mut Listener<C>)) -> Self {
        self.state = match self.state {
            Registration::Committed(id) => {
                if let Some(listener) = self.registry.listener_mut(id) {
                    update(listener);
                }
                Registration::Committed(id)
            }
            Registration::Draft(mut listener) => {
                update(&mut listener);
                self.registry.commit_listener(listener)
            }
        };
        self
    }

    /// Listen for more event names.
    pub fn on(self, names: impl IntoEventNames) -> Self {
        let names = names.into_event_names();
        self.apply(|listener| {
            for name in names {
                listener.add_event_name(name);
            }
        })
    }

    /// Flush existing listeners and groups sharing this listener's event names.
    ///
    /// Call it right after [`Bus::subscribe`], before the listener commits;
    /// afterwards it would flush this listener too.
    ///
    /// [`Bus::subscribe`]: crate::Bus::subscribe
    pub fn replace(self) -> Self {
        let names = match &self.state {
            Registration::Draft(listener) => listener.event_names().to_vec(),
            Registration::Committed(id) => self
                .registry
                .listener(*id)
                .map(|listener| listener.event_names().to_vec())
                .unwrap_or_default(),
        };
        for name in &names {
            let flushed = self.registry.flush(name);
            debug!(event = %name, flushed, "replacing registrations");
        }
        self
    }

    /// Add a predicate. A `false` result skips this listener silently.
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&mut C) -> bool + Send + Sync + 'static,
    {
        self.apply(|listener| listener.add_predicate(predicate))
    }

    /// Add a dependency check. A `false` result halts the publish with a
    /// context error.
    pub fn require<F>(self, dependency: F) -> Self
    where
        F: Fn(&mut C) -> bool + Send + Sync + 'static,
    {
        self.apply(|listener| listener.add_dependency(dependency))
    }

    /// Add logic. Returning an error halts the publish with that error.
    pub fn then<F, R>(self, logic: F) -> Self
    where
        F: Fn(&mut C) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        self.apply(|listener| listener.add_logic(logic))
    }

    /// The committed id, once the listener is complete.
    pub fn id(&self) -> Option<ListenerId> {
        self.state.id()
    }

    /// Whether the listener has been committed.
    pub fn is_committed(&self) -> bool {
        self.state.is_committed()
    }
}
