//! The composition root.

use crate::{group::GroupSubscription, subscribe::Subscription};
use adhesive_core::{
    GroupId, GroupListener, IntoEventNames, Listener, ListenerId, PublishError, Registration,
};
use adhesive_std::{DispatchConfig, Matcher, Publish, Registry, Scope};
use tracing::debug;

/// Owns the listener registry and starts publish operations against it.
///
/// `C` is the context type every predicate, dependency and logic function of
/// this bus receives.
///
/// # Example
///
/// ```rust,ignore
/// let mut bus = Bus::<Request>::new();
///
/// bus.subscribe("users:read:query").then(|req| req.run_query());
/// bus.group("users:read").tasks("users:read", ["query", "format"]);
///
/// let mut req = Request::default();
/// bus.emit(&mut req, "users:read")?;
/// ```
pub struct Bus<C> {
    registry: Registry<C>,
    config: DispatchConfig,
}

impl<C> Bus<C> {
    /// Create an empty bus with the default configuration.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Create an empty bus with the given configuration.
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Start registering a listener for `names`.
    pub fn subscribe(&mut self, names: impl IntoEventNames) -> Subscription<'_, C> {
        Subscription::new(&mut self.registry, names)
    }

    /// Start registering a group for `names`.
    pub fn group(&mut self, names: impl IntoEventNames) -> GroupSubscription<'_, C> {
        GroupSubscription::new(&mut self.registry, names)
    }

    /// Commit a pre-built listener.
    ///
    /// Returns the listener as a `Draft` if it has no event name or no logic.
    pub fn register(&mut self, listener: Listener<C>) -> Registration<ListenerId, Listener<C>> {
        self.registry.commit_listener(listener)
    }

    /// Commit a pre-built group.
    ///
    /// Returns the group as a `Draft` if it has no event name or nothing to fire.
    pub fn register_group(&mut self, group: GroupListener) -> Registration<GroupId, GroupListener> {
        self.registry.commit_group(group)
    }

    /// Remove every listener and group listening to `name` from future matches.
    pub fn flush(&mut self, name: &str) -> usize {
        self.registry.flush(name)
    }

    /// Ids of the listeners that would run for `name`, in execution order.
    pub fn matches(&self, name: &str) -> Vec<ListenerId> {
        self.matcher().resolve_ids(name)
    }

    /// A matcher over this bus's registry.
    pub fn matcher(&self) -> Matcher<'_, C> {
        Matcher::new(&self.registry, &self.config)
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &Registry<C> {
        &self.registry
    }

    /// Drop every registration.
    pub fn reset(&mut self) {
        debug!(
            listeners = self.registry.listener_slots(),
            groups = self.registry.group_slots(),
            "resetting bus"
        );
        self.registry.clear();
    }

    /// Start a publish operation that owns a default context.
    pub fn publish<'c>(&self) -> Publish<'_, 'c, C>
    where
        C: Default,
    {
        Publish::new(self.matcher(), Scope::default())
    }

    /// Start a publish operation over a borrowed context.
    pub fn publish_with<'c>(&self, cx: &'c mut C) -> Publish<'_, 'c, C> {
        Publish::new(self.matcher(), cx.into())
    }

    /// Fire `names` against `cx` and return the recorded error.
    pub fn emit(&self, cx: &mut C, names: impl IntoEventNames) -> Result<(), PublishError> {
        self.publish_with(cx).events(names).into_result()
    }
}

impl<C> Default for Bus<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Cx {
        counter: u32,
    }

    #[test]
    fn test_publish_owns_default_context() {
        let mut bus = Bus::<Cx>::new();
        bus.subscribe("evt").then(|cx| cx.counter += 1);

        let (cx, err) = bus.publish().events(["evt", "evt"]).into_parts();
        assert!(err.is_none());
        assert_eq!(cx.map(|cx| cx.counter), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut bus = Bus::<Cx>::new();
        bus.subscribe("evt").then(|cx| cx.counter += 1);
        bus.group("g").events("evt");
        assert_eq!(bus.matches("g").len(), 1);

        bus.reset();
        assert!(bus.registry().is_empty());
        assert!(bus.matches("evt").is_empty());
    }

    #[test]
    fn test_config_is_applied_to_matching() {
        let mut bus = Bus::<Cx>::with_config(DispatchConfig::new().with_max_group_depth(0));
        bus.subscribe("evt").then(|cx| cx.counter += 1);
        bus.group("g").events("evt");

        assert_eq!(bus.config().max_group_depth, 0);
        assert!(bus.matches("g").is_empty());
        assert_eq!(bus.matches("evt").len(), 1);
    }
}
