//! Event name matching with group resolution.

use crate::{config::DispatchConfig, registry::Registry};
use adhesive_core::{Listener, ListenerId, Record};
use tracing::warn;

/// Resolves event names to the ordered listeners that should run for them.
///
/// For a name, the direct listeners come first in registration order. Then
/// every group listening to the name is resolved in registry order, each
/// group's fire targets in declared order, recursively.
///
/// A fire target that is already being resolved higher up the chain is
/// skipped, and resolution stops descending past
/// [`DispatchConfig::max_group_depth`]. Both cases are logged.
pub struct Matcher<'r, C> {
    registry: &'r Registry<C>,
    max_depth: usize,
}

impl<C> Clone for Matcher<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Matcher<'_, C> {}

impl<'r, C> Matcher<'r, C> {
    /// Create a matcher over `registry`.
    pub fn new(registry: &'r Registry<C>, config: &DispatchConfig) -> Self {
        Self {
            registry,
            max_depth: config.max_group_depth,
        }
    }

    /// The registry being matched against.
    pub fn registry(&self) -> &'r Registry<C> {
        self.registry
    }

    /// The listeners to run for `name`, in execution order.
    pub fn resolve(&self, name: &str) -> Vec<&'r Listener<C>> {
        self.resolve_ids(name)
            .into_iter()
            .filter_map(|id| self.registry.listener(id))
            .collect()
    }

    /// Like [`Matcher::resolve`], returning listener ids.
    pub fn resolve_ids(&self, name: &str) -> Vec<ListenerId> {
        let mut results = Vec::new();
        let mut resolving = Vec::new();
        self.collect(name, 0, &mut resolving, &mut results);
        results
    }

    fn collect<'n>(
        &self,
        name: &'n str,
        depth: usize,
        resolving: &mut Vec<&'n str>,
        results: &mut Vec<ListenerId>,
    ) where
        'r: 'n,
    {
        results.extend(
            self.registry
                .listeners()
                .filter(|(_, listener)| listener.listens_to(name))
                .map(|(id, _)| id),
        );

        resolving.push(name);
        for (group_id, group) in self.registry.groups() {
            if !group.listens_to(name) {
                continue;
            }
            if depth >= self.max_depth {
                warn!(
                    event = name,
                    group = %group_id,
                    max_depth = self.max_depth,
                    "group resolution depth exceeded; not descending"
                );
                continue;
            }
            for target in group.fire() {
                if resolving.contains(&target.as_str()) {
                    warn!(
                        event = name,
                        group = %group_id,
                        target = %target,
                        "group cycle detected; skipping fire target"
                    );
                    continue;
                }
                self.collect(target, depth + 1, resolving, results);
            }
        }
        resolving.pop();
    }
}
