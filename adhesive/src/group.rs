//! Fluent group registration.

use adhesive_core::{GroupId, GroupListener, IntoEventNames, Record, Registration, task_event_name};
use adhesive_std::Registry;
use tracing::debug;

/// Builder for one group, returned by [`Bus::group`].
///
/// A group commits once it has an event name and an event to fire. When one
/// of its names is published, the listeners of its fire targets run in the
/// declared order.
///
/// ```rust,ignore
/// bus.group("users:read")
///     .tasks("users:read", ["build-query", "query", "format-results"]);
/// ```
///
/// [`Bus::group`]: crate::Bus::group
pub struct GroupSubscription<'b, C> {
    registry: &'b mut Registry<C>,
    state: Registration<GroupId, GroupListener>,
}

impl<'b, C> GroupSubscription<'b, C> {
    pub(crate) fn new(registry: &'b mut Registry<C>, names: impl IntoEventNames) -> Self {
        Self {
            registry,
            state: Registration::Draft(GroupListener::new()),
        }
        .on(names)
    }

    fn apply(mut self, update: impl FnOnce(&mut GroupListener)) -> Self {
        self.state = match self.state {
            Registration::Committed(id) => {
                if let Some(group) = self.registry.group_mut(id) {
                    update(group);
                }
                Registration::Committed(id)
            }
            Registration::Draft(mut group) => {
                update(&mut group);
                self.registry.commit_group(group)
            }
        };
        self
    }

    /// Listen for more event names.
    pub fn on(self, names: impl IntoEventNames) -> Self {
        let names = names.into_event_names();
        self.apply(|group| {
            for name in names {
                group.add_event_name(name);
            }
        })
    }

    /// Flush existing listeners and groups sharing this group's event names.
    ///
    /// Call it right after [`Bus::group`], before the group commits.
    ///
    /// [`Bus::group`]: crate::Bus::group
    pub fn replace(self) -> Self {
        let names = match &self.state {
            Registration::Draft(group) => group.event_names().to_vec(),
            Registration::Committed(id) => self
                .registry
                .group(*id)
                .map(|group| group.event_names().to_vec())
                .unwrap_or_default(),
        };
        for name in &names {
            let flushed = self.registry.flush(name);
            debug!(event = %name, flushed, "replacing registrations");
        }
        self
    }

    /// Append events to fire, in order, when this group matches.
    pub fn events(self, names: impl IntoEventNames) -> Self {
        let names = names.into_event_names();
        self.apply(|group| {
            for name in names {
                group.add_fire(name);
            }
        })
    }

    /// Alias for [`GroupSubscription::events`].
    pub fn event(self, names: impl IntoEventNames) -> Self {
        self.events(names)
    }

    /// Append `event:task` fire targets for each task, in order.
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

    /// Alias for [`GroupSubscription::tasks`].
    pub fn task(self, event: &str, task: &str) -> Self {
        self.tasks(event, task)
    }

    /// The committed id, once the group is complete.
    pub fn id(&self) -> Option<GroupId> {
        self.state.id()
    }

    /// Whether the group has been committed.
    pub fn is_committed(&self) -> bool {
        self.state.is_committed()
    }
}
