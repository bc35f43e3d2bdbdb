//! Registry of committed listeners and groups.
//!
//! Records are appended in registration order and addressed by the index they
//! were given at commit. Flushing an event name tombstones the matching
//! records: the slot keeps its index and its record, but matching skips it
//! from then on. Indices are never compacted or reused.

use adhesive_core::{GroupId, GroupListener, Listener, ListenerId, Record, Registration};
use tracing::debug;

struct Slot<T> {
    record: T,
    flushed: bool,
}

/// Append-only, index-addressed storage for one record kind.
struct Slots<T> {
    entries: Vec<Slot<T>>,
}

impl<T: Record> Slots<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends `record` if complete, returning its index; otherwise hands it back.
    fn commit(&mut self, record: T) -> Result<usize, T> {
        if !record.is_complete() {
            return Err(record);
        }
        self.entries.push(Slot {
            record,
            flushed: false,
        });
        Ok(self.entries.len() - 1)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|slot| &slot.record)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.entries.get_mut(index).map(|slot| &mut slot.record)
    }

    fn is_flushed(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|slot| slot.flushed)
    }

    fn flush(&mut self, name: &str) -> usize {
        let mut flushed = 0;
        for slot in self.entries.iter_mut().filter(|s| !s.flushed) {
            if slot.record.listens_to(name) {
                slot.flushed = true;
                flushed += 1;
            }
        }
        flushed
    }

    /// Live records in registry order, with their index.
    fn live(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.flushed)
            .map(|(index, slot)| (index, &slot.record))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The listener and group collections of one bus.
pub struct Registry<C> {
    listeners: Slots<Listener<C>>,
    groups: Slots<GroupListener>,
}

impl<C> Registry<C> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Slots::new(),
            groups: Slots::new(),
        }
    }

    /// Commit a listener if it has at least one event name and one logic function.
    ///
    /// Incomplete listeners are returned as `Draft`.
    pub fn commit_listener(&mut self, listener: Listener<C>) -> Registration<ListenerId, Listener<C>> {
        match self.listeners.commit(listener) {
            Ok(index) => {
                let id = ListenerId(index);
                debug!(%id, events = ?self.listeners.get(index).map(Record::event_names), "listener committed");
                Registration::Committed(id)
            }
            Err(draft) => Registration::Draft(draft),
        }
    }

    /// Commit a group if it has at least one event name and one fire target.
    ///
    /// Incomplete groups are returned as `Draft`.
    pub fn commit_group(&mut self, group: GroupListener) -> Registration<GroupId, GroupListener> {
        match self.groups.commit(group) {
            Ok(index) => {
                let id = GroupId(index);
                debug!(%id, events = ?self.groups.get(index).map(Record::event_names), "group committed");
                Registration::Committed(id)
            }
            Err(draft) => Registration::Draft(draft),
        }
    }

    /// Get a committed listener, flushed or not.
    pub fn listener(&self, id: ListenerId) -> Option<&Listener<C>> {
        self.listeners.get(id.0)
    }

    /// Get a committed listener for in-place update.
    pub fn listener_mut(&mut self, id: ListenerId) -> Option<&mut Listener<C>> {
        self.listeners.get_mut(id.0)
    }

    /// Get a committed group, flushed or not.
    pub fn group(&self, id: GroupId) -> Option<&GroupListener> {
        self.groups.get(id.0)
    }

    /// Get a committed group for in-place update.
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut GroupListener> {
        self.groups.get_mut(id.0)
    }

    /// Whether the listener in this slot has been flushed.
    pub fn is_listener_flushed(&self, id: ListenerId) -> bool {
        self.listeners.is_flushed(id.0)
    }

    /// Whether the group in this slot has been flushed.
    pub fn is_group_flushed(&self, id: GroupId) -> bool {
        self.groups.is_flushed(id.0)
    }

    /// Remove every listener and group listening to `name` from future matches.
    ///
    /// Returns the number of records flushed.
    pub fn flush(&mut self, name: &str) -> usize {
        let listeners = self.listeners.flush(name);
        let groups = self.groups.flush(name);
        debug!(event = name, listeners, groups, "flushed registrations");
        listeners + groups
    }

    /// Live listeners in registration order.
    pub fn listeners(&self) -> impl Iterator<Item = (ListenerId, &Listener<C>)> {
        self.listeners.live().map(|(index, l)| (ListenerId(index), l))
    }

    /// Live groups in registration order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &GroupListener)> {
        self.groups.live().map(|(index, g)| (GroupId(index), g))
    }

    /// Number of listener slots ever committed, including flushed ones.
    pub fn listener_slots(&self) -> usize {
        self.listeners.len()
    }

    /// Number of group slots ever committed, including flushed ones.
    pub fn group_slots(&self) -> usize {
        self.groups.len()
    }

    /// Check if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.listeners.len() == 0 && self.groups.len() == 0
    }

    /// Drop every record. Ids issued before the call are meaningless afterwards.
    pub fn clear(&mut self) {
        self.listeners = Slots::new();
        self.groups = Slots::new();
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}
