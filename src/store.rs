use std::collections::BTreeSet;

use log::info;

use crate::categories::EventKey;

/// The store seam the panel reads from and sends mutation requests to.
pub trait EventListenerStore {
    /// Snapshot of the currently armed keys.
    fn active_event_listeners(&self) -> &BTreeSet<EventKey>;
    fn add_event_listeners(&mut self, keys: &[EventKey]);
    fn remove_event_listeners(&mut self, keys: &[EventKey]);
}

/// In-memory breakpoint store, owned by the main thread.
#[derive(Debug, Default)]
pub struct BreakpointStore {
    active: BTreeSet<EventKey>,
}

impl BreakpointStore {
    pub fn new<I>(initial: I) -> Self
    where
        I: IntoIterator<Item = EventKey>,
    {
        Self {
            active: initial.into_iter().collect(),
        }
    }
}

impl EventListenerStore for BreakpointStore {
    fn active_event_listeners(&self) -> &BTreeSet<EventKey> {
        &self.active
    }

    fn add_event_listeners(&mut self, keys: &[EventKey]) {
        self.active.extend(keys.iter().cloned());
        info!("armed {}", keys.join(", "));
    }

    fn remove_event_listeners(&mut self, keys: &[EventKey]) {
        for key in keys {
            self.active.remove(key);
        }
        info!("disarmed {}", keys.join(", "));
    }
}
