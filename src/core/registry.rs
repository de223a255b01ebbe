//! # Listener and waiter registry.
//!
//! Plain data owned by the emitter and guarded by its mutex:
//! - `listeners`: event → set of [`Listener`]s (deduplicated by identity)
//! - `waiters`: event → pending one-shot [`Waiter`]s
//!
//! ## Rules
//! - No user code runs while the registry is borrowed; callers snapshot and release.
//! - Listener sets outlive `delist`/`delist_all` as empty sets; waiter lists are
//!   dropped as soon as they are empty.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::args::Args;
use crate::core::waiter::{Waiter, WaiterId};
use crate::error::EmitterError;
use crate::event::EventKey;
use crate::listeners::Listener;

pub(crate) struct Registry<E, A: Args> {
    listeners: HashMap<E, HashSet<Listener<A>>>,
    waiters: HashMap<E, Vec<Arc<Waiter<A>>>>,
}

impl<E: EventKey, A: Args> Registry<E, A> {
    pub(crate) fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            waiters: HashMap::new(),
        }
    }

    /// Adds `listener` under `event`; returns `false` if it was already there.
    pub(crate) fn insert_listener(&mut self, event: E, listener: Listener<A>) -> bool {
        self.listeners.entry(event).or_default().insert(listener)
    }

    pub(crate) fn remove_listener(
        &mut self,
        event: &E,
        listener: &Listener<A>,
    ) -> Result<(), EmitterError> {
        let set = self
            .listeners
            .get_mut(event)
            .ok_or_else(|| EmitterError::UnknownEvent {
                event: format!("{event:?}"),
            })?;

        if set.remove(listener) {
            Ok(())
        } else {
            Err(EmitterError::UnknownListener {
                event: format!("{event:?}"),
                listener: listener.id(),
            })
        }
    }

    /// Empties one event's set, or every set when `event` is `None`.
    pub(crate) fn clear_listeners(&mut self, event: Option<&E>) {
        match event {
            Some(event) => {
                if let Some(set) = self.listeners.get_mut(event) {
                    set.clear();
                }
            }
            None => self.listeners.clear(),
        }
    }

    pub(crate) fn snapshot_listeners(&self, event: &E) -> Vec<Listener<A>> {
        self.listeners
            .get(event)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn listener_count(&self, event: &E) -> usize {
        self.listeners.get(event).map_or(0, HashSet::len)
    }

    pub(crate) fn insert_waiter(&mut self, event: E, waiter: Arc<Waiter<A>>) {
        self.waiters.entry(event).or_default().push(waiter);
    }

    pub(crate) fn snapshot_waiters(&self, event: &E) -> Vec<Arc<Waiter<A>>> {
        self.waiters.get(event).cloned().unwrap_or_default()
    }

    /// Removes every waiter in `done` from `event`'s list in one pass.
    pub(crate) fn remove_waiters(&mut self, event: &E, done: &[WaiterId]) {
        if done.is_empty() {
            return;
        }
        if let Some(list) = self.waiters.get_mut(event) {
            list.retain(|w| !done.contains(&w.id()));
            if list.is_empty() {
                self.waiters.remove(event);
            }
        }
    }

    pub(crate) fn waiter_count(&self, event: &E) -> usize {
        self.waiters.get(event).map_or(0, Vec::len)
    }

    /// Events that currently have a listener set (possibly empty) or pending waiters.
    pub(crate) fn events(&self) -> Vec<E> {
        let mut events: Vec<E> = self.listeners.keys().cloned().collect();
        for event in self.waiters.keys() {
            if !self.listeners.contains_key(event) {
                events.push(event.clone());
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener<(u8,)> {
        Listener::from_fn(|(_,): (u8,)| {})
    }

    #[test]
    fn insert_deduplicates_by_identity() {
        let mut reg = Registry::<&str, (u8,)>::new();
        let l = noop();

        assert!(reg.insert_listener("a", l.clone()));
        assert!(!reg.insert_listener("a", l.clone()));
        assert!(reg.insert_listener("b", l.clone()));
        assert!(reg.insert_listener("a", noop()));

        assert_eq!(reg.listener_count(&"a"), 2);
        assert_eq!(reg.listener_count(&"b"), 1);
    }

    #[test]
    fn remove_reports_unknown_event_and_listener() {
        let mut reg = Registry::<&str, (u8,)>::new();
        let l = noop();

        assert!(matches!(
            reg.remove_listener(&"a", &l),
            Err(EmitterError::UnknownEvent { .. })
        ));

        reg.insert_listener("a", noop());
        assert_eq!(
            reg.remove_listener(&"a", &l),
            Err(EmitterError::UnknownListener {
                event: "\"a\"".into(),
                listener: l.id(),
            })
        );

        reg.insert_listener("a", l.clone());
        assert_eq!(reg.remove_listener(&"a", &l), Ok(()));
        assert_eq!(reg.listener_count(&"a"), 1);
    }

    #[test]
    fn clear_keeps_other_events() {
        let mut reg = Registry::<&str, (u8,)>::new();
        reg.insert_listener("a", noop());
        reg.insert_listener("b", noop());

        reg.clear_listeners(Some(&"a"));
        reg.clear_listeners(Some(&"missing"));
        assert_eq!(reg.listener_count(&"a"), 0);
        assert_eq!(reg.listener_count(&"b"), 1);

        reg.clear_listeners(None);
        assert_eq!(reg.listener_count(&"b"), 0);
        assert!(reg.events().is_empty());
    }

    #[test]
    fn snapshot_is_detached_from_registry() {
        let mut reg = Registry::<&str, (u8,)>::new();
        let l = noop();
        reg.insert_listener("a", l.clone());

        let snapshot = reg.snapshot_listeners(&"a");
        reg.clear_listeners(None);

        assert_eq!(snapshot, vec![l]);
        assert!(reg.snapshot_listeners(&"a").is_empty());
    }
}
