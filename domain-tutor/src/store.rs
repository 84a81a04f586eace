//! Storage of the sessions of every conversation.

use crate::session::Session;
use parking_lot::{Mutex, RwLock};
use std::{collections::HashMap, sync::Arc};

/// Holds at most one [`Session`] per conversation identifier.
///
/// Implementations must run each [`SessionStore::update`] atomically with respect to other
/// updates of the same conversation. Updates of different conversations must not wait on each
/// other.
pub trait SessionStore: Send + Sync {
    /// Runs `f` on the session slot of the conversation, which is [`None`] if the conversation has
    /// no session. Whatever `f` leaves in the slot is stored.
    fn update<R>(&self, conversation_id: &str, f: impl FnOnce(&mut Option<Session>) -> R) -> R;

    /// Returns a copy of the conversation's session.
    fn get(&self, conversation_id: &str) -> Option<Session> {
        self.update(conversation_id, |slot| slot.clone())
    }

    /// Stores the session, replacing any previous one.
    fn put(&self, conversation_id: &str, session: Session) {
        self.update(conversation_id, |slot| *slot = Some(session));
    }

    /// Removes the conversation's session and returns it.
    fn delete(&self, conversation_id: &str) -> Option<Session> {
        self.update(conversation_id, Option::take)
    }
}

type Slot = Arc<Mutex<Option<Session>>>;

/// A [`SessionStore`] that keeps sessions in memory, with one lock per conversation.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slots: RwLock<HashMap<String, Slot>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot of the conversation, creating it if needed.
    fn slot(&self, conversation_id: &str) -> Slot {
        if let Some(slot) = self.slots.read().get(conversation_id) {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write();
        Arc::clone(slots.entry(conversation_id.to_string()).or_default())
    }

    /// Drops the entry of the conversation if its slot is empty and no turn holds it.
    ///
    /// Every turn calls this after releasing its handle to the slot, so the last turn to leave an
    /// empty slot removes it.
    fn remove_if_vacant(&self, conversation_id: &str) {
        // with the map locked, a count of 1 means no turn can reach the slot any more
        let vacant = |slots: &HashMap<String, Slot>| slots.get(conversation_id).is_some_and(|slot| {
            Arc::strong_count(slot) == 1 && slot.try_lock().is_some_and(|session| session.is_none())
        });

        if !vacant(&*self.slots.read()) {
            return;
        }

        let mut slots = self.slots.write();
        if vacant(&*slots) {
            slots.remove(conversation_id);
        }
    }

    /// The number of conversations that currently have a session.
    pub fn active_sessions(&self) -> usize {
        self.slots.read()
            .values()
            .filter(|slot| slot.lock().is_some())
            .count()
    }

    /// The number of conversations the store keeps an entry for.
    pub fn tracked_conversations(&self) -> usize {
        self.slots.read().len()
    }
}

impl SessionStore for InMemoryStore {
    fn update<R>(&self, conversation_id: &str, f: impl FnOnce(&mut Option<Session>) -> R) -> R {
        let slot = self.slot(conversation_id);
        let result = f(&mut *slot.lock());

        drop(slot);
        self.remove_if_vacant(conversation_id);
        result
    }

    fn get(&self, conversation_id: &str) -> Option<Session> {
        // read under the map lock, so that no handle to the slot outlives the call
        self.slots.read().get(conversation_id).and_then(|slot| slot.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use domain_solve::component::extract;
    use super::*;

    fn session() -> Session {
        Session::new("sqrt(x)".to_string(), extract("sqrt(x)").unwrap()).0
    }

    #[test]
    fn put_get_delete() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("a"), None);

        store.put("a", session());
        assert_eq!(store.get("a"), Some(session()));
        assert_eq!(store.get("b"), None);
        assert_eq!(store.active_sessions(), 1);

        assert_eq!(store.delete("a"), Some(session()));
        assert_eq!(store.get("a"), None);
        assert_eq!(store.active_sessions(), 0);
    }

    #[test]
    fn update_returns_the_closure_result() {
        let store = InMemoryStore::new();
        store.put("a", session());
        let cursor = store.update("a", |slot| slot.as_ref().map(Session::cursor));
        assert_eq!(cursor, Some(0));
    }

    #[test]
    fn empty_slots_are_dropped() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("a"), None);
        assert!(store.update("b", |slot| slot.is_none()));
        assert_eq!(store.tracked_conversations(), 0);

        store.put("a", session());
        store.put("b", session());
        assert_eq!(store.tracked_conversations(), 2);

        store.delete("a");
        store.update("b", |slot| *slot = None);
        assert_eq!(store.tracked_conversations(), 0);
        assert_eq!(store.active_sessions(), 0);
    }

    #[test]
    fn concurrent_turns_leave_no_entry() {
        let store = InMemoryStore::new();
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        store.put("a", session());
                        store.update("a", |slot| slot.as_ref().map(Session::ask_condition));
                        store.delete("a");
                    }
                });
            }
        });
        assert_eq!(store.tracked_conversations(), 0);
    }
}
