//! Reactive state containers for the view layer.
//!
//! Each UI-bound value lives in a named [`Slot`]: an observable holder the
//! view-model writes and the (external) view subscribes to. Slots are built
//! on `tokio::sync::watch`, so every `set` notifies subscribers even when
//! the new value compares equal to the old one. The store is injected into
//! handlers rather than living as a module-level singleton.

use tokio::sync::watch;

use crate::model::TextRecord;

/// A single observable value slot.
#[derive(Debug)]
pub struct Slot<T> {
    tx: watch::Sender<T>,
}

impl<T> Slot<T> {
    pub fn new(initial: T) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    /// Current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Replace the value, notifying all subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate the value in place, notifying all subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Watch for changes. The receiver sees the value current at the time
    /// of subscription as already observed.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// All UI-bound state for one annotation session.
#[derive(Debug, Default)]
pub struct SessionStore {
    // -------- Inputs --------
    pub input_text: Slot<String>,
    pub input_tags: Slot<String>,
    pub selected_tag: Slot<Option<String>>,
    pub selected_text_tag: Slot<Option<String>>,

    // -------- Filter --------
    pub filter_text: Slot<String>,
    pub filter_tags: Slot<String>,

    // -------- Cached server data --------
    pub text_list: Slot<Vec<TextRecord>>,
    pub available_tags: Slot<Vec<String>>,
    pub available_text_tags: Slot<Vec<String>>,

    // -------- NLP --------
    pub nlp_query: Slot<String>,
    pub nlp_result: Slot<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_get_set_update() {
        let slot = Slot::new(String::from("a"));
        assert_eq!(slot.get(), "a");

        slot.set("b".to_string());
        assert_eq!(slot.get(), "b");

        slot.update(|v| v.push('c'));
        assert_eq!(slot.get(), "bc");
    }

    #[tokio::test]
    async fn test_slot_notifies_on_every_set() {
        let slot = Slot::new(vec![1, 2]);
        let mut rx = slot.subscribe();
        assert!(!rx.has_changed().unwrap());

        // Same contents, new value: observers still fire.
        slot.set(vec![1, 2]);
        assert!(rx.has_changed().unwrap());

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_store_defaults_empty() {
        let store = SessionStore::new();
        assert!(store.input_text.get().is_empty());
        assert!(store.selected_tag.get().is_none());
        assert!(store.text_list.get().is_empty());
        assert!(store.available_tags.get().is_empty());
    }
}
