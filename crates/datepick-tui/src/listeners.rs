//! Document-level event listeners.
//!
//! The app loop emits every pointer-down and key-down here before routing
//! the event to the focused widget. Widgets subscribe while they need to see
//! events that land outside their own area (an open panel watching for
//! outside clicks or Escape). A [`Subscription`] is a guard: dropping it
//! detaches the listener, so a listener can never outlive the widget state
//! that registered it.

use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Position;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
}

#[derive(Debug, Clone)]
pub enum DocumentEvent {
    PointerDown(Position),
    KeyDown(KeyEvent),
}

impl DocumentEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::PointerDown(_) => ListenerKind::PointerDown,
            Self::KeyDown(_) => ListenerKind::KeyDown,
        }
    }
}

type Callback = Arc<dyn Fn(&DocumentEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: BTreeMap<u64, (ListenerKind, Callback)>,
}

#[derive(Clone, Default)]
pub struct DocumentListeners {
    registry: Arc<RwLock<Registry>>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: ListenerKind, callback: F) -> Subscription
    where
        F: Fn(&DocumentEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.write().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.insert(id, (kind, Arc::new(callback)));
        log::debug!("Attached {:?} listener #{}", kind, id);

        Subscription {
            id,
            kind,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Run every listener registered for the event's kind, in subscription
    /// order. The registry lock is released before callbacks run.
    pub fn emit(&self, event: &DocumentEvent) {
        let kind = event.kind();
        let callbacks: Vec<Callback> = self
            .registry
            .read()
            .unwrap()
            .entries
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, cb)| cb.clone())
            .collect();

        for callback in callbacks {
            callback(event);
        }
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.registry
            .read()
            .unwrap()
            .entries
            .values()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().unwrap().entries.is_empty()
    }
}

#[must_use = "dropping a Subscription detaches its listener"]
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
    registry: Weak<RwLock<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.write() {
                registry.entries.remove(&self.id);
                log::debug!("Detached {:?} listener #{}", self.kind, self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_reaches_matching_kind_only() {
        let listeners = DocumentListeners::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let _sub = listeners.subscribe(ListenerKind::KeyDown, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        listeners.emit(&DocumentEvent::PointerDown(Position::new(1, 1)));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        listeners.emit(&DocumentEvent::KeyDown(KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE,
        )));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_detaches() {
        let listeners = DocumentListeners::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let sub = listeners.subscribe(ListenerKind::PointerDown, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(listeners.count(ListenerKind::PointerDown), 1);

        drop(sub);
        assert!(listeners.is_empty());
        listeners.emit(&DocumentEvent::PointerDown(Position::new(0, 0)));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_outliving_registry() {
        let listeners = DocumentListeners::new();
        let sub = listeners.subscribe(ListenerKind::KeyDown, |_| {});
        drop(listeners);
        // nothing left to detach from
        drop(sub);
    }
}
