//! Open/closed state shared by every floating picker.
//!
//! The shell records where the input and the panel were drawn, positions the
//! panel, and owns the document listeners that close it. Listeners only read
//! the shared [`Hitbox`] and dispatch [`Action::ClosePicker`]; the widget
//! reduces that action on the next drain, so state is never touched from
//! inside a callback.

use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::listeners::{DocumentEvent, DocumentListeners, ListenerKind, Subscription};
use crate::position::{PopoverOptions, compute_position};
use ratatui::crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect, Size};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickerId(pub usize);

/// Why a panel closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    OutsideClick,
    Escape,
    Cancel,
    /// Apply / Set Date
    Apply,
    Today,
    /// The input was activated again
    Toggle,
}

/// How long the outside-click listener stays attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerScope {
    WhileOpen,
    Lifetime,
}

/// Caller callback receiving every committed change
pub type OnChange<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Everything handed to a picker by the app it lives in
#[derive(Clone)]
pub struct PickerContext {
    pub dispatcher: Dispatcher,
    pub listeners: DocumentListeners,
}

impl PickerContext {
    pub fn new(dispatcher: Dispatcher, listeners: DocumentListeners) -> Self {
        Self {
            dispatcher,
            listeners,
        }
    }
}

/// Remembers the identity of the last prop value seen, so local state is
/// re-derived only when the caller hands over a different `Arc`.
#[derive(Debug)]
pub struct PropRef<T> {
    current: Option<Arc<T>>,
}

impl<T> Default for PropRef<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> PropRef<T> {
    /// Record `next`; true when it is a different reference than last time
    pub fn update(&mut self, next: Option<&Arc<T>>) -> bool {
        let same = match (&self.current, next) {
            (Some(current), Some(next)) => Arc::ptr_eq(current, next),
            (None, None) => true,
            _ => false,
        };
        if !same {
            self.current = next.cloned();
        }
        !same
    }
}

/// The screen areas that count as "inside" a picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hitbox {
    pub open: bool,
    pub input: Rect,
    pub panel: Option<Rect>,
}

impl Hitbox {
    pub fn contains(&self, pos: Position) -> bool {
        self.input.contains(pos) || self.panel.is_some_and(|panel| panel.contains(pos))
    }
}

pub struct PopoverShell {
    id: PickerId,
    context: PickerContext,
    hitbox: Arc<RwLock<Hitbox>>,
    options: PopoverOptions,
    pointer_scope: ListenerScope,
    pointer_listener: Option<Subscription>,
    key_listener: Option<Subscription>,
}

impl PopoverShell {
    pub fn new(
        id: PickerId,
        context: PickerContext,
        options: PopoverOptions,
        pointer_scope: ListenerScope,
    ) -> Self {
        let mut shell = Self {
            id,
            context,
            hitbox: Arc::new(RwLock::new(Hitbox::default())),
            options,
            pointer_scope,
            pointer_listener: None,
            key_listener: None,
        };
        if pointer_scope == ListenerScope::Lifetime {
            shell.pointer_listener = Some(shell.subscribe_pointer());
        }
        shell
    }

    fn subscribe_pointer(&self) -> Subscription {
        let hitbox = self.hitbox.clone();
        let dispatcher = self.context.dispatcher.clone();
        let picker = self.id;
        self.context
            .listeners
            .subscribe(ListenerKind::PointerDown, move |event| {
                let DocumentEvent::PointerDown(pos) = event else {
                    return;
                };
                let hitbox = hitbox.read().unwrap();
                if hitbox.open && !hitbox.contains(*pos) {
                    dispatcher.dispatch(Action::ClosePicker {
                        picker,
                        reason: CloseReason::OutsideClick,
                    });
                }
            })
    }

    fn subscribe_keys(&self) -> Subscription {
        let hitbox = self.hitbox.clone();
        let dispatcher = self.context.dispatcher.clone();
        let picker = self.id;
        self.context
            .listeners
            .subscribe(ListenerKind::KeyDown, move |event| {
                let DocumentEvent::KeyDown(key) = event else {
                    return;
                };
                if key.code == KeyCode::Esc && hitbox.read().unwrap().open {
                    dispatcher.dispatch(Action::ClosePicker {
                        picker,
                        reason: CloseReason::Escape,
                    });
                }
            })
    }

    pub fn id(&self) -> PickerId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.hitbox.read().unwrap().open
    }

    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.hitbox.write().unwrap().open = true;
        self.key_listener = Some(self.subscribe_keys());
        if self.pointer_listener.is_none() {
            self.pointer_listener = Some(self.subscribe_pointer());
        }
        log::debug!("Picker {:?} opened", self.id);
    }

    pub fn close(&mut self, reason: CloseReason) {
        if !self.is_open() {
            return;
        }
        {
            let mut hitbox = self.hitbox.write().unwrap();
            hitbox.open = false;
            hitbox.panel = None;
        }
        self.key_listener = None;
        if self.pointer_scope == ListenerScope::WhileOpen {
            self.pointer_listener = None;
        }
        log::debug!("Picker {:?} closed ({:?})", self.id, reason);
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close(CloseReason::Toggle);
        } else {
            self.open();
        }
    }

    /// The close reason carried by `action`, if it targets this picker
    pub fn close_request(&self, action: &Action) -> Option<CloseReason> {
        match action {
            Action::ClosePicker { picker, reason } if *picker == self.id => Some(*reason),
            _ => None,
        }
    }

    pub fn set_input_area(&self, area: Rect) {
        self.hitbox.write().unwrap().input = area;
    }

    pub fn input_area(&self) -> Rect {
        self.hitbox.read().unwrap().input
    }

    pub fn input_contains(&self, pos: Position) -> bool {
        self.input_area().contains(pos)
    }

    /// Position a panel of `size` against the input and remember where it went
    pub fn place_panel(&self, size: Size, viewport: Rect) -> Rect {
        let mut hitbox = self.hitbox.write().unwrap();
        let placed = compute_position(hitbox.input, size, viewport, &self.options);
        hitbox.panel = Some(placed.area);
        placed.area
    }

    pub fn panel_area(&self) -> Option<Rect> {
        self.hitbox.read().unwrap().panel
    }

    pub fn panel_contains(&self, pos: Position) -> bool {
        self.panel_area().is_some_and(|panel| panel.contains(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::ActionReceiver;
    use ratatui::crossterm::event::{KeyEvent, KeyModifiers};

    fn shell(scope: ListenerScope) -> (PopoverShell, DocumentListeners, ActionReceiver) {
        let (dispatcher, rx) = Dispatcher::new();
        let listeners = DocumentListeners::new();
        let shell = PopoverShell::new(
            PickerId(7),
            PickerContext::new(dispatcher, listeners.clone()),
            PopoverOptions::range_picker(),
            scope,
        );
        (shell, listeners, rx)
    }

    fn close_reasons(rx: &mut ActionReceiver) -> Vec<CloseReason> {
        rx.drain()
            .into_iter()
            .filter_map(|action| match action {
                Action::ClosePicker { reason, .. } => Some(reason),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_prop_ref_tracks_identity() {
        let mut prop = PropRef::default();
        let first = Arc::new(5);
        assert!(prop.update(Some(&first)));
        assert!(!prop.update(Some(&first.clone())));
        // equal value, different reference
        assert!(prop.update(Some(&Arc::new(5))));
        assert!(prop.update(None));
        assert!(!prop.update(None));
    }

    #[test]
    fn test_listeners_follow_open_state() {
        let (mut shell, listeners, _rx) = shell(ListenerScope::WhileOpen);
        assert!(listeners.is_empty());

        shell.open();
        assert_eq!(listeners.count(ListenerKind::PointerDown), 1);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 1);

        shell.close(CloseReason::Apply);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_lifetime_pointer_listener_survives_close() {
        let (mut shell, listeners, _rx) = shell(ListenerScope::Lifetime);
        assert_eq!(listeners.count(ListenerKind::PointerDown), 1);

        shell.open();
        shell.close(CloseReason::Cancel);
        assert_eq!(listeners.count(ListenerKind::PointerDown), 1);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 0);

        drop(shell);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_outside_click_requests_close() {
        let (mut shell, listeners, mut rx) = shell(ListenerScope::Lifetime);
        shell.set_input_area(Rect::new(0, 0, 20, 3));
        shell.open();
        shell.place_panel(Size::new(30, 10), Rect::new(0, 0, 80, 24));

        listeners.emit(&DocumentEvent::PointerDown(Position::new(5, 1)));
        listeners.emit(&DocumentEvent::PointerDown(Position::new(25, 8)));
        assert!(close_reasons(&mut rx).is_empty());

        listeners.emit(&DocumentEvent::PointerDown(Position::new(60, 20)));
        assert_eq!(close_reasons(&mut rx), vec![CloseReason::OutsideClick]);
    }

    #[test]
    fn test_closed_shell_ignores_clicks() {
        let (shell, listeners, mut rx) = shell(ListenerScope::Lifetime);
        shell.set_input_area(Rect::new(0, 0, 20, 3));
        listeners.emit(&DocumentEvent::PointerDown(Position::new(60, 20)));
        assert!(close_reasons(&mut rx).is_empty());
    }

    #[test]
    fn test_escape_requests_close() {
        let (mut shell, listeners, mut rx) = shell(ListenerScope::WhileOpen);
        shell.open();
        listeners.emit(&DocumentEvent::KeyDown(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )));
        listeners.emit(&DocumentEvent::KeyDown(KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE,
        )));

        let actions = rx.drain();
        assert_eq!(actions.len(), 1);
        assert_eq!(shell.close_request(&actions[0]), Some(CloseReason::Escape));
        // still open until the action is reduced
        assert!(shell.is_open());
    }

    #[test]
    fn test_toggle() {
        let (mut shell, _listeners, _rx) = shell(ListenerScope::WhileOpen);
        shell.toggle();
        assert!(shell.is_open());
        shell.toggle();
        assert!(!shell.is_open());
        assert_eq!(shell.panel_area(), None);
    }
}
