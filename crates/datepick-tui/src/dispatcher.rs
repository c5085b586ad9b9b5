/// Central dispatcher for the flux architecture.
/// Widgets, listeners and key handlers send Actions here; the app loop
/// drains them and hands each one to the stores and widgets.
use crate::actions::Action;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn new() -> (Self, ActionReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, ActionReceiver { rx })
    }

    /// Queue an action. Safe to call from inside listener callbacks since
    /// nothing is reduced until the loop drains the receiver.
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.tx.send(action) {
            log::error!("Failed to dispatch action {:?}: receiver dropped", e.0);
        }
    }
}

pub struct ActionReceiver {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionReceiver {
    /// Wait for the next action
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }

    /// Everything queued right now, without waiting
    pub fn drain(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let (dispatcher, mut rx) = Dispatcher::new();
        dispatcher.dispatch(Action::NextSection);
        dispatcher.dispatch(Action::Quit);

        let drained = rx.drain();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], Action::NextSection));
        assert!(matches!(drained[1], Action::Quit));
        assert!(rx.drain().is_empty());
    }
}
