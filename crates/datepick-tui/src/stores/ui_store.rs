/// UIStore manages UI-specific state (active section, help visibility, etc.)
use crate::actions::{Action, SectionId};
use std::sync::{Arc, RwLock};

/// Internal state for UI
#[derive(Debug, Clone, Default)]
pub struct UIState {
    /// Demo section currently shown
    pub active_section: SectionId,

    /// Whether help overlay is visible
    pub show_help: bool,

    /// Whether the application should exit
    pub should_exit: bool,
}

/// Store that holds UI-related state
#[derive(Clone)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
}

impl UIStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(UIState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UIState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::FocusSection(section) => {
                state.active_section = *section;
            }

            Action::NextSection => {
                state.active_section = state.active_section.next();
            }

            Action::PreviousSection => {
                state.active_section = state.active_section.previous();
            }

            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }

            Action::Quit => {
                state.should_exit = true;
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    pub fn active_section(&self) -> SectionId {
        self.state.read().unwrap().active_section
    }

    /// Check if the application should exit
    pub fn should_exit(&self) -> bool {
        self.state.read().unwrap().should_exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let store = UIStore::new();
        let state = store.get_state();
        assert_eq!(state.active_section, SectionId::DefaultCalendar);
        assert_eq!(state.show_help, false);
        assert_eq!(state.should_exit, false);
    }

    #[test]
    fn test_section_switching() {
        let store = UIStore::new();
        store.reduce(&Action::FocusSection(SectionId::DateOnly));
        assert_eq!(store.active_section(), SectionId::DateOnly);

        store.reduce(&Action::NextSection);
        assert_eq!(store.active_section(), SectionId::CustomDate);

        store.reduce(&Action::FocusSection(SectionId::DefaultCalendar));
        store.reduce(&Action::PreviousSection);
        assert_eq!(store.active_section(), SectionId::CustomDateTime);
    }

    #[test]
    fn test_toggle_help() {
        let store = UIStore::new();

        store.reduce(&Action::ToggleHelp);
        assert_eq!(store.get_state().show_help, true);

        store.reduce(&Action::ToggleHelp);
        assert_eq!(store.get_state().show_help, false);
    }

    #[test]
    fn test_quit() {
        let store = UIStore::new();
        store.reduce(&Action::Quit);

        assert_eq!(store.should_exit(), true);
    }
}
