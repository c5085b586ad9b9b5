/// Keyboard input handling and key mapping
use crate::actions::{Action, SectionId};
use crate::stores::UIStore;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to a page-level Action. Returns None when the key belongs to
/// the widget of the active section, which is always the case while its
/// panel is open.
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_store: &UIStore,
    picker_open: bool,
) -> Option<Action> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c'))
    {
        return Some(Action::Quit);
    }
    if picker_open {
        return None;
    }

    let ui_state = ui_store.get_state();
    if ui_state.show_help && matches!(key_event.code, KeyCode::Esc) {
        return Some(Action::ToggleHelp);
    }

    match key_event.code {
        // Global keys
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),

        // Section switching
        KeyCode::Tab => Some(Action::NextSection),
        KeyCode::BackTab => Some(Action::PreviousSection),
        KeyCode::Char(c @ '1'..='8') => {
            let index = c as isize - '1' as isize;
            Some(Action::FocusSection(SectionId::from_index(index)))
        }

        _ => None,
    }
}

/// Key bindings listed in the help overlay
pub fn help_lines() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab / Shift-Tab", "Next / previous section (panel closed)"),
        ("1-8", "Jump to a section"),
        ("Enter / Space", "Open the picker or select the day under the cursor"),
        ("Arrows / hjkl", "Move the calendar cursor"),
        ("PgUp / PgDn", "Previous / next month"),
        ("Tab (panel open)", "Cycle presets, calendar, fields and buttons"),
        ("Esc / click outside", "Close the panel"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_global_keys() {
        let store = UIStore::new();
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('q')), &store, false),
            Some(Action::Quit)
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::Char('3')), &store, false),
            Some(Action::FocusSection(SectionId::RangeThreeMonths))
        ));
        assert!(matches!(
            handle_key_event(key(KeyCode::BackTab), &store, false),
            Some(Action::PreviousSection)
        ));
        assert!(handle_key_event(key(KeyCode::Char('9')), &store, false).is_none());
        assert!(handle_key_event(key(KeyCode::Enter), &store, false).is_none());
    }

    #[test]
    fn test_open_picker_receives_everything() {
        let store = UIStore::new();
        assert!(handle_key_event(key(KeyCode::Char('q')), &store, true).is_none());
        assert!(handle_key_event(key(KeyCode::Tab), &store, true).is_none());
        assert!(matches!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &store,
                true
            ),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_escape_hides_help() {
        let store = UIStore::new();
        assert!(handle_key_event(key(KeyCode::Esc), &store, false).is_none());
        store.reduce(&Action::ToggleHelp);
        assert!(matches!(
            handle_key_event(key(KeyCode::Esc), &store, false),
            Some(Action::ToggleHelp)
        ));
    }
}
