/// DemoStore holds the values the demo page passes to its pickers.
///
/// Each value is kept behind an `Arc`; every accepted change allocates a new
/// one so the pickers see a new reference and re-derive their local state.
use crate::actions::Action;
use chrono::{Local, NaiveDate, NaiveDateTime};
use datepick_core::Range;
use std::sync::{Arc, RwLock};

/// Internal state for the demo page
#[derive(Debug, Clone)]
pub struct DemoState {
    /// Shared by the calendar sections
    pub date: Arc<NaiveDate>,

    /// Shared by the range sections; always one entry
    pub ranges: Arc<Vec<Range>>,

    /// Shared by the date-time sections
    pub date_time: Arc<NaiveDateTime>,
}

impl DemoState {
    pub fn starting_at(now: NaiveDateTime) -> Self {
        let today = now.date();
        Self {
            date: Arc::new(today),
            ranges: Arc::new(vec![Range::new(today, today, "selection")]),
            date_time: Arc::new(now),
        }
    }

    pub fn range(&self) -> Option<&Range> {
        self.ranges.first()
    }
}

impl Default for DemoState {
    fn default() -> Self {
        Self::starting_at(Local::now().naive_local())
    }
}

#[derive(Clone)]
pub struct DemoStore {
    state: Arc<RwLock<DemoState>>,
}

impl DemoStore {
    pub fn new() -> Self {
        Self::with_state(DemoState::default())
    }

    pub fn with_state(state: DemoState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> DemoState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::DateSelected { date, .. } => {
                state.date = Arc::new(*date);
            }

            Action::RangeChanged { selection, .. } => {
                // keep the first range reported, as the page only tracks one
                if let Some(range) = selection.values().next() {
                    state.ranges = Arc::new(vec![range.clone()]);
                }
            }

            Action::DateTimeChanged { value, .. } => {
                state.date_time = Arc::new(*value);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pickers::PickerId;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn store() -> DemoStore {
        DemoStore::with_state(DemoState::starting_at(
            d(2026, 10, 16).and_hms_opt(9, 30, 0).unwrap(),
        ))
    }

    #[test]
    fn test_initial_state_is_today() {
        let state = store().get_state();
        assert_eq!(*state.date, d(2026, 10, 16));
        assert_eq!(state.range().unwrap().start_date, Some(d(2026, 10, 16)));
        assert_eq!(state.range().unwrap().end_date, Some(d(2026, 10, 16)));
    }

    #[test]
    fn test_range_change_replaces_reference() {
        let store = store();
        let before = store.get_state().ranges;
        let selection = Range::new(d(2026, 10, 1), d(2026, 10, 9), "selection").into_selection();
        store.reduce(&Action::RangeChanged {
            picker: PickerId(1),
            selection,
        });

        let after = store.get_state().ranges;
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(after[0].end_date, Some(d(2026, 10, 9)));
    }

    #[test]
    fn test_empty_selection_ignored() {
        let store = store();
        let before = store.get_state().ranges;
        store.reduce(&Action::RangeChanged {
            picker: PickerId(1),
            selection: Default::default(),
        });
        assert!(Arc::ptr_eq(&before, &store.get_state().ranges));
    }

    #[test]
    fn test_date_and_date_time_changes() {
        let store = store();
        store.reduce(&Action::DateSelected {
            picker: PickerId(0),
            date: d(2026, 12, 25),
        });
        let at = d(2027, 1, 2).and_hms_opt(18, 45, 0).unwrap();
        store.reduce(&Action::DateTimeChanged {
            picker: PickerId(3),
            value: at,
        });

        let state = store.get_state();
        assert_eq!(*state.date, d(2026, 12, 25));
        assert_eq!(*state.date_time, at);
    }
}
