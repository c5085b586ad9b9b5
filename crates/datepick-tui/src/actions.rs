/// Core Action types for the flux architecture.
/// All state mutations that cross widget boundaries flow through Actions
/// dispatched to the Dispatcher.
use crate::pickers::{CloseReason, PickerId};
use chrono::{NaiveDate, NaiveDateTime};
use datepick_core::RangeSelection;

#[derive(Debug, Clone)]
pub enum Action {
    // ===== UI Actions (user-initiated) =====
    /// User jumped to a demo section
    FocusSection(SectionId),

    NextSection,

    PreviousSection,

    /// User toggled the help overlay
    ToggleHelp,

    // ===== Picker Actions (emitted by widgets and their listeners) =====
    /// A document listener decided a picker's panel must close
    ClosePicker {
        picker: PickerId,
        reason: CloseReason,
    },

    /// The inline calendar picked a day
    DateSelected { picker: PickerId, date: NaiveDate },

    /// A range picker reported a new selection
    RangeChanged {
        picker: PickerId,
        selection: RangeSelection,
    },

    /// A date-time picker reported a new value
    DateTimeChanged {
        picker: PickerId,
        value: NaiveDateTime,
    },

    /// Application should exit
    Quit,
}

/// The sections of the demo page, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionId {
    #[default]
    DefaultCalendar,
    RangeTwoMonths,
    RangeThreeMonths,
    DateTime,
    DateOnly,
    CustomDate,
    CustomRange,
    CustomDateTime,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        Self::DefaultCalendar,
        Self::RangeTwoMonths,
        Self::RangeThreeMonths,
        Self::DateTime,
        Self::DateOnly,
        Self::CustomDate,
        Self::CustomRange,
        Self::CustomDateTime,
    ];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Section at `index`, wrapping in both directions
    pub fn from_index(index: isize) -> Self {
        let len = Self::ALL.len() as isize;
        Self::ALL[index.rem_euclid(len) as usize]
    }

    pub fn next(&self) -> Self {
        Self::from_index(self.index() as isize + 1)
    }

    pub fn previous(&self) -> Self {
        Self::from_index(self.index() as isize - 1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::DefaultCalendar => "Default Date Picker",
            Self::RangeTwoMonths => "Date Range Picker (2 Months)",
            Self::RangeThreeMonths => "Date Range Picker (3 Months)",
            Self::DateTime => "DateTime Picker",
            Self::DateOnly => "DateTime Picker (Date Only)",
            Self::CustomDate => "Custom Date Input",
            Self::CustomRange => "Custom Range Input",
            Self::CustomDateTime => "Custom DateTime Input",
        }
    }

    /// Short label for the tab bar
    pub fn tab_label(&self) -> &'static str {
        match self {
            Self::DefaultCalendar => "Calendar",
            Self::RangeTwoMonths => "Range",
            Self::RangeThreeMonths => "Range x3",
            Self::DateTime => "DateTime",
            Self::DateOnly => "Date Only",
            Self::CustomDate => "Custom Date",
            Self::CustomRange => "Custom Range",
            Self::CustomDateTime => "Custom DateTime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_navigation_wraps() {
        assert_eq!(SectionId::DefaultCalendar.previous(), SectionId::CustomDateTime);
        assert_eq!(SectionId::CustomDateTime.next(), SectionId::DefaultCalendar);
        assert_eq!(SectionId::DateTime.index(), 3);
        assert_eq!(SectionId::from_index(4), SectionId::DateOnly);
    }
}
