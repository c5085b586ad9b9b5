/// Preset ranges offered next to the range calendar
use crate::calendar::{add_months, end_of_month, end_of_week, first_of_month, start_of_week};
use crate::range::Range;
use chrono::{Days, Duration, NaiveDate};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticRangeKind {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

/// A one-click preset resolved against "today"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRange {
    pub label: &'static str,
    pub kind: StaticRangeKind,
}

impl StaticRange {
    pub fn new(label: &'static str, kind: StaticRangeKind) -> Self {
        Self { label, kind }
    }

    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self.kind {
            StaticRangeKind::Today => (today, today),
            StaticRangeKind::Yesterday => {
                let yesterday = today.pred_opt().unwrap_or(today);
                (yesterday, yesterday)
            }
            StaticRangeKind::ThisWeek => (start_of_week(today), end_of_week(today)),
            StaticRangeKind::LastWeek => {
                let last_week = today.checked_sub_days(Days::new(7)).unwrap_or(today);
                (start_of_week(last_week), end_of_week(last_week))
            }
            StaticRangeKind::ThisMonth => (first_of_month(today), end_of_month(today)),
            StaticRangeKind::LastMonth => {
                let last_month = add_months(first_of_month(today), -1);
                (last_month, end_of_month(last_month))
            }
        }
    }

    pub fn is_selected(&self, range: &Range, today: NaiveDate) -> bool {
        let (start, end) = self.range(today);
        range.start_date == Some(start) && range.end_date == Some(end)
    }
}

pub fn default_static_ranges() -> Vec<StaticRange> {
    vec![
        StaticRange::new("Today", StaticRangeKind::Today),
        StaticRange::new("Yesterday", StaticRangeKind::Yesterday),
        StaticRange::new("This Week", StaticRangeKind::ThisWeek),
        StaticRange::new("Last Week", StaticRangeKind::LastWeek),
        StaticRange::new("This Month", StaticRangeKind::ThisMonth),
        StaticRange::new("Last Month", StaticRangeKind::LastMonth),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRangeKind {
    DaysUpToToday,
    DaysStartingToday,
}

/// A preset driven by a typed number of days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRange {
    pub label: &'static str,
    pub kind: InputRangeKind,
}

/// What an input preset's number field shows for the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRangeValue {
    Days(i64),
    /// anchored correctly but open-ended
    Unbounded,
    /// the selection isn't anchored on today
    NotApplicable,
}

impl fmt::Display for InputRangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}"),
            Self::Unbounded => write!(f, "∞"),
            Self::NotApplicable => write!(f, "-"),
        }
    }
}

impl InputRange {
    pub fn new(label: &'static str, kind: InputRangeKind) -> Self {
        Self { label, kind }
    }

    /// Anything below one day is treated as one day. `None` when the span
    /// runs past the dates chrono can represent.
    pub fn range(&self, days: i64, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let span = Duration::try_days(days.max(1) - 1)?;
        match self.kind {
            InputRangeKind::DaysUpToToday => Some((today.checked_sub_signed(span)?, today)),
            InputRangeKind::DaysStartingToday => Some((today, today.checked_add_signed(span)?)),
        }
    }

    pub fn current_value(&self, range: &Range, today: NaiveDate) -> InputRangeValue {
        let (anchor, other) = match self.kind {
            InputRangeKind::DaysUpToToday => (range.end_date, range.start_date),
            InputRangeKind::DaysStartingToday => (range.start_date, range.end_date),
        };
        if anchor != Some(today) {
            return InputRangeValue::NotApplicable;
        }
        match other {
            Some(other) => InputRangeValue::Days((today - other).num_days().abs() + 1),
            None => InputRangeValue::Unbounded,
        }
    }
}

pub fn default_input_ranges() -> Vec<InputRange> {
    vec![
        InputRange::new("days up to today", InputRangeKind::DaysUpToToday),
        InputRange::new("days starting today", InputRangeKind::DaysStartingToday),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn preset(kind: StaticRangeKind) -> StaticRange {
        default_static_ranges()
            .into_iter()
            .find(|s| s.kind == kind)
            .unwrap()
    }

    #[test]
    fn test_static_ranges() {
        let today = d(2026, 10, 16);
        assert_eq!(preset(StaticRangeKind::Today).range(today), (today, today));
        assert_eq!(
            preset(StaticRangeKind::Yesterday).range(today),
            (d(2026, 10, 15), d(2026, 10, 15))
        );
        assert_eq!(
            preset(StaticRangeKind::ThisWeek).range(today),
            (d(2026, 10, 11), d(2026, 10, 17))
        );
        assert_eq!(
            preset(StaticRangeKind::LastWeek).range(today),
            (d(2026, 10, 4), d(2026, 10, 10))
        );
        assert_eq!(
            preset(StaticRangeKind::LastMonth).range(d(2026, 3, 31)),
            (d(2026, 2, 1), d(2026, 2, 28))
        );
    }

    #[test]
    fn test_is_selected() {
        let today = d(2026, 10, 16);
        let range = Range::new(d(2026, 10, 1), d(2026, 10, 31), "selection");
        assert!(preset(StaticRangeKind::ThisMonth).is_selected(&range, today));
        assert!(!preset(StaticRangeKind::ThisWeek).is_selected(&range, today));
    }

    #[test]
    fn test_input_range_days_up_to_today() {
        let today = d(2026, 10, 16);
        let input = InputRange::new("days up to today", InputRangeKind::DaysUpToToday);
        assert_eq!(input.range(7, today), Some((d(2026, 10, 10), today)));
        // zero and negative values collapse to a single day
        assert_eq!(input.range(0, today), Some((today, today)));

        let range = Range::new(d(2026, 10, 10), today, "selection");
        assert_eq!(input.current_value(&range, today), InputRangeValue::Days(7));
        let off = Range::new(d(2026, 10, 10), d(2026, 10, 12), "selection");
        assert_eq!(input.current_value(&off, today).to_string(), "-");
    }

    #[test]
    fn test_input_range_days_starting_today() {
        let today = d(2026, 10, 16);
        let input = InputRange::new("days starting today", InputRangeKind::DaysStartingToday);
        assert_eq!(input.range(3, today), Some((today, d(2026, 10, 18))));

        let mut open = Range::empty("selection");
        open.start_date = Some(today);
        assert_eq!(input.current_value(&open, today).to_string(), "∞");
    }

    #[test]
    fn test_input_range_out_of_calendar_bounds() {
        let today = d(2026, 10, 16);
        for input in default_input_ranges() {
            assert_eq!(input.range(999_999_999, today), None);
            assert_eq!(input.range(i64::MAX, today), None);
        }
        // the widest span chrono can still hold
        let last = InputRange::new("days starting today", InputRangeKind::DaysStartingToday);
        let span = (NaiveDate::MAX - today).num_days() + 1;
        assert_eq!(last.range(span, today), Some((today, NaiveDate::MAX)));
        assert_eq!(last.range(span + 1, today), None);
    }
}
