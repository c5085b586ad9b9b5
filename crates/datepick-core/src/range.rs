/// Named date ranges and the selection math used by the range surface
use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key used when a picker is created without caller-supplied ranges
pub const DEFAULT_RANGE_KEY: &str = "selection";

/// Payload handed to range `on_change` callbacks, keyed by range key
pub type RangeSelection = BTreeMap<String, Range>;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub key: String,
    /// Whether focus may advance into this range after a selection
    #[serde(default = "default_true")]
    pub auto_focus: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl Range {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, key: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            key: key.into(),
            auto_focus: true,
            disabled: false,
        }
    }

    /// A range with no boundaries picked yet
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            start_date: None,
            end_date: None,
            key: key.into(),
            auto_focus: true,
            disabled: false,
        }
    }

    /// today/today under the default key
    pub fn today() -> Self {
        let today = Local::now().date_naive();
        Self::new(today, today, DEFAULT_RANGE_KEY)
    }

    pub fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    pub fn is_edge(&self, date: NaiveDate) -> bool {
        self.start_date == Some(date) || self.end_date == Some(date)
    }

    /// Wrap this range into the payload shape callers receive
    pub fn into_selection(self) -> RangeSelection {
        let mut selection = RangeSelection::new();
        selection.insert(self.key.clone(), self);
        selection
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    #[default]
    Start,
    End,
}

/// Which range, and which of its endpoints, the next click edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusedRange {
    pub range_index: usize,
    pub boundary: Boundary,
}

impl FocusedRange {
    pub fn new(range_index: usize, boundary: Boundary) -> Self {
        Self {
            range_index,
            boundary,
        }
    }

    /// `[range_index, boundary_index]` with start = 0 and end = 1
    pub fn as_pair(&self) -> [usize; 2] {
        let boundary = match self.boundary {
            Boundary::Start => 0,
            Boundary::End => 1,
        };
        [self.range_index, boundary]
    }
}

/// Knobs that change how a clicked day becomes a range
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionOptions {
    /// Keep the previous span and move it to start at the clicked day
    pub move_range_on_first_selection: bool,
    /// Keep the old end date when the clicked day is before it
    pub retain_end_date_on_first_selection: bool,
    pub max_date: Option<NaiveDate>,
    pub disabled_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSelection {
    pub range: Range,
    pub next_focus: FocusedRange,
}

fn focusable(range: &Range) -> bool {
    range.auto_focus && !range.disabled
}

/// Index of the next range that can take focus after `current`, wrapping
/// around to the first focusable one.
pub fn find_next_range_index(ranges: &[Range], current: Option<usize>) -> Option<usize> {
    let after = ranges
        .iter()
        .enumerate()
        .find(|(i, r)| current.map_or(true, |c| *i > c) && focusable(r))
        .map(|(i, _)| i);

    after.or_else(|| ranges.iter().position(focusable))
}

/// Turn a clicked day into the updated focused range.
///
/// Editing the start boundary collapses the range onto the clicked day and
/// moves focus to the end boundary; editing the end boundary completes the
/// range and hands focus to the next focusable range. Boundaries are swapped
/// when they end up reversed, and disabled days inside the result trim the
/// side that was being edited.
pub fn calc_new_selection(
    ranges: &[Range],
    focused: FocusedRange,
    value: NaiveDate,
    options: &SelectionOptions,
    today: NaiveDate,
) -> Option<NewSelection> {
    let current = ranges.get(focused.range_index)?;

    let (mut start_date, mut end_date, mut next_focus) = match focused.boundary {
        Boundary::Start => {
            let end = if options.move_range_on_first_selection {
                let offset = current.end_date.unwrap_or(today)
                    - current.start_date.unwrap_or(today);
                value.checked_add_signed(offset).unwrap_or(if offset < Duration::zero() {
                    NaiveDate::MIN
                } else {
                    NaiveDate::MAX
                })
            } else if options.retain_end_date_on_first_selection {
                match current.end_date {
                    Some(end) if value < end => end,
                    _ => value,
                }
            } else {
                value
            };
            let end = match options.max_date {
                Some(max) => end.min(max),
                None => end,
            };
            (
                value,
                end,
                Some(FocusedRange::new(focused.range_index, Boundary::End)),
            )
        }
        Boundary::End => (current.start_date.unwrap_or(value), value, None),
    };

    let mut start_selected = focused.boundary == Boundary::Start;
    if end_date < start_date {
        start_selected = !start_selected;
        std::mem::swap(&mut start_date, &mut end_date);
    }

    let blocked: Vec<NaiveDate> = options
        .disabled_dates
        .iter()
        .copied()
        .filter(|d| start_date <= *d && *d <= end_date)
        .collect();
    if !blocked.is_empty() {
        if start_selected {
            if let Some(last) = blocked.iter().max() {
                start_date = last.succ_opt().unwrap_or(*last);
            }
        } else if let Some(first) = blocked.iter().min() {
            end_date = first.pred_opt().unwrap_or(*first);
        }
    }

    if next_focus.is_none() {
        let next_index =
            find_next_range_index(ranges, Some(focused.range_index)).unwrap_or(focused.range_index);
        next_focus = Some(FocusedRange::new(next_index, Boundary::Start));
    }

    Some(NewSelection {
        range: Range {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..current.clone()
        },
        next_focus: next_focus.unwrap_or(focused),
    })
}

/// Replace both boundaries of the focused range, as preset buttons do.
/// Ranges without a key are named `range{n}` after their 1-based position.
pub fn apply_preset(
    ranges: &[Range],
    focused: FocusedRange,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> RangeSelection {
    let mut range = ranges
        .get(focused.range_index)
        .cloned()
        .unwrap_or_else(|| Range::empty(DEFAULT_RANGE_KEY));
    if range.key.is_empty() {
        range.key = format!("range{}", focused.range_index + 1);
    }
    range.start_date = Some(start_date);
    range.end_date = Some(end_date);
    range.into_selection()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_find_next_range_index_skips_disabled() {
        let mut second = Range::new(d(2026, 1, 1), d(2026, 1, 2), "b");
        second.disabled = true;
        let ranges = vec![
            Range::new(d(2026, 1, 1), d(2026, 1, 2), "a"),
            second,
            Range::new(d(2026, 1, 1), d(2026, 1, 2), "c"),
        ];
        assert_eq!(find_next_range_index(&ranges, None), Some(0));
        assert_eq!(find_next_range_index(&ranges, Some(0)), Some(2));
        // wraps back to the first focusable range
        assert_eq!(find_next_range_index(&ranges, Some(2)), Some(0));
    }

    #[test]
    fn test_find_next_range_index_none_focusable() {
        let mut only = Range::today();
        only.auto_focus = false;
        assert_eq!(find_next_range_index(&[only], None), None);
    }

    #[test]
    fn test_first_click_collapses_range_and_focuses_end() {
        let ranges = vec![Range::new(d(2026, 3, 1), d(2026, 3, 9), "selection")];
        let result = calc_new_selection(
            &ranges,
            FocusedRange::default(),
            d(2026, 3, 5),
            &SelectionOptions::default(),
            d(2026, 3, 1),
        )
        .unwrap();
        assert_eq!(result.range.start_date, Some(d(2026, 3, 5)));
        assert_eq!(result.range.end_date, Some(d(2026, 3, 5)));
        assert_eq!(result.next_focus.as_pair(), [0, 1]);
    }

    #[test]
    fn test_second_click_before_start_swaps() {
        let ranges = vec![Range::new(d(2026, 3, 5), d(2026, 3, 5), "selection")];
        let result = calc_new_selection(
            &ranges,
            FocusedRange::new(0, Boundary::End),
            d(2026, 3, 2),
            &SelectionOptions::default(),
            d(2026, 3, 1),
        )
        .unwrap();
        assert_eq!(result.range.start_date, Some(d(2026, 3, 2)));
        assert_eq!(result.range.end_date, Some(d(2026, 3, 5)));
        assert_eq!(result.next_focus.as_pair(), [0, 0]);
    }

    #[test]
    fn test_move_range_on_first_selection_keeps_span() {
        let ranges = vec![Range::new(d(2026, 3, 1), d(2026, 3, 4), "selection")];
        let options = SelectionOptions {
            move_range_on_first_selection: true,
            ..Default::default()
        };
        let result = calc_new_selection(
            &ranges,
            FocusedRange::default(),
            d(2026, 3, 10),
            &options,
            d(2026, 3, 1),
        )
        .unwrap();
        assert_eq!(result.range.end_date, Some(d(2026, 3, 13)));
    }

    #[test]
    fn test_max_date_caps_end() {
        let ranges = vec![Range::new(d(2026, 3, 1), d(2026, 3, 4), "selection")];
        let options = SelectionOptions {
            move_range_on_first_selection: true,
            max_date: Some(d(2026, 3, 11)),
            ..Default::default()
        };
        let result = calc_new_selection(
            &ranges,
            FocusedRange::default(),
            d(2026, 3, 10),
            &options,
            d(2026, 3, 1),
        )
        .unwrap();
        assert_eq!(result.range.end_date, Some(d(2026, 3, 11)));
    }

    #[test]
    fn test_disabled_day_trims_end() {
        let ranges = vec![Range::new(d(2026, 3, 1), d(2026, 3, 1), "selection")];
        let options = SelectionOptions {
            disabled_dates: vec![d(2026, 3, 4)],
            ..Default::default()
        };
        let result = calc_new_selection(
            &ranges,
            FocusedRange::new(0, Boundary::End),
            d(2026, 3, 8),
            &options,
            d(2026, 3, 1),
        )
        .unwrap();
        assert_eq!(result.range.end_date, Some(d(2026, 3, 3)));
    }

    #[test]
    fn test_apply_preset_names_keyless_range() {
        let ranges = vec![Range::empty("")];
        let selection = apply_preset(
            &ranges,
            FocusedRange::default(),
            d(2026, 1, 1),
            d(2026, 1, 31),
        );
        let range = selection.get("range1").unwrap();
        assert_eq!(range.end_date, Some(d(2026, 1, 31)));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Range::new(d(2026, 1, 2), d(2026, 1, 3), "k")).unwrap();
        assert_eq!(json["startDate"], "2026-01-02");
        assert_eq!(json["endDate"], "2026-01-03");
        assert_eq!(json["key"], "k");
    }

    #[test]
    fn test_moved_range_stops_at_calendar_end() {
        let ranges = vec![Range::new(d(2026, 3, 1), d(2026, 3, 11), "selection")];
        let options = SelectionOptions {
            move_range_on_first_selection: true,
            ..Default::default()
        };
        let near_end = NaiveDate::MAX.pred_opt().unwrap();
        let result = calc_new_selection(
            &ranges,
            FocusedRange::default(),
            near_end,
            &options,
            d(2026, 3, 1),
        )
        .unwrap();
        assert_eq!(result.range.start_date, Some(near_end));
        assert_eq!(result.range.end_date, Some(NaiveDate::MAX));
    }
}
