/// Text shown in a closed picker's input
use crate::config;
use crate::exceptions::PickerError;
use crate::range::Range;
use crate::time_of_day::HourCycle;
use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// strftime patterns used to render picker values. Defaults follow en-US
/// locale output: `10/16/2026` for range bounds and `Oct 16, 2026, 03:05 PM`
/// for date-times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormat {
    pub range_date: String,
    pub date: String,
    pub time_12h: String,
    pub time_24h: String,
    pub range_separator: String,
    pub time_separator: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            range_date: config::DATEPICK_RANGE_DATE_FORMAT.to_string(),
            date: config::DATEPICK_DATE_FORMAT.to_string(),
            time_12h: "%I:%M %p".to_string(),
            time_24h: "%H:%M".to_string(),
            range_separator: " - ".to_string(),
            time_separator: ", ".to_string(),
        }
    }
}

fn parse_pattern(pattern: &str) -> Result<Vec<Item<'_>>, PickerError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(PickerError::InvalidFormat(pattern.to_string()));
    }
    Ok(items)
}

fn render_date(date: &NaiveDate, pattern: &str) -> Result<String, PickerError> {
    let items = parse_pattern(pattern)?;
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.iter()))
        .map_err(|_| PickerError::InvalidFormat(pattern.to_string()))?;
    Ok(out)
}

fn render_date_time(value: &NaiveDateTime, pattern: &str) -> Result<String, PickerError> {
    let items = parse_pattern(pattern)?;
    let mut out = String::new();
    write!(out, "{}", value.format_with_items(items.iter()))
        .map_err(|_| PickerError::InvalidFormat(pattern.to_string()))?;
    Ok(out)
}

impl DisplayFormat {
    /// Fail early on patterns that would never render
    pub fn validate(&self) -> Result<(), PickerError> {
        for pattern in [&self.range_date, &self.date, &self.time_12h, &self.time_24h] {
            parse_pattern(pattern)?;
        }
        Ok(())
    }

    /// `start - end`, or an empty string while either boundary is missing
    pub fn try_range_text(&self, range: &Range) -> Result<String, PickerError> {
        match (range.start_date, range.end_date) {
            (Some(start), Some(end)) => Ok(format!(
                "{}{}{}",
                render_date(&start, &self.range_date)?,
                self.range_separator,
                render_date(&end, &self.range_date)?
            )),
            _ => Ok(String::new()),
        }
    }

    pub fn try_date_time_text(
        &self,
        value: &NaiveDateTime,
        show_time: bool,
        cycle: HourCycle,
    ) -> Result<String, PickerError> {
        let date = render_date_time(value, &self.date)?;
        if !show_time {
            return Ok(date);
        }
        let pattern = match cycle {
            HourCycle::H12 => &self.time_12h,
            HourCycle::H24 => &self.time_24h,
        };
        Ok(format!(
            "{}{}{}",
            date,
            self.time_separator,
            render_date_time(value, pattern)?
        ))
    }

    /// Display text for a range; failures are logged and shown as nothing
    pub fn range_text(&self, range: Option<&Range>) -> String {
        let Some(range) = range else {
            return String::new();
        };
        self.try_range_text(range).unwrap_or_else(|e| {
            log::warn!("Error formatting date range: {}", e);
            String::new()
        })
    }

    /// Display text for a date-time; failures are logged and shown as nothing
    pub fn date_time_text(
        &self,
        value: Option<&NaiveDateTime>,
        show_time: bool,
        cycle: HourCycle,
    ) -> String {
        let Some(value) = value else {
            return String::new();
        };
        self.try_date_time_text(value, show_time, cycle)
            .unwrap_or_else(|e| {
                log::warn!("Error formatting date time: {}", e);
                String::new()
            })
    }

    /// A single calendar date, rendered with the range bound pattern
    pub fn date_text(&self, date: &NaiveDate) -> String {
        render_date(date, &self.range_date).unwrap_or_else(|e| {
            log::warn!("Error formatting date: {}", e);
            String::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_range_text() {
        let fmt = DisplayFormat::default();
        let range = Range::new(
            NaiveDate::from_ymd_opt(2026, 10, 6).unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 18).unwrap(),
            "selection",
        );
        assert_eq!(fmt.range_text(Some(&range)), "10/6/2026 - 11/18/2026");
    }

    #[test]
    fn test_incomplete_range_is_blank() {
        let fmt = DisplayFormat::default();
        let mut range = Range::empty("selection");
        range.start_date = NaiveDate::from_ymd_opt(2026, 10, 6);
        assert_eq!(fmt.range_text(Some(&range)), "");
        assert_eq!(fmt.range_text(None), "");
    }

    #[test]
    fn test_date_time_text_12h() {
        let fmt = DisplayFormat::default();
        assert_eq!(
            fmt.date_time_text(Some(&at(2026, 10, 16, 15, 5)), true, HourCycle::H12),
            "Oct 16, 2026, 03:05 PM"
        );
        assert_eq!(
            fmt.date_time_text(Some(&at(2026, 10, 16, 0, 30)), true, HourCycle::H12),
            "Oct 16, 2026, 12:30 AM"
        );
    }

    #[test]
    fn test_date_time_text_24h() {
        let fmt = DisplayFormat::default();
        assert_eq!(
            fmt.date_time_text(Some(&at(2026, 10, 16, 15, 5)), true, HourCycle::H24),
            "Oct 16, 2026, 15:05"
        );
    }

    #[test]
    fn test_date_only_drops_time() {
        let fmt = DisplayFormat::default();
        assert_eq!(
            fmt.date_time_text(Some(&at(2026, 1, 2, 15, 5)), false, HourCycle::H12),
            "Jan 2, 2026"
        );
    }

    #[test]
    fn test_invalid_pattern_degrades_to_blank() {
        let fmt = DisplayFormat {
            date: "%Q".to_string(),
            ..Default::default()
        };
        assert!(fmt.validate().is_err());
        assert!(matches!(
            fmt.try_date_time_text(&at(2026, 1, 2, 3, 4), false, HourCycle::H12),
            Err(PickerError::InvalidFormat(_))
        ));
        assert_eq!(
            fmt.date_time_text(Some(&at(2026, 1, 2, 3, 4)), false, HourCycle::H12),
            ""
        );
    }

    #[test]
    fn test_time_specifier_on_date_pattern_fails() {
        let fmt = DisplayFormat {
            range_date: "%H".to_string(),
            ..Default::default()
        };
        let range = Range::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            "selection",
        );
        assert!(fmt.try_range_text(&range).is_err());
        assert_eq!(fmt.range_text(Some(&range)), "");
    }
}
