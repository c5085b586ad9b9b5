/// Hours and minutes split out of a date-time, with 12/24-hour input rules
use crate::exceptions::PickerError;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourCycle {
    #[default]
    H12,
    H24,
}

impl HourCycle {
    pub fn from_hour12(hour12: bool) -> Self {
        if hour12 { Self::H12 } else { Self::H24 }
    }

    /// Inclusive bounds of the hour field as the user sees it
    pub fn hour_bounds(&self) -> (i64, i64) {
        match self {
            Self::H12 => (1, 12),
            Self::H24 => (0, 23),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            hours: hours.min(23),
            minutes: minutes.min(59),
        }
    }

    pub fn from_datetime(value: &NaiveDateTime) -> Self {
        Self::new(value.hour(), value.minute())
    }

    pub fn meridiem(&self) -> Meridiem {
        if self.hours >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }

    /// Hour as shown in the hour field: 1-12 for 12h, 0-23 otherwise
    pub fn display_hour(&self, cycle: HourCycle) -> u32 {
        match cycle {
            HourCycle::H12 => match self.hours % 12 {
                0 => 12,
                h => h,
            },
            HourCycle::H24 => self.hours,
        }
    }

    /// Apply a typed hour. The value is clamped to the field's bounds and, in
    /// 12h mode, interpreted in the current half of the day.
    pub fn with_hour_input(self, value: i64, cycle: HourCycle) -> Self {
        let (min, max) = cycle.hour_bounds();
        let typed = value.clamp(min, max) as u32;
        let hours = match cycle {
            HourCycle::H24 => typed,
            HourCycle::H12 => to_24h(typed, self.meridiem()),
        };
        Self::new(hours, self.minutes)
    }

    pub fn with_minute_input(self, value: i64) -> Self {
        Self::new(self.hours, value.clamp(0, 59) as u32)
    }

    pub fn with_meridiem(self, meridiem: Meridiem) -> Self {
        let hour12 = self.display_hour(HourCycle::H12);
        Self::new(to_24h(hour12, meridiem), self.minutes)
    }

    /// Put these hours and minutes on `date`, keeping `seconds`
    pub fn merge_into(&self, date: NaiveDate, seconds: u32) -> Result<NaiveDateTime, PickerError> {
        date.and_hms_opt(self.hours, self.minutes, seconds.min(59))
            .ok_or_else(|| {
                PickerError::InvalidDate(format!(
                    "{} {:02}:{:02}:{:02}",
                    date, self.hours, self.minutes, seconds
                ))
            })
    }
}

fn to_24h(hour12: u32, meridiem: Meridiem) -> u32 {
    match (meridiem, hour12) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Am, h) => h,
        (Meridiem::Pm, 12) => 12,
        (Meridiem::Pm, h) => h + 12,
    }
}

/// Read a number typed into an hour/minute field
pub fn parse_field(text: &str) -> Result<i64, PickerError> {
    text.trim()
        .parse::<i64>()
        .map_err(|e| PickerError::ParseError(format!("'{}': {}", text, e)))
}
