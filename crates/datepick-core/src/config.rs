/// This config file lists out all the default values for the datepick widgets.
/// All can be overridden by an ENV var of the same name. Some can also be
/// overridden from the command line. These should only be primitive types
///
use crate::format::DisplayFormat;

/// default number of months shown side by side by the range picker
pub static DATEPICK_MONTHS: usize = 2;

/// upper bound on months rendered at once
pub static DATEPICK_MAX_MONTHS: usize = 6;

/// whether the date-time picker uses a 12-hour clock
pub static DATEPICK_HOUR12: bool = true;

/// whether the date-time picker shows the time row
pub static DATEPICK_SHOW_TIME: bool = true;

/// placeholder of an empty range picker input
pub static DATEPICK_RANGE_PLACEHOLDER: &str = "Select a date range";

/// placeholder of an empty date-time picker input
pub static DATEPICK_DATETIME_PLACEHOLDER: &str = "Select date and time";

/// strftime pattern for each bound of a range
pub static DATEPICK_RANGE_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// strftime pattern for the date part of a date-time
pub static DATEPICK_DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    pub months: usize,
    pub hour12: bool,
    pub show_time: bool,
    pub range_placeholder: String,
    pub date_time_placeholder: String,
    pub format: DisplayFormat,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            months: DATEPICK_MONTHS,
            hour12: DATEPICK_HOUR12,
            show_time: DATEPICK_SHOW_TIME,
            range_placeholder: DATEPICK_RANGE_PLACEHOLDER.to_string(),
            date_time_placeholder: DATEPICK_DATETIME_PLACEHOLDER.to_string(),
            format: DisplayFormat::default(),
        }
    }
}

fn parse_bool(key: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            log::warn!("Ignoring {}={:?}: expected a boolean", key, raw);
            default
        }
    }
}

fn validated(key: &str, candidate: DisplayFormat, fallback: DisplayFormat) -> DisplayFormat {
    match candidate.validate() {
        Ok(()) => candidate,
        Err(e) => {
            log::warn!("Ignoring {}: {}", key, e);
            fallback
        }
    }
}

impl PickerConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable name
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("DATEPICK_MONTHS") {
            match raw.trim().parse::<usize>() {
                Ok(months) => config.months = clamp_months(months),
                Err(e) => log::warn!("Ignoring DATEPICK_MONTHS={:?}: {}", raw, e),
            }
        }
        if let Some(raw) = lookup("DATEPICK_HOUR12") {
            config.hour12 = parse_bool("DATEPICK_HOUR12", &raw, config.hour12);
        }
        if let Some(raw) = lookup("DATEPICK_SHOW_TIME") {
            config.show_time = parse_bool("DATEPICK_SHOW_TIME", &raw, config.show_time);
        }
        if let Some(raw) = lookup("DATEPICK_RANGE_PLACEHOLDER") {
            config.range_placeholder = raw;
        }
        if let Some(raw) = lookup("DATEPICK_DATETIME_PLACEHOLDER") {
            config.date_time_placeholder = raw;
        }

        if let Some(raw) = lookup("DATEPICK_RANGE_DATE_FORMAT") {
            let candidate = DisplayFormat {
                range_date: raw.clone(),
                ..config.format.clone()
            };
            config.format = validated("DATEPICK_RANGE_DATE_FORMAT", candidate, config.format);
        }
        if let Some(raw) = lookup("DATEPICK_DATE_FORMAT") {
            let candidate = DisplayFormat {
                date: raw.clone(),
                ..config.format.clone()
            };
            config.format = validated("DATEPICK_DATE_FORMAT", candidate, config.format);
        }

        config
    }
}

/// Keep a requested month count within what the range picker renders
pub fn clamp_months(months: usize) -> usize {
    months.clamp(1, DATEPICK_MAX_MONTHS)
}
