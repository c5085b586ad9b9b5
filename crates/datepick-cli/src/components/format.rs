use chrono::{NaiveDate, NaiveDateTime};
use clap::ArgGroup;
use datepick_core::config::PickerConfig;
use datepick_core::exceptions::PickerError;
use datepick_core::range::{DEFAULT_RANGE_KEY, Range};
use datepick_core::time_of_day::HourCycle;

/// Render a value the way a closed picker displays it.
/// Pass --start (and optionally --end) for a range or --at
/// for a date-time
#[derive(clap::Args, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("value").required(true).args(["start", "at"])))]
pub struct FormatArgs {
    /// First day of the range, e.g. 2026-10-16
    #[arg(long, short)]
    pub start: Option<NaiveDate>,

    /// Last day of the range. Defaults to --start
    #[arg(long, short, requires = "start")]
    pub end: Option<NaiveDate>,

    /// A date-time, e.g. 2026-10-16T15:05:00
    #[arg(long, short, conflicts_with = "start")]
    pub at: Option<NaiveDateTime>,

    /// Render the time on a 24-hour clock
    #[arg(long)]
    pub hour24: bool,

    /// Leave the time out of a date-time
    #[arg(long, short)]
    pub date_only: bool,

    /// Print the change payload as JSON instead of the display text
    #[arg(long, short)]
    pub json: bool,
}

pub fn format_value(args: &FormatArgs, config: &PickerConfig) -> Result<String, PickerError> {
    if let Some(start) = args.start {
        let end = args.end.unwrap_or(start);
        if end < start {
            return Err(PickerError::InvalidDate(format!(
                "range end {} is before its start {}",
                end, start
            )));
        }
        let range = Range::new(start, end, DEFAULT_RANGE_KEY);
        if args.json {
            return serde_json::to_string_pretty(&range.into_selection())
                .map_err(|e| PickerError::InvalidFormat(e.to_string()));
        }
        return config.format.try_range_text(&range);
    }

    let Some(at) = args.at else {
        return Err(PickerError::ParseError(
            "either --start or --at is required".to_string(),
        ));
    };
    if args.json {
        return serde_json::to_string(&at).map_err(|e| PickerError::InvalidFormat(e.to_string()));
    }
    let cycle = HourCycle::from_hour12(config.hour12 && !args.hour24);
    let show_time = config.show_time && !args.date_only;
    config.format.try_date_time_text(&at, show_time, cycle)
}

pub fn handle_format(args: FormatArgs) -> i32 {
    let config = PickerConfig::from_env();
    match format_value(&args, &config) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            log::error!("Failed to format value: {}", e);
            eprintln!("{}", e);
            1
        }
    }
}
