//! Framework-free logic behind the datepick widgets: ranges and presets,
//! calendar arithmetic, time-of-day math and display formatting.

pub mod calendar;
pub mod config;
pub mod exceptions;
pub mod format;
pub mod presets;
pub mod range;
pub mod time_of_day;

pub use exceptions::PickerError;
pub use format::DisplayFormat;
pub use range::{Boundary, FocusedRange, Range, RangeSelection};
pub use time_of_day::{HourCycle, Meridiem, TimeOfDay};
