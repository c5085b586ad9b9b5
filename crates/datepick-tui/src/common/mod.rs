// Reusable pieces shared by every picker
pub mod button;
pub mod calendar;
pub mod input;

pub use button::{Button, ButtonKind, render_button_row};
pub use calendar::{
    CalendarGrid, CalendarHit, CalendarLayout, CalendarOutcome, CalendarView, DayMarks,
    centered_rect,
};
pub use input::{CustomInput, FieldEdit, InputProps, NumberField, PickerInput, is_toggle_key};
