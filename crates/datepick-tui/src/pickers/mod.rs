/// Picker widgets and the trait the app loop drives them through
pub mod calendar;
pub mod date_range;
pub mod date_time;
pub mod shell;

pub use calendar::{Calendar, CalendarProps};
pub use date_range::{DateRangePicker, DateRangeProps};
pub use date_time::{DateTimePicker, DateTimeProps};
pub use shell::{CloseReason, ListenerScope, OnChange, PickerContext, PickerId, PopoverShell};

use crate::actions::Action;
use ratatui::{
    buffer::Buffer,
    crossterm::event::KeyEvent,
    layout::{Position, Rect},
};

/// A widget with an input area and, optionally, a floating panel.
///
/// `render` draws the input in the page flow; `render_overlay` draws the open
/// panel on top of everything else and must run after the rest of the frame.
pub trait Picker {
    fn id(&self) -> PickerId;

    /// Rows the input occupies in the page flow
    fn height(&self) -> u16;

    fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool);

    fn render_overlay(&mut self, viewport: Rect, buf: &mut Buffer);

    /// Returns true when the key was consumed
    fn handle_key(&mut self, key: KeyEvent) -> bool;

    /// Returns true when the click landed on this picker
    fn handle_click(&mut self, pos: Position) -> bool;

    /// Apply an action drained from the dispatcher
    fn reduce(&mut self, action: &Action);

    fn is_open(&self) -> bool;
}
