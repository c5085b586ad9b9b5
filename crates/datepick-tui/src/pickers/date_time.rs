//! Date and time picker: a calendar plus hour/minute fields (and an AM/PM
//! switch on a 12-hour clock) in a floating panel.
//!
//! Every change made in the panel is reported through `on_change`. Today and
//! Cancel both reset the value to the current instant and report it; Set
//! Date just closes. Document listeners exist only while the panel is open.

use super::Picker;
use super::shell::{
    CloseReason, ListenerScope, OnChange, PickerContext, PickerId, PopoverShell, PropRef,
};
use crate::actions::Action;
use crate::common::{
    Button, ButtonKind, CalendarGrid, CalendarHit, CalendarLayout, CalendarOutcome, CalendarView,
    CustomInput, DayMarks, FieldEdit, InputProps, NumberField, PickerInput, is_toggle_key,
    render_button_row,
};
use crate::position::PopoverOptions;
use crate::styles::{PickerStyles, StyleOverrides, StyleProps};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use datepick_core::config::{DATEPICK_DATETIME_PLACEHOLDER, DATEPICK_HOUR12, DATEPICK_SHOW_TIME};
use datepick_core::time_of_day::parse_field;
use datepick_core::{DisplayFormat, HourCycle, Meridiem, PickerError, TimeOfDay};
use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Position, Rect, Size},
    style::Style,
    widgets::{Block, Clear, Widget},
};
use std::sync::Arc;

const BUTTONS: [Button; 3] = [
    Button::new("Cancel", ButtonKind::Plain),
    Button::new("Today", ButtonKind::Primary),
    Button::new("Set Date", ButtonKind::Primary),
];
const PANEL_INNER_WIDTH: u16 = 28;
const TIME_LABEL: &str = "Time:";

#[derive(Clone)]
pub struct DateTimeProps {
    pub date: Option<Arc<NaiveDateTime>>,
    pub on_change: Option<OnChange<NaiveDateTime>>,
    pub show_time: bool,
    pub hour12: bool,
    pub placeholder: String,
    pub styles: StyleProps,
    pub custom_input: Option<CustomInput>,
    pub format: DisplayFormat,
}

impl Default for DateTimeProps {
    fn default() -> Self {
        Self {
            date: None,
            on_change: None,
            show_time: DATEPICK_SHOW_TIME,
            hour12: DATEPICK_HOUR12,
            placeholder: DATEPICK_DATETIME_PLACEHOLDER.to_string(),
            styles: StyleProps::default(),
            custom_input: None,
            format: DisplayFormat::default(),
        }
    }
}

impl DateTimeProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: Arc<NaiveDateTime>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&NaiveDateTime) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn show_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    pub fn hour12(mut self, hour12: bool) -> Self {
        self.hour12 = hour12;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn class_name(mut self, style: Style) -> Self {
        self.styles.class_name = Some(style);
        self
    }

    pub fn input_class_name(mut self, style: Style) -> Self {
        self.styles.input_class_name = Some(style);
        self
    }

    pub fn class_names(mut self, overrides: StyleOverrides) -> Self {
        self.styles.class_names = overrides;
        self
    }

    pub fn custom_input(mut self, custom_input: CustomInput) -> Self {
        self.custom_input = Some(custom_input);
        self
    }

    pub fn format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    fn cycle(&self) -> HourCycle {
        HourCycle::from_hour12(self.hour12)
    }
}

/// Which control of the open panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    #[default]
    Calendar,
    Hour,
    Minute,
    Meridiem,
    Cancel,
    Today,
    SetDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hours,
    Minutes,
}

#[derive(Debug, Clone, Default)]
struct PanelLayout {
    grid: CalendarLayout,
    hour: Option<Rect>,
    minute: Option<Rect>,
    meridiem: Option<Rect>,
    buttons: Vec<Rect>,
}

pub struct DateTimePicker {
    props: DateTimeProps,
    styles: PickerStyles,
    shell: PopoverShell,
    /// Selected day plus the seconds carried over from the last value
    selected: NaiveDateTime,
    time: TimeOfDay,
    prop_date: PropRef<NaiveDateTime>,
    view: CalendarView,
    focus: PanelFocus,
    hour_field: NumberField,
    minute_field: NumberField,
    layout: PanelLayout,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl DateTimePicker {
    pub fn new(id: PickerId, context: PickerContext, props: DateTimeProps) -> Self {
        let shell = PopoverShell::new(
            id,
            context,
            PopoverOptions::date_time_picker(),
            ListenerScope::WhileOpen,
        );
        let initial = props.date.as_deref().copied().unwrap_or_else(now);
        let mut picker = Self {
            styles: props.styles.resolve(),
            shell,
            selected: initial,
            time: TimeOfDay::from_datetime(&initial),
            prop_date: PropRef::default(),
            view: CalendarView::new(initial.date(), 1),
            focus: PanelFocus::default(),
            hour_field: NumberField::new(),
            minute_field: NumberField::new(),
            layout: PanelLayout::default(),
            props,
        };
        let date = picker.props.date.clone();
        picker.sync_date(date.as_ref());
        picker.refresh_fields();
        picker
    }

    /// Re-derive the local date and time when the caller passes a new value.
    /// Passing no value keeps whatever is selected.
    pub fn sync_date(&mut self, date: Option<&Arc<NaiveDateTime>>) {
        if !self.prop_date.update(date) {
            return;
        }
        let Some(date) = date else { return };
        self.props.date = Some(date.clone());
        // our own change coming back: keep what is being typed
        if **date == self.value() {
            return;
        }
        self.selected = **date;
        self.time = TimeOfDay::from_datetime(date);
        self.view = CalendarView::new(date.date(), 1);
        self.refresh_fields();
    }

    /// Current value with the local time of day applied
    pub fn value(&self) -> NaiveDateTime {
        self.time
            .merge_into(self.selected.date(), self.selected.second())
            .unwrap_or(self.selected)
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn focus(&self) -> PanelFocus {
        self.focus
    }

    pub fn display_text(&self) -> String {
        self.props.format.date_time_text(
            Some(&self.value()),
            self.props.show_time,
            self.props.cycle(),
        )
    }

    fn refresh_fields(&mut self) {
        self.hour_field
            .set_value(self.time.display_hour(self.props.cycle()));
        self.minute_field.set_value(self.time.minutes);
    }

    fn notify(&self, value: &NaiveDateTime) {
        if let Some(on_change) = &self.props.on_change {
            on_change(value);
        }
    }

    /// A day was picked: keep the time of day when it is shown, otherwise
    /// snap to midnight
    pub fn handle_date_change(&mut self, date: NaiveDate) {
        let merged = if self.props.show_time {
            self.time.merge_into(date, self.selected.second())
        } else {
            TimeOfDay::new(0, 0).merge_into(date, 0)
        };
        let value = match merged {
            Ok(value) => value,
            Err(e) => {
                log::error!("Error handling date change: {}", e);
                return;
            }
        };
        self.selected = value;
        self.time = TimeOfDay::from_datetime(&value);
        self.view.focus(date);
        self.refresh_fields();
        log::debug!("Date-time picker {:?} date changed to {}", self.shell.id(), value);
        self.notify(&value);
    }

    /// Apply text typed into the hour or minute field. Values outside the
    /// field's bounds are clamped; text that isn't a number is logged and
    /// ignored.
    pub fn handle_time_change(&mut self, field: TimeField, raw: &str) {
        let typed = match parse_field(raw) {
            Ok(typed) => typed,
            Err(e) => {
                log::error!("Error handling time change: {}", e);
                return;
            }
        };
        let cycle = self.props.cycle();
        let time = match field {
            TimeField::Hours => self.time.with_hour_input(typed, cycle),
            TimeField::Minutes => self.time.with_minute_input(typed),
        };
        if let Err(e) = self.apply_time(time) {
            log::error!("Error handling time change: {}", e);
            return;
        }
        // show the clamped value when it differs from what was typed
        match field {
            TimeField::Hours if i64::from(time.display_hour(cycle)) != typed => {
                self.hour_field.set_value(time.display_hour(cycle));
            }
            TimeField::Minutes if i64::from(time.minutes) != typed => {
                self.minute_field.set_value(time.minutes);
            }
            _ => {}
        }
    }

    fn step_time(&mut self, field: TimeField, delta: i64) {
        let cycle = self.props.cycle();
        let time = match field {
            TimeField::Hours => self
                .time
                .with_hour_input(i64::from(self.time.display_hour(cycle)) + delta, cycle),
            TimeField::Minutes => self
                .time
                .with_minute_input(i64::from(self.time.minutes) + delta),
        };
        match self.apply_time(time) {
            Ok(()) => self.refresh_fields(),
            Err(e) => log::error!("Error handling time change: {}", e),
        }
    }

    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        let time = self.time.with_meridiem(meridiem);
        match self.apply_time(time) {
            Ok(()) => self.refresh_fields(),
            Err(e) => log::error!("Error handling time change: {}", e),
        }
    }

    fn apply_time(&mut self, time: TimeOfDay) -> Result<(), PickerError> {
        let value = time.merge_into(self.selected.date(), self.selected.second())?;
        self.time = time;
        self.selected = value;
        log::debug!("Date-time picker {:?} time changed to {}", self.shell.id(), value);
        self.notify(&value);
        Ok(())
    }

    fn reset_to_now(&mut self) -> NaiveDateTime {
        let now = now();
        self.selected = now;
        self.time = TimeOfDay::from_datetime(&now);
        self.view = CalendarView::new(now.date(), 1);
        self.refresh_fields();
        now
    }

    /// Today: jump to the current instant, report it and close
    pub fn today(&mut self) {
        let now = self.reset_to_now();
        self.notify(&now);
        self.close(CloseReason::Today);
    }

    /// Cancel: reset to the current instant, report the reset and close
    pub fn cancel(&mut self) {
        let now = self.reset_to_now();
        self.notify(&now);
        self.close(CloseReason::Cancel);
    }

    /// Set Date: close, the value was already reported
    pub fn apply(&mut self) {
        self.close(CloseReason::Apply);
    }

    fn open(&mut self) {
        self.shell.open();
        self.focus = PanelFocus::Calendar;
        self.view.focus(self.selected.date());
        self.refresh_fields();
    }

    fn close(&mut self, reason: CloseReason) {
        self.shell.close(reason);
    }

    fn focus_order(&self) -> Vec<PanelFocus> {
        let mut order = vec![PanelFocus::Calendar];
        if self.props.show_time {
            order.extend([PanelFocus::Hour, PanelFocus::Minute]);
            if self.props.hour12 {
                order.push(PanelFocus::Meridiem);
            }
        }
        order.extend([PanelFocus::Cancel, PanelFocus::Today, PanelFocus::SetDate]);
        order
    }

    fn move_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(order.len() as isize) as usize;
        self.focus = order[next];
        self.refresh_fields();
    }

    fn press(&mut self, focus: PanelFocus) {
        match focus {
            PanelFocus::Cancel => self.cancel(),
            PanelFocus::Today => self.today(),
            PanelFocus::SetDate => self.apply(),
            _ => {}
        }
    }

    fn edit_field(&mut self, field: TimeField, key: KeyEvent) -> bool {
        let edit = match field {
            TimeField::Hours => self.hour_field.handle_key(key),
            TimeField::Minutes => self.minute_field.handle_key(key),
        };
        match edit {
            Some(FieldEdit::Text(text)) => self.handle_time_change(field, &text),
            Some(FieldEdit::Step(delta)) => self.step_time(field, delta),
            None => return false,
        }
        true
    }

    fn handle_panel_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => {
                self.move_focus(1);
                return true;
            }
            KeyCode::BackTab => {
                self.move_focus(-1);
                return true;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Calendar => match self.view.handle_key(key) {
                CalendarOutcome::Selected(date) => {
                    self.handle_date_change(date);
                    true
                }
                CalendarOutcome::Moved => true,
                CalendarOutcome::Ignored => false,
            },
            PanelFocus::Hour => self.edit_field(TimeField::Hours, key),
            PanelFocus::Minute => self.edit_field(TimeField::Minutes, key),
            PanelFocus::Meridiem => match key.code {
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.set_meridiem(Meridiem::Am);
                    true
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.set_meridiem(Meridiem::Pm);
                    true
                }
                KeyCode::Up | KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.set_meridiem(self.time.meridiem().toggled());
                    true
                }
                _ => false,
            },
            PanelFocus::Cancel | PanelFocus::Today | PanelFocus::SetDate => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.press(self.focus);
                    true
                }
                KeyCode::Left => {
                    self.move_focus(-1);
                    true
                }
                KeyCode::Right => {
                    self.move_focus(1);
                    true
                }
                _ => false,
            },
        }
    }

    fn handle_panel_click(&mut self, pos: Position) {
        let hit = |rect: Option<Rect>| rect.is_some_and(|r| r.contains(pos));
        if hit(self.layout.hour) {
            self.focus = PanelFocus::Hour;
            self.refresh_fields();
            return;
        }
        if hit(self.layout.minute) {
            self.focus = PanelFocus::Minute;
            self.refresh_fields();
            return;
        }
        if hit(self.layout.meridiem) {
            self.focus = PanelFocus::Meridiem;
            self.set_meridiem(self.time.meridiem().toggled());
            return;
        }
        if let Some(index) = self.layout.buttons.iter().position(|r| r.contains(pos)) {
            let target = [PanelFocus::Cancel, PanelFocus::Today, PanelFocus::SetDate][index];
            self.press(target);
            return;
        }
        match self.layout.grid.hit_test(pos) {
            Some(CalendarHit::PrevMonth) => self.view.shift_months(-1),
            Some(CalendarHit::NextMonth) => self.view.shift_months(1),
            Some(CalendarHit::Day(date)) => {
                self.focus = PanelFocus::Calendar;
                self.handle_date_change(date);
            }
            None => {}
        }
    }

    fn panel_size(&self) -> Size {
        let time_rows = if self.props.show_time { 2 } else { 0 };
        Size::new(
            PANEL_INNER_WIDTH + 2,
            2 + self.view.height() + 1 + time_rows + 1,
        )
    }

    fn render_time_row(&mut self, area: Rect, buf: &mut Buffer) {
        buf.set_stringn(area.x, area.y, TIME_LABEL, area.width as usize, self.styles.label);
        let mut x = area.x + TIME_LABEL.len() as u16 + 1;

        let hour = self.hour_field.render_value(
            Rect::new(x, area.y, area.right().saturating_sub(x), 1),
            buf,
            self.focus == PanelFocus::Hour,
            &self.styles,
        );
        x = hour.right();
        buf.set_string(x, area.y, ":", self.styles.label);
        x += 1;
        let minute = self.minute_field.render_value(
            Rect::new(x, area.y, area.right().saturating_sub(x), 1),
            buf,
            self.focus == PanelFocus::Minute,
            &self.styles,
        );
        self.layout.hour = Some(hour);
        self.layout.minute = Some(minute);
        self.layout.meridiem = None;

        if self.props.hour12 {
            let x = minute.right() + 1;
            let rect = Rect::new(x, area.y, 4.min(area.right().saturating_sub(x)), 1);
            let style = if self.focus == PanelFocus::Meridiem {
                self.styles.field_focused
            } else {
                self.styles.field
            };
            buf.set_style(rect, style);
            buf.set_stringn(
                rect.x,
                rect.y,
                format!(" {} ", self.time.meridiem().label()),
                rect.width as usize,
                style,
            );
            self.layout.meridiem = Some(rect);
        }
    }
}

impl Picker for DateTimePicker {
    fn id(&self) -> PickerId {
        self.shell.id()
    }

    fn height(&self) -> u16 {
        match &self.props.custom_input {
            Some(custom) => custom.height,
            None => PickerInput::Default.height(),
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        self.shell.set_input_area(area);
        let input = match &self.props.custom_input {
            Some(custom) => PickerInput::Custom(custom.clone()),
            None => PickerInput::Default,
        };
        let text = self.display_text();
        let props = InputProps::new(&text, &self.props.placeholder, self.shell.is_open(), focused);
        input.render(&props, &self.styles, area, buf);
    }

    fn render_overlay(&mut self, viewport: Rect, buf: &mut Buffer) {
        if !self.shell.is_open() {
            return;
        }
        let area = self.shell.place_panel(self.panel_size(), viewport);
        Clear.render(area, buf);
        buf.set_style(area, self.styles.panel);
        let block = Block::bordered()
            .title(" Select date ")
            .border_style(self.styles.panel_border);
        let inner = block.inner(area);
        block.render(area, buf);

        let grid_area = Rect {
            height: self.view.height().min(inner.height),
            ..inner
        };
        let marks = DayMarks {
            selected: Some(self.selected.date()),
            today: Some(Local::now().date_naive()),
            ..Default::default()
        };
        self.layout.grid = CalendarGrid::new(&self.view, marks, &self.styles)
            .show_cursor(self.focus == PanelFocus::Calendar)
            .render(grid_area, buf);

        let mut y = grid_area.bottom() + 1;
        if self.props.show_time && y < inner.bottom() {
            self.render_time_row(Rect::new(inner.x, y, inner.width, 1), buf);
            y += 2;
        } else {
            self.layout.hour = None;
            self.layout.minute = None;
            self.layout.meridiem = None;
        }

        if y < inner.bottom() {
            let focused = BUTTONS.iter().zip([
                PanelFocus::Cancel,
                PanelFocus::Today,
                PanelFocus::SetDate,
            ])
            .position(|(_, f)| f == self.focus);
            self.layout.buttons = render_button_row(
                &BUTTONS,
                focused,
                Rect::new(inner.x, y, inner.width, 1),
                buf,
                &self.styles,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.shell.is_open() {
            return self.handle_panel_key(key);
        }
        if is_toggle_key(&key) {
            self.open();
            return true;
        }
        false
    }

    fn handle_click(&mut self, pos: Position) -> bool {
        if self.shell.is_open() && self.shell.panel_contains(pos) {
            self.handle_panel_click(pos);
            return true;
        }
        if self.shell.input_contains(pos) {
            if self.shell.is_open() {
                self.close(CloseReason::Toggle);
            } else {
                self.open();
            }
            return true;
        }
        false
    }

    fn reduce(&mut self, action: &Action) {
        if let Some(reason) = self.shell.close_request(action) {
            self.close(reason);
        }
    }

    fn is_open(&self) -> bool {
        self.shell.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{ActionReceiver, Dispatcher};
    use crate::listeners::{DocumentEvent, DocumentListeners};
    use ratatui::crossterm::event::KeyModifiers;
    use std::sync::Mutex;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    type Seen = Arc<Mutex<Vec<NaiveDateTime>>>;

    fn picker_with(
        props: DateTimeProps,
    ) -> (DateTimePicker, Seen, DocumentListeners, ActionReceiver) {
        let (dispatcher, rx) = Dispatcher::new();
        let listeners = DocumentListeners::new();
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let props = props.on_change(move |value| sink.lock().unwrap().push(*value));
        let picker = DateTimePicker::new(
            PickerId(4),
            PickerContext::new(dispatcher, listeners.clone()),
            props,
        );
        (picker, seen, listeners, rx)
    }

    fn afternoon() -> DateTimeProps {
        DateTimeProps::new().date(Arc::new(at(2026, 10, 16, 15, 5)))
    }

    fn type_into(picker: &mut DateTimePicker, text: &str) {
        for c in text.chars() {
            picker.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_display_text_variants() {
        let (picker, _, _, _) = picker_with(afternoon());
        assert_eq!(picker.display_text(), "Oct 16, 2026, 03:05 PM");

        let (picker, _, _, _) = picker_with(afternoon().hour12(false));
        assert_eq!(picker.display_text(), "Oct 16, 2026, 15:05");

        let (picker, _, _, _) = picker_with(afternoon().show_time(false));
        assert_eq!(picker.display_text(), "Oct 16, 2026");
    }

    #[test]
    fn test_hour_clamped_in_12h_mode_keeps_meridiem() {
        let (mut picker, seen, _, _) = picker_with(afternoon());
        picker.handle_key(key(KeyCode::Enter));
        picker.handle_key(key(KeyCode::Tab));
        assert_eq!(picker.focus(), PanelFocus::Hour);

        type_into(&mut picker, "13");
        assert_eq!(picker.time().display_hour(HourCycle::H12), 12);
        assert_eq!(picker.time().meridiem(), Meridiem::Pm);
        assert_eq!(picker.hour_field.text(), "12");
        assert_eq!(seen.lock().unwrap().last(), Some(&at(2026, 10, 16, 12, 5)));
    }

    #[test]
    fn test_hour_clamped_in_24h_mode() {
        let (mut picker, _, _, _) = picker_with(afternoon().hour12(false));
        picker.handle_key(key(KeyCode::Enter));
        picker.handle_key(key(KeyCode::Tab));
        type_into(&mut picker, "25");
        assert_eq!(picker.time().hours, 23);
        assert_eq!(picker.value(), at(2026, 10, 16, 23, 5));
    }

    #[test]
    fn test_minute_clamping() {
        let (mut picker, _, _, _) = picker_with(afternoon());
        picker.handle_time_change(TimeField::Minutes, "61");
        assert_eq!(picker.time().minutes, 59);
        picker.handle_time_change(TimeField::Minutes, "-1");
        assert_eq!(picker.time().minutes, 0);
    }

    #[test]
    fn test_unparseable_time_leaves_state() {
        let (mut picker, seen, _, _) = picker_with(afternoon());
        picker.handle_time_change(TimeField::Hours, "");
        picker.handle_time_change(TimeField::Minutes, "-");
        assert_eq!(picker.value(), at(2026, 10, 16, 15, 5));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_date_change_keeps_time_when_shown() {
        let (mut picker, seen, _, _) = picker_with(afternoon());
        picker.handle_date_change(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        assert_eq!(picker.value(), at(2026, 11, 2, 15, 5));
        assert_eq!(*seen.lock().unwrap(), vec![at(2026, 11, 2, 15, 5)]);
    }

    #[test]
    fn test_date_change_snaps_to_midnight_without_time() {
        let (mut picker, seen, _, _) = picker_with(afternoon().show_time(false));
        picker.handle_date_change(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        assert_eq!(picker.value(), at(2026, 11, 2, 0, 0));
        assert_eq!(*seen.lock().unwrap(), vec![at(2026, 11, 2, 0, 0)]);
    }

    #[test]
    fn test_meridiem_switch() {
        let (mut picker, _, _, _) = picker_with(afternoon());
        picker.set_meridiem(Meridiem::Am);
        assert_eq!(picker.value(), at(2026, 10, 16, 3, 5));
    }

    #[test]
    fn test_today_reports_current_date_and_closes() {
        let (mut picker, seen, _, _) = picker_with(afternoon());
        picker.handle_key(key(KeyCode::Enter));
        picker.today();

        assert!(!picker.is_open());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].date(), Local::now().date_naive());
    }

    #[test]
    fn test_cancel_resets_and_reports() {
        let (mut picker, seen, _, _) = picker_with(afternoon());
        picker.handle_key(key(KeyCode::Enter));
        picker.cancel();
        assert!(!picker.is_open());
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(picker.value().date(), Local::now().date_naive());
    }

    #[test]
    fn test_set_date_closes_quietly() {
        let (mut picker, seen, _, _) = picker_with(afternoon());
        picker.handle_key(key(KeyCode::Enter));
        picker.apply();
        assert!(!picker.is_open());
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(picker.value(), at(2026, 10, 16, 15, 5));
    }

    #[test]
    fn test_escape_closes_and_detaches_listeners() {
        let (mut picker, seen, listeners, mut rx) = picker_with(afternoon());
        assert!(listeners.is_empty());
        picker.handle_key(key(KeyCode::Enter));
        assert!(!listeners.is_empty());

        listeners.emit(&DocumentEvent::KeyDown(key(KeyCode::Esc)));
        for action in rx.drain() {
            picker.reduce(&action);
        }
        assert!(!picker.is_open());
        assert!(listeners.is_empty());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_date_only_panel_has_no_time_row() {
        let (mut picker, _, _, _) = picker_with(afternoon().show_time(false));
        let screen = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(screen);
        picker.render(Rect::new(0, 0, 30, 3), &mut buf, true);
        picker.handle_key(key(KeyCode::Enter));
        picker.render_overlay(screen, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(!text.contains(TIME_LABEL));
        assert!(text.contains("Set Date"));
        assert_eq!(picker.panel_size().height, 12);

        picker.handle_key(key(KeyCode::Tab));
        assert_eq!(picker.focus(), PanelFocus::Cancel);
    }

    #[test]
    fn test_time_row_rendered_with_meridiem() {
        let (mut picker, _, _, _) = picker_with(afternoon());
        let screen = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(screen);
        picker.render(Rect::new(0, 0, 30, 3), &mut buf, true);
        picker.handle_key(key(KeyCode::Enter));
        picker.render_overlay(screen, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains(TIME_LABEL));
        assert!(text.contains(" PM "));

        let meridiem = picker.layout.meridiem.unwrap();
        picker.handle_click(Position::new(meridiem.x, meridiem.y));
        assert_eq!(picker.time().meridiem(), Meridiem::Am);
    }

    #[test]
    fn test_custom_input_receives_value_and_toggles() {
        let custom = CustomInput::new(1, |props, area, buf| {
            let marker = if props.expanded { "open" } else { "closed" };
            buf.set_string(
                area.x,
                area.y,
                format!("{}|{}", marker, props.shown_text()),
                Style::default(),
            );
        });
        let (mut picker, _, _, _) = picker_with(afternoon().custom_input(custom));
        assert_eq!(picker.height(), 1);

        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        picker.render(area, &mut buf, false);
        let line: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(line.starts_with("closed|Oct 16, 2026, 03:05 PM"));
        assert!(!line.contains(crate::common::input::DEFAULT_ICON));

        assert!(picker.handle_click(Position::new(3, 0)));
        assert!(picker.is_open());
        picker.render(area, &mut buf, false);
        let line: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(line.starts_with("open|"));

        assert!(picker.handle_key(key(KeyCode::Tab)));
    }

    #[test]
    fn test_prop_change_rederives() {
        let (mut picker, _, _, _) = picker_with(afternoon());
        picker.handle_time_change(TimeField::Minutes, "30");
        let next = Arc::new(at(2027, 3, 1, 9, 0));
        picker.sync_date(Some(&next));
        assert_eq!(picker.value(), at(2027, 3, 1, 9, 0));
        // same reference again: local edits survive
        picker.handle_time_change(TimeField::Minutes, "45");
        picker.sync_date(Some(&next));
        assert_eq!(picker.value(), at(2027, 3, 1, 9, 45));
    }

    #[test]
    fn test_echoed_value_keeps_typing() {
        let (mut picker, seen, _, _) = picker_with(afternoon().hour12(false));
        picker.handle_key(key(KeyCode::Enter));
        picker.handle_key(key(KeyCode::Tab));
        type_into(&mut picker, "1");

        let echoed = Arc::new(*seen.lock().unwrap().last().unwrap());
        picker.sync_date(Some(&echoed));
        type_into(&mut picker, "0");
        assert_eq!(picker.time().hours, 10);
    }
}
