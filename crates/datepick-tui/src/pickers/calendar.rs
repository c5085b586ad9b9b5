/// Single-date calendar. Renders inline by default; given a custom input it
/// becomes a popover that opens below that input.
use super::shell::{
    CloseReason, ListenerScope, OnChange, PickerContext, PickerId, PopoverShell, PropRef,
};
use super::Picker;
use crate::actions::Action;
use crate::common::{
    CalendarGrid, CalendarHit, CalendarLayout, CalendarOutcome, CalendarView, CustomInput,
    DayMarks, InputProps, PickerInput, is_toggle_key,
};
use crate::position::PopoverOptions;
use crate::styles::{PickerStyles, StyleProps};
use chrono::{Local, NaiveDate};
use datepick_core::DisplayFormat;
use ratatui::{
    buffer::Buffer,
    crossterm::event::KeyEvent,
    layout::{Position, Rect, Size},
    style::Style,
    widgets::{Block, Clear, Widget},
};
use std::sync::Arc;

pub const CALENDAR_PLACEHOLDER: &str = "Select a date";

#[derive(Clone)]
pub struct CalendarProps {
    pub date: Option<Arc<NaiveDate>>,
    pub on_change: Option<OnChange<NaiveDate>>,
    pub months: usize,
    pub styles: StyleProps,
    pub custom_input: Option<CustomInput>,
    pub placeholder: String,
    pub format: DisplayFormat,
}

impl Default for CalendarProps {
    fn default() -> Self {
        Self {
            date: None,
            on_change: None,
            months: 1,
            styles: StyleProps::default(),
            custom_input: None,
            placeholder: CALENDAR_PLACEHOLDER.to_string(),
            format: DisplayFormat::default(),
        }
    }
}

impl CalendarProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: Arc<NaiveDate>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&NaiveDate) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn months(mut self, months: usize) -> Self {
        self.months = months.max(1);
        self
    }

    pub fn class_name(mut self, style: Style) -> Self {
        self.styles.class_name = Some(style);
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
}

pub struct Calendar {
    id: PickerId,
    props: CalendarProps,
    styles: PickerStyles,
    date: Option<NaiveDate>,
    view: CalendarView,
    prop_date: PropRef<NaiveDate>,
    /// Present only when rendered behind a custom input
    shell: Option<PopoverShell>,
    grid_layout: CalendarLayout,
}

impl Calendar {
    pub fn new(id: PickerId, context: PickerContext, props: CalendarProps) -> Self {
        let shell = props.custom_input.as_ref().map(|_| {
            PopoverShell::new(
                id,
                context,
                PopoverOptions::calendar(),
                ListenerScope::WhileOpen,
            )
        });
        let today = Local::now().date_naive();
        let mut calendar = Self {
            id,
            styles: props.styles.resolve(),
            date: None,
            view: CalendarView::new(today, props.months),
            prop_date: PropRef::default(),
            shell,
            grid_layout: CalendarLayout::default(),
            props,
        };
        let date = calendar.props.date.clone();
        calendar.sync_date(date.as_ref());
        calendar
    }

    /// Re-derive the selected day when the caller passes a new date
    pub fn sync_date(&mut self, date: Option<&Arc<NaiveDate>>) {
        if !self.prop_date.update(date) {
            return;
        }
        self.date = date.map(|d| **d);
        if let Some(date) = self.date {
            self.view.focus(date);
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn display_text(&self) -> String {
        self.date
            .map(|date| self.props.format.date_text(&date))
            .unwrap_or_default()
    }

    fn select(&mut self, date: NaiveDate) {
        log::debug!("Calendar {:?} selected {}", self.id, date);
        self.date = Some(date);
        self.view.focus(date);
        if let Some(on_change) = &self.props.on_change {
            on_change(&date);
        }
        if let Some(shell) = self.shell.as_mut() {
            shell.close(CloseReason::Apply);
        }
    }

    fn apply_hit(&mut self, hit: CalendarHit) {
        match hit {
            CalendarHit::PrevMonth => self.view.shift_months(-1),
            CalendarHit::NextMonth => self.view.shift_months(1),
            CalendarHit::Day(date) => self.select(date),
        }
    }

    fn grid_size(&self) -> Size {
        Size::new(self.view.width() + 2, self.view.height() + 2)
    }

    fn render_grid(&mut self, area: Rect, buf: &mut Buffer, show_cursor: bool, border: Style) {
        let block = Block::bordered().border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        let today = Local::now().date_naive();
        let marks = DayMarks {
            selected: self.date,
            today: Some(today),
            ..Default::default()
        };
        self.grid_layout = CalendarGrid::new(&self.view, marks, &self.styles)
            .show_cursor(show_cursor)
            .render(inner, buf);
    }
}

impl Picker for Calendar {
    fn id(&self) -> PickerId {
        self.id
    }

    fn height(&self) -> u16 {
        match &self.props.custom_input {
            Some(custom) => custom.height,
            None => self.grid_size().height,
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        let Some(custom) = self.props.custom_input.clone() else {
            let border = if focused {
                self.styles.container.patch(self.styles.input_focused)
            } else {
                self.styles.container
            };
            let size = self.grid_size();
            let area = Rect {
                width: size.width.min(area.width),
                height: size.height.min(area.height),
                ..area
            };
            self.render_grid(area, buf, focused, border);
            return;
        };

        let value = self.display_text();
        let open = self.is_open();
        if let Some(shell) = &self.shell {
            shell.set_input_area(area);
        }
        let props = InputProps::new(&value, &self.props.placeholder, open, focused);
        PickerInput::Custom(custom).render(&props, &self.styles, area, buf);
    }

    fn render_overlay(&mut self, viewport: Rect, buf: &mut Buffer) {
        let Some(shell) = &self.shell else { return };
        if !shell.is_open() {
            return;
        }
        let area = shell.place_panel(self.grid_size(), viewport);
        Clear.render(area, buf);
        buf.set_style(area, self.styles.panel);
        let border = self.styles.panel_border;
        self.render_grid(area, buf, true, border);
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(shell) = self.shell.as_mut() {
            if !shell.is_open() {
                if is_toggle_key(&key) {
                    shell.toggle();
                    return true;
                }
                return false;
            }
        }
        match self.view.handle_key(key) {
            CalendarOutcome::Selected(date) => {
                self.select(date);
                true
            }
            CalendarOutcome::Moved => true,
            CalendarOutcome::Ignored => false,
        }
    }

    fn handle_click(&mut self, pos: Position) -> bool {
        if let Some(shell) = self.shell.as_mut() {
            if shell.is_open() && shell.panel_contains(pos) {
                if let Some(hit) = self.grid_layout.hit_test(pos) {
                    self.apply_hit(hit);
                }
                return true;
            }
            if shell.input_contains(pos) {
                shell.toggle();
                return true;
            }
            return false;
        }
        match self.grid_layout.hit_test(pos) {
            Some(hit) => {
                self.apply_hit(hit);
                true
            }
            None => false,
        }
    }

    fn reduce(&mut self, action: &Action) {
        if let Some(shell) = self.shell.as_mut() {
            if let Some(reason) = shell.close_request(action) {
                shell.close(reason);
            }
        }
    }

    fn is_open(&self) -> bool {
        self.shell.as_ref().is_some_and(|shell| shell.is_open())
    }
}
