//! Date range picker: a read-only input summarising the first range, and a
//! floating panel with preset ranges beside a multi-month calendar.
//!
//! Local ranges mirror the `ranges` prop and are re-derived whenever the
//! caller hands over a new `Arc`. Every selection made in the panel is
//! forwarded to `on_change` straight away; Apply only closes the panel and
//! Cancel drops back to a today/today range without telling the caller.

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
use chrono::{Local, NaiveDate};
use datepick_core::config::{DATEPICK_MONTHS, DATEPICK_RANGE_PLACEHOLDER, clamp_months};
use datepick_core::presets::{
    InputRange, StaticRange, default_input_ranges, default_static_ranges,
};
use datepick_core::range::{
    DEFAULT_RANGE_KEY, SelectionOptions, apply_preset, calc_new_selection, find_next_range_index,
};
use datepick_core::time_of_day::parse_field;
use datepick_core::{Boundary, DisplayFormat, FocusedRange, Range, RangeSelection};
use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Direction, Layout, Position, Rect, Size},
    style::Style,
    widgets::{Block, Clear, Widget},
};
use std::sync::Arc;

const PRESET_WIDTH: u16 = 26;
const COLUMN_GAP: u16 = 2;
const BUTTONS: [Button; 2] = [
    Button::new("Cancel", ButtonKind::Danger),
    Button::new("Apply", ButtonKind::Primary),
];
const CANCEL: usize = 0;
const APPLY: usize = 1;

#[derive(Clone)]
pub struct DateRangeProps {
    pub ranges: Arc<Vec<Range>>,
    pub on_change: Option<OnChange<RangeSelection>>,
    pub months: usize,
    pub placeholder: String,
    pub styles: StyleProps,
    pub custom_input: Option<CustomInput>,
    pub selection: SelectionOptions,
    pub static_ranges: Vec<StaticRange>,
    pub input_ranges: Vec<InputRange>,
    pub format: DisplayFormat,
}

impl DateRangeProps {
    pub fn new(ranges: Arc<Vec<Range>>) -> Self {
        Self {
            ranges,
            on_change: None,
            months: DATEPICK_MONTHS,
            placeholder: DATEPICK_RANGE_PLACEHOLDER.to_string(),
            styles: StyleProps::default(),
            custom_input: None,
            selection: SelectionOptions::default(),
            static_ranges: default_static_ranges(),
            input_ranges: default_input_ranges(),
            format: DisplayFormat::default(),
        }
    }

    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(&RangeSelection) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub fn months(mut self, months: usize) -> Self {
        self.months = clamp_months(months);
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

    pub fn selection_options(mut self, selection: SelectionOptions) -> Self {
        self.selection = selection;
        self
    }

    pub fn static_ranges(mut self, static_ranges: Vec<StaticRange>) -> Self {
        self.static_ranges = static_ranges;
        self
    }

    pub fn input_ranges(mut self, input_ranges: Vec<InputRange>) -> Self {
        self.input_ranges = input_ranges;
        self
    }

    pub fn format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }
}

/// Which part of the open panel receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    Presets,
    #[default]
    Calendar,
    Buttons,
}

impl PanelFocus {
    fn next(self) -> Self {
        match self {
            Self::Presets => Self::Calendar,
            Self::Calendar => Self::Buttons,
            Self::Buttons => Self::Presets,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Presets => Self::Buttons,
            Self::Calendar => Self::Presets,
            Self::Buttons => Self::Calendar,
        }
    }
}

/// A row in the presets column: static presets first, then input presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetRow {
    Static(usize),
    Input(usize),
}

/// Clickable areas recorded by the last panel render
#[derive(Debug, Clone, Default)]
struct PanelLayout {
    rows: Vec<(Rect, PresetRow)>,
    grid: CalendarLayout,
    buttons: Vec<Rect>,
}

pub struct DateRangePicker {
    props: DateRangeProps,
    styles: PickerStyles,
    shell: PopoverShell,
    ranges: Vec<Range>,
    focused_range: FocusedRange,
    selected_text: String,
    prop_ranges: PropRef<Vec<Range>>,
    view: CalendarView,
    panel_focus: PanelFocus,
    preset_cursor: usize,
    button_cursor: usize,
    fields: Vec<NumberField>,
    /// Input preset currently being typed into
    editing_field: Option<usize>,
    layout: PanelLayout,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl DateRangePicker {
    pub fn new(id: PickerId, context: PickerContext, props: DateRangeProps) -> Self {
        let shell = PopoverShell::new(
            id,
            context,
            PopoverOptions::range_picker(),
            ListenerScope::Lifetime,
        );
        let fields = props.input_ranges.iter().map(|_| NumberField::new()).collect();
        let mut picker = Self {
            styles: props.styles.resolve(),
            shell,
            ranges: Vec::new(),
            focused_range: FocusedRange::default(),
            selected_text: String::new(),
            prop_ranges: PropRef::default(),
            view: CalendarView::new(today(), props.months),
            panel_focus: PanelFocus::default(),
            preset_cursor: 0,
            button_cursor: APPLY,
            fields,
            editing_field: None,
            layout: PanelLayout::default(),
            props,
        };
        let ranges = picker.props.ranges.clone();
        picker.sync_ranges(&ranges);
        picker
    }

    /// Re-derive local ranges and display text when the caller passes a
    /// different `ranges` reference
    pub fn sync_ranges(&mut self, ranges: &Arc<Vec<Range>>) {
        if !self.prop_ranges.update(Some(ranges)) {
            return;
        }
        // the caller handing back what we just reported keeps focus and view
        let echo = ranges.as_slice() == self.ranges.as_slice();
        self.props.ranges = ranges.clone();
        self.selected_text = self.props.format.range_text(ranges.first());
        self.ranges = if ranges.is_empty() {
            vec![Range::empty(DEFAULT_RANGE_KEY)]
        } else {
            ranges.as_ref().clone()
        };
        if !echo {
            self.focused_range = self.initial_focus();
            self.editing_field = None;
            self.view = CalendarView::new(self.cursor_anchor(), self.props.months);
        }
        self.refresh_fields();
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    pub fn focused_range(&self) -> FocusedRange {
        self.focused_range
    }

    pub fn panel_focus(&self) -> PanelFocus {
        self.panel_focus
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    fn initial_focus(&self) -> FocusedRange {
        let index = find_next_range_index(&self.ranges, None).unwrap_or(0);
        FocusedRange::new(index, Boundary::Start)
    }

    fn focused(&self) -> Option<&Range> {
        self.ranges
            .get(self.focused_range.range_index)
            .or_else(|| self.ranges.first())
    }

    fn cursor_anchor(&self) -> NaiveDate {
        self.focused()
            .and_then(|range| range.start_date)
            .unwrap_or_else(today)
    }

    fn preset_rows(&self) -> Vec<PresetRow> {
        (0..self.props.static_ranges.len())
            .map(PresetRow::Static)
            .chain((0..self.props.input_ranges.len()).map(PresetRow::Input))
            .collect()
    }

    fn refresh_fields(&mut self) {
        let today = today();
        let current = self.focused().cloned();
        for (i, field) in self.fields.iter_mut().enumerate() {
            if self.editing_field == Some(i) {
                continue;
            }
            let text = match (&current, self.props.input_ranges.get(i)) {
                (Some(range), Some(input)) => input.current_value(range, today).to_string(),
                _ => "-".to_string(),
            };
            field.set_text(text);
        }
    }

    /// Adopt the first range of `selection`, refresh the text and tell the caller
    fn handle_range_change(&mut self, selection: RangeSelection) {
        let Some(updated) = selection.values().next().cloned() else {
            return;
        };
        self.selected_text = self.props.format.range_text(Some(&updated));
        self.ranges = vec![updated];
        if self.focused_range.range_index >= self.ranges.len() {
            self.focused_range = FocusedRange::new(0, self.focused_range.boundary);
        }
        self.refresh_fields();
        log::debug!(
            "Range picker {:?} selection changed: {}",
            self.shell.id(),
            self.selected_text
        );
        if let Some(on_change) = &self.props.on_change {
            on_change(&selection);
        }
    }

    fn marks_disabled(&self, date: NaiveDate) -> bool {
        DayMarks {
            disabled: &self.props.selection.disabled_dates,
            max_date: self.props.selection.max_date,
            ..Default::default()
        }
        .is_disabled(date)
    }

    /// A day was picked on the calendar
    pub fn select_day(&mut self, date: NaiveDate) {
        if self.marks_disabled(date) {
            log::debug!("Ignoring disabled day {}", date);
            return;
        }
        let Some(selection) = calc_new_selection(
            &self.ranges,
            self.focused_range,
            date,
            &self.props.selection,
            today(),
        ) else {
            return;
        };
        self.focused_range = selection.next_focus;
        self.view.focus(date);
        self.handle_range_change(selection.range.into_selection());
    }

    /// The dates a preset row would select right now
    pub fn row_range(&self, row: PresetRow) -> Option<(NaiveDate, NaiveDate)> {
        let today = today();
        match row {
            PresetRow::Static(i) => self.props.static_ranges.get(i).map(|s| s.range(today)),
            PresetRow::Input(i) => {
                let input = self.props.input_ranges.get(i)?;
                let days = self
                    .fields
                    .get(i)
                    .and_then(|field| parse_field(field.text()).ok())?;
                input.range(days, today)
            }
        }
    }

    fn apply_row(&mut self, row: PresetRow) {
        let Some((start, end)) = self.row_range(row) else {
            log::debug!("Preset {:?} has no value to apply", row);
            return;
        };
        let selection = apply_preset(&self.ranges, self.focused_range, start, end);
        self.view.focus(start);
        self.handle_range_change(selection);
    }

    /// Range previewed on the calendar while the presets column has focus
    pub fn preview(&self) -> Option<(NaiveDate, NaiveDate)> {
        if !self.is_open() || self.panel_focus != PanelFocus::Presets {
            return None;
        }
        let row = *self.preset_rows().get(self.preset_cursor)?;
        self.row_range(row)
    }

    fn move_preset_cursor(&mut self, delta: isize) {
        let rows = self.preset_rows().len();
        if rows == 0 {
            return;
        }
        self.preset_cursor =
            (self.preset_cursor as isize + delta).rem_euclid(rows as isize) as usize;
        self.editing_field = None;
        self.refresh_fields();
    }

    fn edit_field(&mut self, index: usize, key: KeyEvent) -> bool {
        let Some(edit) = self.fields.get_mut(index).and_then(|f| f.handle_key(key)) else {
            return false;
        };
        self.editing_field = Some(index);
        let FieldEdit::Text(text) = edit else {
            return true;
        };
        match parse_field(&text) {
            Ok(days) => {
                let Some(input) = self.props.input_ranges.get(index) else {
                    return true;
                };
                match input.range(days, today()) {
                    Some((start, end)) => {
                        let selection = apply_preset(&self.ranges, self.focused_range, start, end);
                        self.view.focus(start);
                        self.handle_range_change(selection);
                    }
                    None => log::warn!("{} days is outside the supported calendar", days),
                }
            }
            Err(e) => log::debug!("Input preset not applied: {}", e),
        }
        true
    }

    fn open(&mut self) {
        self.shell.open();
        self.panel_focus = PanelFocus::Calendar;
        self.button_cursor = APPLY;
        self.view.focus(self.cursor_anchor());
    }

    fn close(&mut self, reason: CloseReason) {
        self.shell.close(reason);
        self.editing_field = None;
        self.refresh_fields();
    }

    /// Apply: close and keep the current selection
    pub fn apply(&mut self) {
        self.close(CloseReason::Apply);
    }

    /// Cancel: back to today/today with an empty input, caller not notified
    pub fn cancel(&mut self) {
        self.ranges = vec![Range::today()];
        self.selected_text.clear();
        self.focused_range = self.initial_focus();
        self.close(CloseReason::Cancel);
    }

    fn press_button(&mut self, index: usize) {
        match index {
            CANCEL => self.cancel(),
            APPLY => self.apply(),
            _ => {}
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => {
                self.panel_focus = self.panel_focus.next();
                return true;
            }
            KeyCode::BackTab => {
                self.panel_focus = self.panel_focus.previous();
                return true;
            }
            _ => {}
        }

        match self.panel_focus {
            PanelFocus::Presets => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_preset_cursor(-1);
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_preset_cursor(1);
                    true
                }
                KeyCode::Enter => {
                    if let Some(row) = self.preset_rows().get(self.preset_cursor).copied() {
                        self.apply_row(row);
                    }
                    true
                }
                KeyCode::Char(c) if c.is_ascii_digit() => self.edit_cursor_field(key),
                KeyCode::Backspace => self.edit_cursor_field(key),
                _ => false,
            },
            PanelFocus::Calendar => match self.view.handle_key(key) {
                CalendarOutcome::Selected(date) => {
                    self.select_day(date);
                    true
                }
                CalendarOutcome::Moved => true,
                CalendarOutcome::Ignored => false,
            },
            PanelFocus::Buttons => match key.code {
                KeyCode::Left | KeyCode::Right => {
                    self.button_cursor = 1 - self.button_cursor;
                    true
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.press_button(self.button_cursor);
                    true
                }
                _ => false,
            },
        }
    }

    fn edit_cursor_field(&mut self, key: KeyEvent) -> bool {
        match self.preset_rows().get(self.preset_cursor) {
            Some(PresetRow::Input(i)) => {
                let i = *i;
                self.edit_field(i, key)
            }
            _ => false,
        }
    }

    fn handle_panel_click(&mut self, pos: Position) {
        if let Some(row) = self
            .layout
            .rows
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, row)| *row)
        {
            self.panel_focus = PanelFocus::Presets;
            if let Some(index) = self.preset_rows().iter().position(|r| *r == row) {
                self.preset_cursor = index;
            }
            if let PresetRow::Static(_) = row {
                self.apply_row(row);
            }
            return;
        }
        if let Some(index) = self.layout.buttons.iter().position(|rect| rect.contains(pos)) {
            self.press_button(index);
            return;
        }
        match self.layout.grid.hit_test(pos) {
            Some(CalendarHit::PrevMonth) => self.view.shift_months(-1),
            Some(CalendarHit::NextMonth) => self.view.shift_months(1),
            Some(CalendarHit::Day(date)) => {
                self.panel_focus = PanelFocus::Calendar;
                self.select_day(date);
            }
            None => {}
        }
    }

    fn panel_size(&self) -> Size {
        let rows = (self.preset_rows().len() as u16).max(self.view.height());
        Size::new(
            2 + PRESET_WIDTH + COLUMN_GAP + self.view.width(),
            2 + rows + 2,
        )
    }

    fn render_presets(&mut self, area: Rect, buf: &mut Buffer) {
        let today = today();
        let current = self.focused().cloned();
        let show_cursor = self.panel_focus == PanelFocus::Presets;
        self.layout.rows.clear();

        for (i, row) in self.preset_rows().into_iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.bottom() {
                break;
            }
            let rect = Rect::new(area.x, y, area.width, 1);
            let at_cursor = show_cursor && i == self.preset_cursor;
            match row {
                PresetRow::Static(s) => {
                    let preset = &self.props.static_ranges[s];
                    let selected = current
                        .as_ref()
                        .is_some_and(|range| preset.is_selected(range, today));
                    let style = if at_cursor {
                        self.styles.preset_cursor
                    } else if selected {
                        self.styles.preset_selected
                    } else {
                        self.styles.preset
                    };
                    buf.set_style(rect, style);
                    buf.set_stringn(
                        rect.x,
                        y,
                        format!(" {}", preset.label),
                        rect.width as usize,
                        style,
                    );
                }
                PresetRow::Input(n) => {
                    let value = self.fields[n].render_value(rect, buf, at_cursor, &self.styles);
                    let label_x = value.right() + 1;
                    if label_x < rect.right() {
                        buf.set_stringn(
                            label_x,
                            y,
                            self.props.input_ranges[n].label,
                            (rect.right() - label_x) as usize,
                            self.styles.label,
                        );
                    }
                }
            }
            self.layout.rows.push((rect, row));
        }
    }

    fn render_footer(&mut self, area: Rect, buf: &mut Buffer) {
        let status = match self.focused_range.boundary {
            Boundary::Start => "Pick a start date",
            Boundary::End => "Pick an end date",
        };
        buf.set_stringn(area.x, area.y, status, area.width as usize, self.styles.label);
        let focused = (self.panel_focus == PanelFocus::Buttons).then_some(self.button_cursor);
        self.layout.buttons = render_button_row(&BUTTONS, focused, area, buf, &self.styles);
    }
}

impl Picker for DateRangePicker {
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
        let props = InputProps::new(
            &self.selected_text,
            &self.props.placeholder,
            self.shell.is_open(),
            focused,
        );
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
            .title(" Select range ")
            .border_style(self.styles.panel_border);
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Presets + calendar
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Status + buttons
            ])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(PRESET_WIDTH),
                Constraint::Length(COLUMN_GAP),
                Constraint::Min(0),
            ])
            .split(rows[0]);

        self.render_presets(columns[0], buf);

        let preview = self.preview();
        let marks = DayMarks {
            ranges: &self.ranges,
            preview,
            today: Some(today()),
            disabled: &self.props.selection.disabled_dates,
            max_date: self.props.selection.max_date,
            ..Default::default()
        };
        self.layout.grid = CalendarGrid::new(&self.view, marks, &self.styles)
            .show_cursor(self.panel_focus == PanelFocus::Calendar)
            .render(columns[2], buf);

        self.render_footer(rows[2], buf);
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
