//! The showcase page: one section per widget configuration, all sharing the
//! three values held by [`DemoStore`](crate::stores::DemoStore).

use crate::actions::{Action, SectionId};
use crate::common::CustomInput;
use crate::dispatcher::Dispatcher;
use crate::pickers::{
    Calendar, CalendarProps, DateRangePicker, DateRangeProps, DateTimePicker, DateTimeProps,
    Picker, PickerContext, PickerId,
};
use crate::stores::DemoState;
use chrono::{NaiveDate, NaiveDateTime};
use datepick_core::DisplayFormat;
use datepick_core::RangeSelection;
use datepick_core::config::PickerConfig;
use ratatui::{
    buffer::Buffer,
    crossterm::event::KeyEvent,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Widget},
};
use serde_json::{Value, json};

/// Enum to house the widget each section shows, so the app loop can drive
/// them all through one type
pub enum DemoWidget {
    Calendar(Calendar),
    Range(DateRangePicker),
    DateTime(DateTimePicker),
}

impl DemoWidget {
    /// Hand the widget the current shared value
    pub fn sync(&mut self, state: &DemoState) {
        match self {
            Self::Calendar(calendar) => calendar.sync_date(Some(&state.date)),
            Self::Range(picker) => picker.sync_ranges(&state.ranges),
            Self::DateTime(picker) => picker.sync_date(Some(&state.date_time)),
        }
    }
}

impl Picker for DemoWidget {
    fn id(&self) -> PickerId {
        match self {
            Self::Calendar(calendar) => calendar.id(),
            Self::Range(picker) => picker.id(),
            Self::DateTime(picker) => picker.id(),
        }
    }

    fn height(&self) -> u16 {
        match self {
            Self::Calendar(calendar) => calendar.height(),
            Self::Range(picker) => picker.height(),
            Self::DateTime(picker) => picker.height(),
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, focused: bool) {
        match self {
            Self::Calendar(calendar) => calendar.render(area, buf, focused),
            Self::Range(picker) => picker.render(area, buf, focused),
            Self::DateTime(picker) => picker.render(area, buf, focused),
        }
    }

    fn render_overlay(&mut self, viewport: Rect, buf: &mut Buffer) {
        match self {
            Self::Calendar(calendar) => calendar.render_overlay(viewport, buf),
            Self::Range(picker) => picker.render_overlay(viewport, buf),
            Self::DateTime(picker) => picker.render_overlay(viewport, buf),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self {
            Self::Calendar(calendar) => calendar.handle_key(key),
            Self::Range(picker) => picker.handle_key(key),
            Self::DateTime(picker) => picker.handle_key(key),
        }
    }

    fn handle_click(&mut self, pos: Position) -> bool {
        match self {
            Self::Calendar(calendar) => calendar.handle_click(pos),
            Self::Range(picker) => picker.handle_click(pos),
            Self::DateTime(picker) => picker.handle_click(pos),
        }
    }

    fn reduce(&mut self, action: &Action) {
        match self {
            Self::Calendar(calendar) => calendar.reduce(action),
            Self::Range(picker) => picker.reduce(action),
            Self::DateTime(picker) => picker.reduce(action),
        }
    }

    fn is_open(&self) -> bool {
        match self {
            Self::Calendar(calendar) => calendar.is_open(),
            Self::Range(picker) => picker.is_open(),
            Self::DateTime(picker) => picker.is_open(),
        }
    }
}

pub struct DemoSection {
    pub id: SectionId,
    pub widget: DemoWidget,
    months: usize,
}

impl DemoSection {
    pub fn description(&self) -> &'static str {
        match self.id {
            SectionId::DefaultCalendar => "Inline calendar with a custom border style.",
            SectionId::RangeTwoMonths => {
                "Range picker with presets; shows two months side by side by default."
            }
            SectionId::RangeThreeMonths => "Range picker configured to show three months.",
            SectionId::DateTime => "Date and time picker with a Today button.",
            SectionId::DateOnly => "Date-time picker with the time row switched off.",
            SectionId::CustomDate => "Calendar opened from a caller-drawn input.",
            SectionId::CustomRange => "Range picker behind a caller-drawn input.",
            SectionId::CustomDateTime => "Date-time picker behind a caller-drawn input.",
        }
    }

    /// The "Selected: ..." line under the widget
    pub fn selected_text(&self, state: &DemoState, format: &DisplayFormat) -> String {
        match self.id {
            SectionId::DefaultCalendar | SectionId::CustomDate => format.date_text(&state.date),
            SectionId::RangeTwoMonths | SectionId::RangeThreeMonths | SectionId::CustomRange => {
                format.range_text(state.range())
            }
            SectionId::DateOnly => format.date_text(&state.date_time.date()),
            SectionId::DateTime | SectionId::CustomDateTime => {
                state.date_time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
            }
        }
    }

    pub fn code_title(&self) -> &'static str {
        match self.id {
            SectionId::DefaultCalendar => "Calendar",
            SectionId::RangeTwoMonths => "DateRangePicker",
            SectionId::RangeThreeMonths => "DateRangePicker (3 months)",
            SectionId::DateTime => "DateTimePicker",
            SectionId::DateOnly => "DateTimePicker (date only)",
            SectionId::CustomDate => "Calendar with custom input",
            SectionId::CustomRange => "DateRangePicker with custom input",
            SectionId::CustomDateTime => "DateTimePicker with custom input",
        }
    }

    /// How the widget of this section is constructed
    pub fn usage(&self) -> &'static str {
        match self.id {
            SectionId::DefaultCalendar => {
                "Calendar::new(id, context, CalendarProps::new()\n    .date(state.date.clone())\n    .on_change(handle_date_change)\n    .class_name(Style::new().fg(Color::LightRed)))"
            }
            SectionId::RangeTwoMonths => {
                "DateRangePicker::new(id, context,\n    DateRangeProps::new(state.ranges.clone())\n        .on_change(handle_range_change))"
            }
            SectionId::RangeThreeMonths => {
                "DateRangePicker::new(id, context,\n    DateRangeProps::new(state.ranges.clone())\n        .on_change(handle_range_change)\n        .months(3))"
            }
            SectionId::DateTime => {
                "DateTimePicker::new(id, context, DateTimeProps::new()\n    .date(state.date_time.clone())\n    .on_change(handle_date_time_change))"
            }
            SectionId::DateOnly => {
                "DateTimePicker::new(id, context, DateTimeProps::new()\n    .date(state.date_time.clone())\n    .on_change(handle_date_time_change)\n    .show_time(false))"
            }
            SectionId::CustomDate => {
                "let custom_date_input = CustomInput::new(3, |props, area, buf| {\n    // rounded red frame, bold text\n});\n\nCalendar::new(id, context, CalendarProps::new()\n    .date(state.date.clone())\n    .on_change(handle_date_change)\n    .custom_input(custom_date_input))"
            }
            SectionId::CustomRange => {
                "let custom_range_input = CustomInput::new(3, |props, area, buf| {\n    // rounded blue frame with calendar icons\n});\n\nDateRangePicker::new(id, context,\n    DateRangeProps::new(state.ranges.clone())\n        .on_change(handle_range_change)\n        .custom_input(custom_range_input))"
            }
            SectionId::CustomDateTime => {
                "let custom_date_time_input = CustomInput::new(3, |props, area, buf| {\n    // rounded magenta frame with clock icons\n});\n\nDateTimePicker::new(id, context, DateTimeProps::new()\n    .date(state.date_time.clone())\n    .on_change(handle_date_time_change)\n    .custom_input(custom_date_time_input))"
            }
        }
    }

    /// The props this section currently passes, for the code box
    pub fn props_json(&self, state: &DemoState, format: &DisplayFormat) -> Value {
        let ranges = || {
            serde_json::to_value(state.ranges.as_ref()).unwrap_or_else(|e| {
                log::warn!("Error serializing ranges: {}", e);
                Value::Null
            })
        };
        let date_time = || state.date_time.format("%Y-%m-%dT%H:%M:%S").to_string();
        match self.id {
            SectionId::DefaultCalendar => json!({
                "date": format.date_text(&state.date),
                "on_change": "handle_date_change",
                "class_name": "fg(LightRed)",
            }),
            SectionId::RangeTwoMonths | SectionId::RangeThreeMonths => json!({
                "ranges": ranges(),
                "on_change": "handle_range_change",
                "months": self.months,
            }),
            SectionId::DateTime => json!({
                "date": date_time(),
                "on_change": "handle_date_time_change",
            }),
            SectionId::DateOnly => json!({
                "date": date_time(),
                "on_change": "handle_date_time_change",
                "show_time": false,
            }),
            SectionId::CustomDate => json!({
                "date": format.date_text(&state.date),
                "on_change": "handle_date_change",
                "custom_input": "custom_date_input",
            }),
            SectionId::CustomRange => json!({
                "ranges": ranges(),
                "on_change": "handle_range_change",
                "custom_input": "custom_range_input",
            }),
            SectionId::CustomDateTime => json!({
                "date": date_time(),
                "on_change": "handle_date_time_change",
                "custom_input": "custom_date_time_input",
            }),
        }
    }
}

fn handle_date_change(
    dispatcher: Dispatcher,
    picker: PickerId,
) -> impl Fn(&NaiveDate) + Send + Sync {
    move |date| dispatcher.dispatch(Action::DateSelected { picker, date: *date })
}

fn handle_range_change(
    dispatcher: Dispatcher,
    picker: PickerId,
) -> impl Fn(&RangeSelection) + Send + Sync {
    move |selection| {
        dispatcher.dispatch(Action::RangeChanged {
            picker,
            selection: selection.clone(),
        })
    }
}

fn handle_date_time_change(
    dispatcher: Dispatcher,
    picker: PickerId,
) -> impl Fn(&NaiveDateTime) + Send + Sync {
    move |value| dispatcher.dispatch(Action::DateTimeChanged { picker, value: *value })
}

/// A rounded frame in `color` with an optional icon on each side of the text
fn framed_input(color: Color, lead: &'static str, trail: &'static str) -> CustomInput {
    CustomInput::new(3, move |props, area, buf| {
        let border = if props.expanded || props.focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        };
        let block = Block::bordered()
            .border_type(border)
            .border_style(Style::new().fg(color));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let text = if lead.is_empty() {
            props.shown_text().to_string()
        } else {
            format!("{} {}", lead, props.shown_text())
        };
        let text_style = Style::new().fg(color).add_modifier(Modifier::BOLD);
        buf.set_stringn(
            inner.x + 1,
            inner.y,
            text,
            inner.width.saturating_sub(4) as usize,
            text_style,
        );
        if !trail.is_empty() {
            buf.set_string(inner.right() - 3, inner.y, trail, Style::new().fg(color));
        }
    })
}

pub struct DemoPage {
    sections: Vec<DemoSection>,
    format: DisplayFormat,
}

impl DemoPage {
    pub fn new(context: PickerContext, config: &PickerConfig, state: &DemoState) -> Self {
        let sections = SectionId::ALL
            .iter()
            .map(|id| build_section(*id, &context, config, state))
            .collect();
        Self {
            sections,
            format: config.format.clone(),
        }
    }

    pub fn format(&self) -> &DisplayFormat {
        &self.format
    }

    pub fn section(&self, id: SectionId) -> &DemoSection {
        &self.sections[id.index()]
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut DemoSection {
        &mut self.sections[id.index()]
    }

    /// Pass new store values down; widgets only re-derive on a new reference
    pub fn sync(&mut self, state: &DemoState) {
        for section in &mut self.sections {
            section.widget.sync(state);
        }
    }

    pub fn reduce(&mut self, action: &Action) {
        for section in &mut self.sections {
            section.widget.reduce(action);
        }
    }

    pub fn any_open(&self) -> bool {
        self.sections.iter().any(|section| section.widget.is_open())
    }
}

fn build_section(
    id: SectionId,
    context: &PickerContext,
    config: &PickerConfig,
    state: &DemoState,
) -> DemoSection {
    let picker = PickerId(id.index());
    let dispatcher = context.dispatcher.clone();
    let context = context.clone();

    let range_props = |months: usize| {
        DateRangeProps::new(state.ranges.clone())
            .on_change(handle_range_change(dispatcher.clone(), picker))
            .months(months)
            .placeholder(config.range_placeholder.clone())
            .format(config.format.clone())
    };
    let date_time_props = || {
        DateTimeProps::new()
            .date(state.date_time.clone())
            .on_change(handle_date_time_change(dispatcher.clone(), picker))
            .hour12(config.hour12)
            .placeholder(config.date_time_placeholder.clone())
            .format(config.format.clone())
    };
    let calendar_props = || {
        CalendarProps::new()
            .date(state.date.clone())
            .on_change(handle_date_change(dispatcher.clone(), picker))
            .format(config.format.clone())
    };

    let (widget, months) = match id {
        SectionId::DefaultCalendar => (
            DemoWidget::Calendar(Calendar::new(
                picker,
                context,
                calendar_props().class_name(Style::new().fg(Color::LightRed)),
            )),
            1,
        ),
        SectionId::RangeTwoMonths => (
            DemoWidget::Range(DateRangePicker::new(
                picker,
                context,
                range_props(config.months),
            )),
            config.months,
        ),
        SectionId::RangeThreeMonths => (
            DemoWidget::Range(DateRangePicker::new(picker, context, range_props(3))),
            3,
        ),
        SectionId::DateTime => (
            DemoWidget::DateTime(DateTimePicker::new(
                picker,
                context,
                date_time_props().show_time(config.show_time),
            )),
            1,
        ),
        SectionId::DateOnly => (
            DemoWidget::DateTime(DateTimePicker::new(
                picker,
                context,
                date_time_props().show_time(false),
            )),
            1,
        ),
        SectionId::CustomDate => (
            DemoWidget::Calendar(Calendar::new(
                picker,
                context,
                calendar_props().custom_input(framed_input(Color::Red, "", "")),
            )),
            1,
        ),
        SectionId::CustomRange => (
            DemoWidget::Range(DateRangePicker::new(
                picker,
                context,
                range_props(config.months)
                    .custom_input(framed_input(Color::Blue, "📅", "🗓")),
            )),
            config.months,
        ),
        SectionId::CustomDateTime => (
            DemoWidget::DateTime(DateTimePicker::new(
                picker,
                context,
                date_time_props()
                    .show_time(config.show_time)
                    .custom_input(framed_input(Color::Magenta, "🕐", "⏰")),
            )),
            1,
        ),
    };

    DemoSection { id, widget, months }
}
