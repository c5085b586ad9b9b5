/// Reusable month grid for date selection
use crate::styles::PickerStyles;
use chrono::{Datelike, Duration, NaiveDate};
use datepick_core::calendar::{add_months, first_of_month, is_visible, month_grid, visible_months};
use datepick_core::Range;
use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::Line,
    widgets::Widget,
};

/// "Su Mo Tu We Th Fr Sa"
pub const MONTH_WIDTH: u16 = 20;
pub const MONTH_GAP: u16 = 2;
/// Header, weekday row and six weeks
pub const GRID_HEIGHT: u16 = 8;

const WEEKDAYS: &str = "Su Mo Tu We Th Fr Sa";
const PREV_ARROW: &str = "‹";
const NEXT_ARROW: &str = "›";

/// Which months are on screen and where the keyboard cursor sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    /// First day of the leftmost month
    pub shown: NaiveDate,
    pub cursor: NaiveDate,
    pub months: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarOutcome {
    Moved,
    Selected(NaiveDate),
    Ignored,
}

impl CalendarView {
    pub fn new(focus: NaiveDate, months: usize) -> Self {
        Self {
            shown: first_of_month(focus),
            cursor: focus,
            months: months.max(1),
        }
    }

    pub fn width(&self) -> u16 {
        let months = self.months as u16;
        months * MONTH_WIDTH + months.saturating_sub(1) * MONTH_GAP
    }

    pub fn height(&self) -> u16 {
        GRID_HEIGHT
    }

    /// Move the cursor, scrolling the window just enough to keep it visible
    pub fn focus(&mut self, date: NaiveDate) {
        self.cursor = date;
        if is_visible(self.shown, self.months, date) {
            return;
        }
        if date < self.shown {
            self.shown = first_of_month(date);
        } else {
            self.shown = add_months(first_of_month(date), 1 - self.months as i32);
        }
    }

    pub fn shift_months(&mut self, delta: i32) {
        self.shown = add_months(self.shown, delta);
        self.cursor = add_months(self.cursor, delta);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> CalendarOutcome {
        let step = match key.code {
            KeyCode::Left | KeyCode::Char('h') => Duration::days(-1),
            KeyCode::Right | KeyCode::Char('l') => Duration::days(1),
            KeyCode::Up | KeyCode::Char('k') => Duration::days(-7),
            KeyCode::Down | KeyCode::Char('j') => Duration::days(7),
            KeyCode::PageUp => {
                self.shift_months(-1);
                return CalendarOutcome::Moved;
            }
            KeyCode::PageDown => {
                self.shift_months(1);
                return CalendarOutcome::Moved;
            }
            KeyCode::Enter | KeyCode::Char(' ') => return CalendarOutcome::Selected(self.cursor),
            _ => return CalendarOutcome::Ignored,
        };
        match self.cursor.checked_add_signed(step) {
            Some(next) => {
                self.focus(next);
                CalendarOutcome::Moved
            }
            None => CalendarOutcome::Ignored,
        }
    }
}

/// What a click inside the grid landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarHit {
    Day(NaiveDate),
    PrevMonth,
    NextMonth,
}

/// Screen areas recorded by the last render, for mouse hit-testing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarLayout {
    days: Vec<(Rect, NaiveDate)>,
    prev: Option<Rect>,
    next: Option<Rect>,
}

impl CalendarLayout {
    pub fn hit_test(&self, pos: Position) -> Option<CalendarHit> {
        if self.prev.is_some_and(|r| r.contains(pos)) {
            return Some(CalendarHit::PrevMonth);
        }
        if self.next.is_some_and(|r| r.contains(pos)) {
            return Some(CalendarHit::NextMonth);
        }
        self.days
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, date)| CalendarHit::Day(*date))
    }
}

/// Everything that changes how an individual day is drawn
#[derive(Debug, Clone, Default)]
pub struct DayMarks<'a> {
    pub selected: Option<NaiveDate>,
    pub ranges: &'a [Range],
    pub preview: Option<(NaiveDate, NaiveDate)>,
    pub today: Option<NaiveDate>,
    pub disabled: &'a [NaiveDate],
    pub max_date: Option<NaiveDate>,
}

impl DayMarks<'_> {
    fn style_for(&self, date: NaiveDate, styles: &PickerStyles) -> Style {
        let mut style = styles.day;
        if self.today == Some(date) {
            style = style.patch(styles.day_today);
        }
        if self.ranges.iter().any(|r| r.contains(date)) {
            style = style.patch(styles.day_in_range);
        }
        if self
            .preview
            .is_some_and(|(start, end)| start <= date && date <= end)
        {
            style = style.patch(styles.day_preview);
        }
        if self.selected == Some(date) || self.ranges.iter().any(|r| r.is_edge(date)) {
            style = style.patch(styles.day_selected);
        }
        if self.is_disabled(date) {
            style = style.patch(styles.day_disabled);
        }
        style
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.disabled.contains(&date) || self.max_date.is_some_and(|max| date > max)
    }
}

/// Multi-month calendar widget that displays one Sunday-first grid per month
pub struct CalendarGrid<'a> {
    view: &'a CalendarView,
    marks: DayMarks<'a>,
    styles: &'a PickerStyles,
    show_cursor: bool,
}

impl<'a> CalendarGrid<'a> {
    pub fn new(view: &'a CalendarView, marks: DayMarks<'a>, styles: &'a PickerStyles) -> Self {
        Self {
            view,
            marks,
            styles,
            show_cursor: false,
        }
    }

    pub fn show_cursor(mut self, show_cursor: bool) -> Self {
        self.show_cursor = show_cursor;
        self
    }

    /// Render the grid and return where each clickable part ended up
    pub fn render(self, area: Rect, buf: &mut Buffer) -> CalendarLayout {
        let mut layout = CalendarLayout::default();
        let months = visible_months(self.view.shown, self.view.months);
        let last = months.len().saturating_sub(1);

        for (i, month) in months.iter().enumerate() {
            let x = area.x + i as u16 * (MONTH_WIDTH + MONTH_GAP);
            if x + MONTH_WIDTH > area.right() {
                break;
            }
            let month_area = Rect::new(x, area.y, MONTH_WIDTH, area.height.min(GRID_HEIGHT));
            self.render_month(*month, month_area, buf, &mut layout, i == 0, i == last);
        }
        layout
    }

    fn render_month(
        &self,
        month: NaiveDate,
        area: Rect,
        buf: &mut Buffer,
        layout: &mut CalendarLayout,
        first: bool,
        last: bool,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Month/Year header
                Constraint::Length(1), // Weekday headers
                Constraint::Min(0),    // Weeks
            ])
            .split(area);

        // Month/Year header with navigation arrows at the outer edges
        Line::styled(format!("{} {}", month.format("%B"), month.year()), self.styles.month_header)
            .centered()
            .render(rows[0], buf);
        if first {
            let prev = Rect::new(rows[0].x, rows[0].y, 1, rows[0].height);
            buf.set_string(prev.x, prev.y, PREV_ARROW, self.styles.nav_arrow);
            layout.prev = Some(prev);
        }
        if last {
            let next = Rect::new(rows[0].right().saturating_sub(1), rows[0].y, 1, rows[0].height);
            buf.set_string(next.x, next.y, NEXT_ARROW, self.styles.nav_arrow);
            layout.next = Some(next);
        }

        if rows[1].height > 0 {
            buf.set_string(rows[1].x, rows[1].y, WEEKDAYS, self.styles.weekday);
        }

        let grid = month_grid(month);
        for (row, week) in grid.weeks.iter().enumerate() {
            let y = rows[2].y + row as u16;
            if y >= rows[2].bottom() {
                break;
            }
            for (column, day) in week.iter().enumerate() {
                let Some(date) = day else { continue };
                let cell = Rect::new(rows[2].x + column as u16 * 3, y, 2, 1);
                let mut style = self.marks.style_for(*date, self.styles);
                if self.show_cursor && self.view.cursor == *date {
                    style = style.patch(self.styles.day_cursor);
                }
                buf.set_string(cell.x, cell.y, format!("{:>2}", date.day()), style);
                layout.days.push((cell, *date));
            }
        }
    }
}

/// Helper function to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
