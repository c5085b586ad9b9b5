/// Layout manager for the demo page
use crate::actions::SectionId;
use crate::common::centered_rect;
use crate::demo::DemoPage;
use crate::keyboard::help_lines;
use crate::pickers::Picker;
use crate::stores::{AppLogsStore, DemoStore, UIStore};
use crate::ui::{CodeBox, EventLogPanel};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Widget, Wrap},
};

const EVENT_LOG_HEIGHT: u16 = 8;
const MAX_INPUT_WIDTH: u16 = 44;

/// Render the complete page. Widgets get `&mut` access because they record
/// where they were drawn for hit testing.
pub fn render_layout(
    frame: &mut Frame,
    ui_store: &UIStore,
    demo_store: &DemoStore,
    app_logs_store: &AppLogsStore,
    page: &mut DemoPage,
) {
    let area = frame.area();
    render_page(
        area,
        frame.buffer_mut(),
        ui_store,
        demo_store,
        app_logs_store,
        page,
    );
}

pub fn render_page(
    area: Rect,
    buf: &mut Buffer,
    ui_store: &UIStore,
    demo_store: &DemoStore,
    app_logs_store: &AppLogsStore,
    page: &mut DemoPage,
) {
    let ui_state = ui_store.get_state();

    // Header | Tabs | Section | Event log | Footer
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(EVENT_LOG_HEIGHT),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(vertical_chunks[0], buf);
    render_tabs(vertical_chunks[1], buf, ui_state.active_section);
    render_section(vertical_chunks[2], buf, ui_state.active_section, demo_store, page);
    EventLogPanel::from_state(&app_logs_store.get_state()).render(vertical_chunks[3], buf);
    render_footer(vertical_chunks[4], buf, page.any_open());

    // open panels float above everything else
    page.section_mut(ui_state.active_section)
        .widget
        .render_overlay(area, buf);

    if ui_state.show_help {
        render_help(area, buf);
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let header_text = Line::from(vec![
        Span::styled(
            " DATEPICK ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Date selection widgets demo | Today: "),
        Span::styled(
            chrono::Local::now().format("%a %b %-d, %Y").to_string(),
            Style::default().fg(Color::Green),
        ),
    ]);

    Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL))
        .render(area, buf);
}

fn render_tabs(area: Rect, buf: &mut Buffer, active: SectionId) {
    let titles: Vec<String> = SectionId::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| format!("{}: {}", i + 1, section.tab_label()))
        .collect();

    Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(active.index())
        .divider("|")
        .render(area, buf);
}

fn render_section(
    area: Rect,
    buf: &mut Buffer,
    active: SectionId,
    demo_store: &DemoStore,
    page: &mut DemoPage,
) {
    let state = demo_store.get_state();
    let format = page.format().clone();

    // Widget | Code box
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let section = page.section_mut(active);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", section.id.title()))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(horizontal_chunks[0]);
    block.render(horizontal_chunks[0], buf);

    let widget_height = section.widget.height();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(widget_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    Paragraph::new(section.description())
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .render(rows[0], buf);

    let widget_area = Rect {
        width: rows[1].width.min(MAX_INPUT_WIDTH),
        ..rows[1]
    };
    section.widget.render(widget_area, buf, true);

    Paragraph::new(Line::from(vec![
        Span::styled("Selected: ", Style::default().fg(Color::DarkGray)),
        Span::raw(section.selected_text(&state, &format)),
    ]))
    .render(rows[3], buf);

    CodeBox::new(section.code_title(), section.usage())
        .props(section.props_json(&state, &format))
        .render(horizontal_chunks[1], buf);
}

fn render_footer(area: Rect, buf: &mut Buffer, picker_open: bool) {
    let help_text = if picker_open {
        "Tab:Next control | Enter:Select | Esc:Close panel"
    } else {
        "q:Quit | Tab/1-8:Section | Enter:Open | ?:Help"
    };

    Paragraph::new(Line::from(vec![Span::raw(" "), Span::raw(help_text)]))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .render(area, buf);
}

fn render_help(area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(60, 50, area);
    Clear.render(popup, buf);

    let lines: Vec<Line> = help_lines()
        .into_iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<20}", keys),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(what),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .render(popup, buf);
}
