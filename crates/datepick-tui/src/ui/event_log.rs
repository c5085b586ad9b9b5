/// Panel with the most recent application log lines
use crate::stores::app_logs_store::AppLogsState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct EventLogPanel {
    pub logs: Vec<String>,
}

impl EventLogPanel {
    pub fn from_state(app_logs_state: &AppLogsState) -> Self {
        Self {
            logs: app_logs_state.logs.clone(),
        }
    }
}

impl Widget for EventLogPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Event Log ")
            .border_style(Style::default().fg(Color::Cyan));

        if self.logs.is_empty() {
            Paragraph::new("No events yet...")
                .block(block)
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        // newest lines at the bottom
        let inner_height = area.height.saturating_sub(2) as usize;
        let start = self.logs.len().saturating_sub(inner_height);
        let visible: Vec<Line> = self.logs[start..]
            .iter()
            .map(|log| Line::from(log.clone()))
            .collect();

        Paragraph::new(visible).block(block).render(area, buf);
    }
}
