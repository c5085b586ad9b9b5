/// Code box showing how a section's widget is built and what it is passed
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use serde_json::Value;

pub struct CodeBox<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub props: Option<Value>,
}

impl<'a> CodeBox<'a> {
    pub fn new(title: &'a str, usage: &'a str) -> Self {
        Self {
            title,
            usage,
            props: None,
        }
    }

    pub fn props(mut self, props: Value) -> Self {
        self.props = Some(props);
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let comment = Style::default().fg(Color::DarkGray);
        let code = Style::default().fg(Color::LightCyan);

        let mut lines = vec![
            Line::styled(
                self.title,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled("Component Usage:", comment),
        ];
        lines.extend(self.usage.lines().map(|line| Line::styled(line, code)));

        if let Some(props) = &self.props {
            match serde_json::to_string_pretty(props) {
                Ok(pretty) => {
                    lines.push(Line::default());
                    lines.push(Line::styled("Props being passed:", comment));
                    let json = Style::default().fg(Color::Green);
                    lines.extend(
                        pretty
                            .lines()
                            .map(|line| Line::styled(line.to_string(), json)),
                    );
                }
                Err(e) => log::warn!("Error rendering props: {}", e),
            }
        }
        lines
    }
}

impl Widget for CodeBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Code ")
            .border_style(Style::default().fg(Color::DarkGray));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
