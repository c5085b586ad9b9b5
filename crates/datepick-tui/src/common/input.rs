use crate::styles::PickerStyles;
use ratatui::{
    buffer::Buffer,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind},
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use std::fmt;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// Icon drawn at the right edge of the default input
pub const DEFAULT_ICON: &str = "▦";
pub const DEFAULT_INPUT_HEIGHT: u16 = 3;

/// Attributes a picker hands to whatever renders its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputProps<'a> {
    /// Current display text, empty when nothing is selected
    pub value: &'a str,
    pub placeholder: &'a str,
    /// Whether the panel is open
    pub expanded: bool,
    pub has_popup: &'static str,
    pub role: &'static str,
    pub read_only: bool,
    pub focused: bool,
}

impl<'a> InputProps<'a> {
    pub fn new(value: &'a str, placeholder: &'a str, expanded: bool, focused: bool) -> Self {
        Self {
            value,
            placeholder,
            expanded,
            has_popup: "true",
            role: "combobox",
            read_only: true,
            focused,
        }
    }

    /// The value, or the placeholder while nothing is selected
    pub fn shown_text(&self) -> &'a str {
        if self.value.is_empty() {
            self.placeholder
        } else {
            self.value
        }
    }
}

type RenderFn = dyn Fn(&InputProps<'_>, Rect, &mut Buffer) + Send + Sync;

/// A caller-supplied input element. The picker owns its area, click and
/// keyboard handling; the caller only decides how it looks.
#[derive(Clone)]
pub struct CustomInput {
    pub height: u16,
    render: Arc<RenderFn>,
}

impl CustomInput {
    pub fn new<F>(height: u16, render: F) -> Self
    where
        F: Fn(&InputProps<'_>, Rect, &mut Buffer) + Send + Sync + 'static,
    {
        Self {
            height: height.max(1),
            render: Arc::new(render),
        }
    }

    pub fn render(&self, props: &InputProps<'_>, area: Rect, buf: &mut Buffer) {
        (self.render)(props, area, buf)
    }
}

impl fmt::Debug for CustomInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomInput")
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// How a picker draws its closed input, chosen per render
#[derive(Debug, Clone, Default)]
pub enum PickerInput {
    #[default]
    Default,
    Custom(CustomInput),
}

impl PickerInput {
    pub fn height(&self) -> u16 {
        match self {
            Self::Default => DEFAULT_INPUT_HEIGHT,
            Self::Custom(custom) => custom.height,
        }
    }

    pub fn render(
        &self,
        props: &InputProps<'_>,
        styles: &PickerStyles,
        area: Rect,
        buf: &mut Buffer,
    ) {
        match self {
            Self::Default => render_default_input(props, styles, area, buf),
            Self::Custom(custom) => custom.render(props, area, buf),
        }
    }
}

/// Enter and Space open or close a focused picker
pub fn is_toggle_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

fn render_default_input(
    props: &InputProps<'_>,
    styles: &PickerStyles,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_style = if props.expanded {
        styles.container.patch(styles.input_open)
    } else if props.focused {
        styles.container.patch(styles.input_focused)
    } else {
        styles.container
    };
    let block = Block::bordered().border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    let text_style = if props.value.is_empty() {
        styles.placeholder
    } else {
        styles.input
    };
    let icon_width = DEFAULT_ICON.width() as u16 + 1;
    let text_width = inner.width.saturating_sub(icon_width);
    Paragraph::new(Line::from(Span::styled(props.shown_text(), text_style)))
        .render(Rect { width: text_width, ..inner }, buf);
    if inner.width >= icon_width {
        buf.set_string(
            inner.right() - icon_width + 1,
            inner.y,
            DEFAULT_ICON,
            styles.icon,
        );
    }
}

/// What a keystroke did to a [`NumberField`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// The text changed and should be re-read
    Text(String),
    /// Arrow keys nudge the value
    Step(i64),
}

/// Small numeric input for hours and minutes. The first digit typed after
/// the field gains focus replaces its content.
#[derive(Debug, Clone)]
pub struct NumberField {
    text: String,
    fresh: bool,
}

impl Default for NumberField {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberField {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            fresh: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Show a value, zero padded to two digits
    pub fn set_value(&mut self, value: u32) {
        self.text = format!("{:02}", value);
        self.fresh = true;
    }

    pub fn handle_key(&mut self, ke: KeyEvent) -> Option<FieldEdit> {
        if ke.kind != KeyEventKind::Press {
            return None;
        }
        match ke.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                if self.fresh {
                    self.text.clear();
                    self.fresh = false;
                }
                self.text.push(c);
                Some(FieldEdit::Text(self.text.clone()))
            }
            KeyCode::Backspace => {
                self.fresh = false;
                self.text.pop();
                Some(FieldEdit::Text(self.text.clone()))
            }
            KeyCode::Up => Some(FieldEdit::Step(1)),
            KeyCode::Down => Some(FieldEdit::Step(-1)),
            _ => None,
        }
    }

    /// Replace the text without changing the value it came from
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.fresh = true;
    }

    /// Draw only the value box at the left of `area`
    pub fn render_value(
        &self,
        area: Rect,
        buf: &mut Buffer,
        focused: bool,
        styles: &PickerStyles,
    ) -> Rect {
        let value_style: Style = if focused {
            styles.field_focused
        } else {
            styles.field
        };
        let value_area = Rect::new(area.x, area.y, 4.min(area.width), area.height.min(1));
        buf.set_style(value_area, value_style);
        buf.set_stringn(
            value_area.x,
            value_area.y,
            format!(" {:>2} ", self.text),
            value_area.width as usize,
            value_style,
        );
        value_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::PickerStyles;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_default_input_shows_placeholder_and_icon() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let props = InputProps::new("", "Select a date range", false, false);
        PickerInput::Default.render(&props, &PickerStyles::default(), area, &mut buf);

        let line = row_text(&buf, 1);
        assert!(line.contains("Select a date range"));
        assert!(line.contains(DEFAULT_ICON));
    }

    #[test]
    fn test_custom_input_replaces_default_rendering() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        let custom = PickerInput::Custom(CustomInput::new(1, |props, area, buf| {
            buf.set_string(area.x, area.y, format!("<{}>", props.shown_text()), Style::default());
        }));
        let props = InputProps::new("10/16/2026 - 10/17/2026", "Pick", true, false);
        custom.render(&props, &PickerStyles::default(), area, &mut buf);

        let line = row_text(&buf, 0);
        assert!(line.starts_with("<10/16/2026 - 10/17/2026>"));
        assert!(!line.contains(DEFAULT_ICON));
        assert_eq!(custom.height(), 1);
    }

    #[test]
    fn test_injected_attributes() {
        let props = InputProps::new("", "Pick", true, false);
        assert_eq!(props.role, "combobox");
        assert_eq!(props.has_popup, "true");
        assert!(props.read_only);
        assert!(props.expanded);
        assert_eq!(props.shown_text(), "Pick");
    }

    #[test]
    fn test_toggle_keys() {
        assert!(is_toggle_key(&key(KeyCode::Enter)));
        assert!(is_toggle_key(&key(KeyCode::Char(' '))));
        assert!(!is_toggle_key(&key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_number_field_replaces_on_first_digit() {
        let mut field = NumberField::new();
        field.set_value(3);
        assert_eq!(field.text(), "03");

        assert_eq!(
            field.handle_key(key(KeyCode::Char('1'))),
            Some(FieldEdit::Text("1".to_string()))
        );
        assert_eq!(
            field.handle_key(key(KeyCode::Char('3'))),
            Some(FieldEdit::Text("13".to_string()))
        );
        assert_eq!(
            field.handle_key(key(KeyCode::Backspace)),
            Some(FieldEdit::Text("1".to_string()))
        );
        assert_eq!(field.handle_key(key(KeyCode::Up)), Some(FieldEdit::Step(1)));
        assert_eq!(field.handle_key(key(KeyCode::Char('x'))), None);
    }
}
