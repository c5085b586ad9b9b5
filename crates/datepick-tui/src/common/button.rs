use crate::styles::PickerStyles;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Plain,
    Primary,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub kind: ButtonKind,
}

impl Button {
    pub const fn new(label: &'static str, kind: ButtonKind) -> Self {
        Self { label, kind }
    }

    /// Label plus one cell of padding each side
    pub fn width(&self) -> u16 {
        self.label.width() as u16 + 2
    }

    fn style(&self, styles: &PickerStyles, focused: bool) -> Style {
        let base = match self.kind {
            ButtonKind::Plain => styles.button,
            ButtonKind::Primary => styles.button_primary,
            ButtonKind::Danger => styles.button_danger,
        };
        if focused {
            base.patch(styles.button_focused)
        } else {
            base
        }
    }

    /// Draw the button at the left of `area` and return the area it covers
    pub fn render(
        &self,
        area: Rect,
        buf: &mut Buffer,
        focused: bool,
        styles: &PickerStyles,
    ) -> Rect {
        let rect = Rect::new(area.x, area.y, self.width().min(area.width), area.height.min(1));
        let style = self.style(styles, focused);
        buf.set_style(rect, style);
        buf.set_stringn(
            rect.x,
            rect.y,
            format!(" {} ", self.label),
            rect.width as usize,
            style,
        );
        rect
    }
}

/// Lay buttons out right-aligned on one row, one cell apart, returning each
/// button's area in the same order.
pub fn render_button_row(
    buttons: &[Button],
    focused: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
    styles: &PickerStyles,
) -> Vec<Rect> {
    let total: u16 = buttons.iter().map(|b| b.width() + 1).sum::<u16>().saturating_sub(1);
    let mut x = area.x + area.width.saturating_sub(total);
    let mut rects = Vec::with_capacity(buttons.len());
    for (i, button) in buttons.iter().enumerate() {
        let slot = Rect::new(x, area.y, area.right().saturating_sub(x), area.height.min(1));
        rects.push(button.render(slot, buf, focused == Some(i), styles));
        x = x.saturating_add(button.width() + 1).min(area.right());
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_is_right_aligned() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        let buttons = [
            Button::new("Cancel", ButtonKind::Danger),
            Button::new("Apply", ButtonKind::Primary),
        ];
        let rects = render_button_row(&buttons, Some(1), area, &mut buf, &PickerStyles::default());

        // " Cancel " (8) + gap + " Apply " (7) = 16 cells, ending at column 30
        assert_eq!(rects[0], Rect::new(14, 0, 8, 1));
        assert_eq!(rects[1], Rect::new(23, 0, 7, 1));
        assert_eq!(buf[(15, 0)].symbol(), "C");
    }
}
