/// Style slots for every part of a picker, and the override layer callers
/// use to restyle them.
///
/// `PickerStyles` is the resolved set a widget renders with. Callers pass
/// `StyleOverrides` (only the slots they care about); `generate_styles`
/// patches them over the defaults in order, so later overrides win.
use ratatui::style::{Color, Modifier, Style};

macro_rules! style_slots {
    ($($(#[$doc:meta])* $slot:ident => $default:expr,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct PickerStyles {
            $($(#[$doc])* pub $slot: Style,)*
        }

        impl Default for PickerStyles {
            fn default() -> Self {
                Self {
                    $($slot: $default,)*
                }
            }
        }

        #[derive(Debug, Clone, Copy, Default, PartialEq)]
        pub struct StyleOverrides {
            $(pub $slot: Option<Style>,)*
        }

        impl PickerStyles {
            /// Patch every slot the override sets
            pub fn apply(mut self, overrides: &StyleOverrides) -> Self {
                $(
                    if let Some(style) = overrides.$slot {
                        self.$slot = self.$slot.patch(style);
                    }
                )*
                self
            }
        }
    };
}

style_slots! {
    /// Border of the closed input
    container => Style::default().fg(Color::Gray),
    /// Value text of the closed input
    input => Style::default().fg(Color::White),
    /// Input border while its panel is open
    input_open => Style::default().fg(Color::Cyan),
    /// Input border while it has keyboard focus
    input_focused => Style::default().fg(Color::Yellow),
    placeholder => Style::default().fg(Color::DarkGray),
    icon => Style::default().fg(Color::Cyan),
    panel => Style::default().bg(Color::Black),
    panel_border => Style::default().fg(Color::Cyan),
    month_header => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    nav_arrow => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    weekday => Style::default().fg(Color::Yellow),
    day => Style::default().fg(Color::White),
    day_selected => Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    day_in_range => Style::default().fg(Color::White).bg(Color::Blue),
    day_preview => Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    day_today => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    /// Keyboard cursor inside the grid
    day_cursor => Style::default().add_modifier(Modifier::REVERSED),
    day_disabled => Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
    preset => Style::default().fg(Color::White),
    preset_selected => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    preset_cursor => Style::default().fg(Color::Black).bg(Color::Yellow),
    button => Style::default().fg(Color::White).bg(Color::DarkGray),
    button_primary => Style::default().fg(Color::Black).bg(Color::Cyan),
    button_danger => Style::default().fg(Color::White).bg(Color::Red),
    button_focused => Style::default()
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::UNDERLINED),
    label => Style::default().fg(Color::Gray),
    field => Style::default().fg(Color::White).bg(Color::DarkGray),
    field_focused => Style::default().fg(Color::Black).bg(Color::Yellow),
}

/// Resolve the styles a widget renders with, patching each override over
/// the defaults in order.
pub fn generate_styles(overrides: &[&StyleOverrides]) -> PickerStyles {
    overrides
        .iter()
        .fold(PickerStyles::default(), |styles, o| styles.apply(o))
}

/// Widget-level style props: `class_name` restyles the container,
/// `input_class_name` the input text, `class_names` any slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StyleProps {
    pub class_name: Option<Style>,
    pub input_class_name: Option<Style>,
    pub class_names: StyleOverrides,
}

impl StyleProps {
    pub fn resolve(&self) -> PickerStyles {
        let shorthand = StyleOverrides {
            container: self.class_name,
            input: self.input_class_name,
            ..StyleOverrides::default()
        };
        generate_styles(&[&self.class_names, &shorthand])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_gives_defaults() {
        assert_eq!(generate_styles(&[]), PickerStyles::default());
    }

    #[test]
    fn test_later_overrides_win() {
        let first = StyleOverrides {
            day: Some(Style::default().fg(Color::Red)),
            ..Default::default()
        };
        let second = StyleOverrides {
            day: Some(Style::default().fg(Color::Magenta)),
            ..Default::default()
        };
        let styles = generate_styles(&[&first, &second]);
        assert_eq!(styles.day.fg, Some(Color::Magenta));
        assert_eq!(styles.weekday, PickerStyles::default().weekday);
    }

    #[test]
    fn test_override_patches_instead_of_replacing() {
        let overrides = StyleOverrides {
            day_selected: Some(Style::default().bg(Color::Red)),
            ..Default::default()
        };
        let styles = generate_styles(&[&overrides]);
        assert_eq!(styles.day_selected.bg, Some(Color::Red));
        // foreground from the default slot survives
        assert_eq!(styles.day_selected.fg, Some(Color::Black));
    }

    #[test]
    fn test_class_name_shorthands() {
        let props = StyleProps {
            class_name: Some(Style::default().fg(Color::LightRed)),
            input_class_name: Some(Style::default().fg(Color::LightGreen)),
            ..Default::default()
        };
        let styles = props.resolve();
        assert_eq!(styles.container.fg, Some(Color::LightRed));
        assert_eq!(styles.input.fg, Some(Color::LightGreen));
    }
}
