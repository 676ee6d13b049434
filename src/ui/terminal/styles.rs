//! Component style definitions for the explorer

use ratatui::style::{Color, Modifier, Style};

use crate::core::wordcloud::Rgb;

pub struct ComponentStyles;

impl ComponentStyles {
    pub fn title() -> Style {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_heading() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    /// Highlight for the control that has focus
    pub fn control(focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    pub fn button(focused: bool) -> Style {
        if focused {
            Self::control(true)
        } else {
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn muted() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Blue)
    }

    pub fn metric_value() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_highlight() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Cell shaded with `shade`, text in black or white for contrast
    pub fn shaded(shade: Rgb) -> Style {
        let text = if shade.luminance() > 0.5 { Rgb::BLACK } else { Rgb::WHITE };
        Style::default().fg(rgb(text)).bg(rgb(shade))
    }
}

pub fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaded_text_contrast() {
        assert_eq!(ComponentStyles::shaded(Rgb::WHITE).fg, Some(Color::Rgb(0, 0, 0)));
        assert_eq!(ComponentStyles::shaded(Rgb::BLACK).fg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(ComponentStyles::shaded(Rgb::BLACK).bg, Some(Color::Rgb(0, 0, 0)));
    }
}
