use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::core::wordcloud::CloudLayout;
use crate::ui::terminal::styles::rgb;

/// Draws a laid-out cloud over its background colour. Glyphs outside the
/// render area are clipped.
pub struct CloudWidget<'a> {
    layout: &'a CloudLayout,
}

impl<'a> CloudWidget<'a> {
    pub fn new(layout: &'a CloudLayout) -> Self {
        Self { layout }
    }
}

impl Widget for CloudWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = rgb(self.layout.background);
        buf.set_style(area, Style::default().bg(background));

        for word in &self.layout.words {
            let mut style = Style::default().fg(rgb(word.color)).bg(background);
            if word.tier.is_bold() {
                style = style.add_modifier(Modifier::BOLD);
            }
            for (x, y, ch) in word.cells() {
                if x >= area.width || y >= area.height {
                    continue;
                }
                buf.set_string(area.x + x, area.y + y, ch.to_string(), style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wordcloud::{layout_words, word_frequencies, WordCloudOptions};
    use ratatui::style::Color;

    #[test]
    fn test_renders_glyphs_on_background() {
        let options = WordCloudOptions {
            background: "#000000".to_string(),
            ..WordCloudOptions::default()
        };
        let words = word_frequencies("midnight", 10);
        let layout = layout_words(&words, 30, 5, &options);
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);

        CloudWidget::new(&layout).render(area, &mut buf);

        let placed = &layout.words[0];
        let cell = buf.get(placed.x, placed.y);
        assert_eq!(cell.symbol(), "M");
        assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
        assert_eq!(buf.get(0, 0).bg, Color::Rgb(0, 0, 0));
    }
}
