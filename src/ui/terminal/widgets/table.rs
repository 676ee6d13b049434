use ratatui::{
    layout::Constraint,
    widgets::{Cell, Row, Table},
};

use crate::core::analysis::WordCount;
use crate::core::wordcloud::Colormap;
use crate::ui::terminal::styles::ComponentStyles;

/// Ranked word table with the count column shaded along `colormap`
pub fn common_words_table(words: &[WordCount], colormap: Colormap) -> Table<'static> {
    let min = words.iter().map(|w| w.count).min().unwrap_or(0);
    let max = words.iter().map(|w| w.count).max().unwrap_or(0);

    let rows: Vec<Row> = words
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let shade = colormap.sample_range(entry.count, min, max);
            Row::new(vec![
                Cell::from(format!("{:>2}", rank + 1)).style(ComponentStyles::muted()),
                Cell::from(entry.word.clone()),
                Cell::from(format!("{:>5}", entry.count)).style(ComponentStyles::shaded(shade)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [Constraint::Length(3), Constraint::Min(12), Constraint::Length(7)],
    )
    .header(Row::new(vec!["#", "Word", "Count"]).style(ComponentStyles::section_heading()))
    .column_spacing(2)
}
