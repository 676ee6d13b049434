//! Frame rendering for the explorer
//!
//! The screen mirrors the web page it replaces: a "Customization Options"
//! sidebar on the left, the search form and results on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use super::state::{ExplorerState, Focus, SearchStatus, SongView, Tab};
use super::styles::{rgb, ComponentStyles};
use super::widgets::{common_words_table, CloudWidget};
use crate::core::analysis::LyricsStats;
use crate::core::wordcloud::Rgb;
use crate::ui::report::EMPTY_CLOUD;
use crate::ui::Messages;

const SIDEBAR_WIDTH: u16 = 34;
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SEARCH_LABEL: &str = "🔍 Search Lyrics";

pub fn draw(frame: &mut Frame, state: &mut ExplorerState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(frame.size());

    draw_sidebar(frame, columns[0], state);
    draw_main(frame, columns[1], state);
}

fn checkbox(label: &str, checked: bool, focused: bool) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    Line::from(Span::styled(
        format!(" {} {} ", mark, label),
        ComponentStyles::control(focused),
    ))
}

fn selector(label: &str, value: String, focused: bool) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!(" {:<13}", label)),
        Span::styled(format!("◀ {} ▶", value), ComponentStyles::control(focused)),
    ])
}

fn draw_sidebar(frame: &mut Frame, area: Rect, state: &ExplorerState) {
    let focus = state.focus;
    let mut lines = vec![
        Line::from(Span::styled("Display Settings", ComponentStyles::section_heading())),
        checkbox("Show statistics", state.display.show_stats, focus == Focus::ShowStats),
        checkbox("Show word cloud", state.display.show_wordcloud, focus == Focus::ShowWordcloud),
        checkbox(
            "Show common words",
            state.display.show_common_words,
            focus == Focus::ShowCommonWords,
        ),
        Line::default(),
        Line::from(Span::styled("Word Cloud Settings", ComponentStyles::section_heading())),
        selector(
            "Max words",
            state.cloud.max_words.to_string(),
            focus == Focus::MaxWords,
        ),
    ];

    let swatch = Rgb::parse_hex(&state.background_input)
        .map(|color| Span::styled("  ██", Style::default().fg(rgb(color))))
        .unwrap_or_else(|| Span::styled("  invalid", ComponentStyles::error()));
    lines.push(Line::from(vec![
        Span::raw(format!(" {:<13}", "Background")),
        Span::styled(
            format!("{:<7}", state.background_input),
            ComponentStyles::control(focus == Focus::Background),
        ),
        swatch,
    ]));

    lines.push(selector(
        "Color scheme",
        state.cloud.colormap.to_string(),
        focus == Focus::Colormap,
    ));

    let gradient: Vec<Span> = (0..20)
        .map(|i| {
            let color = state.cloud.colormap.sample(i as f64 / 19.0);
            Span::styled("█", Style::default().fg(rgb(color)))
        })
        .collect();
    let mut preview = vec![Span::raw(" ")];
    preview.extend(gradient);
    lines.push(Line::from(preview));

    lines.push(Line::default());
    for help in [
        "Tab / Shift+Tab  move focus",
        "Enter            search, toggle",
        "←/→              adjust setting",
        "F1 / F2          switch tab",
        "↑/↓ PgUp/PgDn    scroll lyrics",
        "Esc              quit",
    ] {
        lines.push(Line::from(Span::styled(help, ComponentStyles::muted())));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ComponentStyles::border(false))
            .title(" Customization Options "),
    );
    frame.render_widget(sidebar, area);
}

fn draw_main(frame: &mut Frame, area: Rect, state: &mut ExplorerState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(Messages::app_title(&state.artist), ComponentStyles::title()))
            .alignment(Alignment::Center),
        rows[0],
    );

    draw_search_form(frame, rows[1], state);
    frame.render_widget(Paragraph::new(status_lines(state)), rows[2]);

    if state.view.is_some() {
        draw_results(frame, rows[3], state);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(Messages::FOOTER, ComponentStyles::muted()))
            .alignment(Alignment::Center),
        rows[4],
    );
}

fn draw_search_form(frame: &mut Frame, area: Rect, state: &ExplorerState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22)])
        .split(area);

    let title_focused = state.focus == Focus::Title;
    let input = Paragraph::new(state.title_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ComponentStyles::border(title_focused))
            .title(Messages::title_prompt(&state.artist)),
    );
    frame.render_widget(input, columns[0]);
    if title_focused {
        let width = unicode_width::UnicodeWidthStr::width(state.title_input.as_str());
        let offset = u16::try_from(width).unwrap_or(u16::MAX);
        let max_x = columns[0].x.saturating_add(columns[0].width.saturating_sub(2));
        let cursor_x = columns[0].x.saturating_add(1).saturating_add(offset);
        frame.set_cursor(cursor_x.min(max_x), columns[0].y + 1);
    }

    let button_focused = state.focus == Focus::SearchButton;
    let button = Paragraph::new(Span::styled(
        format!(" {} ", SEARCH_LABEL),
        ComponentStyles::button(button_focused),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(ComponentStyles::border(button_focused)),
    );
    frame.render_widget(button, columns[1]);
}

fn status_lines(state: &ExplorerState) -> Vec<Line<'static>> {
    match &state.status {
        SearchStatus::Idle => vec![Line::from(Span::styled(
            "Enter a song title and press Enter to search.",
            ComponentStyles::muted(),
        ))],
        SearchStatus::Searching { title, started } => {
            let frame = SPINNER[(state.tick as usize) % SPINNER.len()];
            vec![Line::from(vec![
                Span::styled(format!("{} ", frame), ComponentStyles::info()),
                Span::raw(Messages::searching(title)),
                Span::styled(
                    format!(" {}s", started.elapsed().as_secs()),
                    ComponentStyles::muted(),
                ),
            ])]
        }
        SearchStatus::Found => match &state.view {
            Some(view) => vec![Line::from(Span::styled(
                format!("🎵 {} by {}", view.song.title, view.song.artist),
                ComponentStyles::success(),
            ))],
            None => Vec::new(),
        },
        SearchStatus::NotFound { .. } => vec![
            Line::from(Span::styled(Messages::NOT_FOUND, ComponentStyles::error())),
            Line::from(Span::styled(Messages::NOT_FOUND_TIP, ComponentStyles::info())),
        ],
        SearchStatus::Failed { message } => vec![
            Line::from(Span::styled(Messages::error(message), ComponentStyles::error())),
            Line::from(Span::styled(Messages::RATE_LIMIT_HINT, ComponentStyles::warning())),
        ],
    }
}

fn draw_results(frame: &mut Frame, area: Rect, state: &mut ExplorerState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let tabs = Tabs::new(Tab::TITLES.to_vec())
        .select(state.tab.index())
        .highlight_style(ComponentStyles::tab_highlight())
        .divider("│");
    frame.render_widget(tabs, rows[0]);

    match state.tab {
        Tab::Lyrics => {
            if let Some(view) = &state.view {
                draw_lyrics(frame, rows[1], view, state.lyrics_scroll);
            }
        }
        Tab::Analysis => draw_analysis(frame, rows[1], state),
    }
}

fn draw_lyrics(frame: &mut Frame, area: Rect, view: &SongView, scroll: u16) {
    let lyrics = Paragraph::new(view.song.lyrics.as_str())
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(Block::default().borders(Borders::TOP).title(" Lyrics "));
    frame.render_widget(lyrics, area);
}

fn draw_analysis(frame: &mut Frame, area: Rect, state: &mut ExplorerState) {
    let display = state.display;
    let word_rows = state
        .view
        .as_ref()
        .map(|v| v.common_words.len() as u16)
        .unwrap_or(0);

    let mut constraints = Vec::new();
    if display.show_stats {
        constraints.push(Constraint::Length(4));
    }
    if display.show_wordcloud {
        constraints.push(Constraint::Min(8));
    }
    if display.show_common_words {
        // Header, rows and borders
        let height = word_rows.max(1) + 3;
        constraints.push(if display.show_wordcloud {
            Constraint::Length(height)
        } else {
            Constraint::Min(height)
        });
    }

    if constraints.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "All analysis sections are hidden. Enable them in the sidebar.",
                ComponentStyles::muted(),
            )),
            area,
        );
        return;
    }

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    let mut next = sections.iter().copied();

    if display.show_stats {
        if let (Some(section), Some(view)) = (next.next(), &state.view) {
            draw_stats(frame, section, &view.stats);
        }
    }

    if display.show_wordcloud {
        if let Some(section) = next.next() {
            let block = Block::default().borders(Borders::ALL).title(" Word Cloud ");
            let inner = block.inner(section);
            frame.render_widget(block, section);
            match state.cloud_layout(inner.width, inner.height) {
                Some(layout) if !layout.is_empty() => {
                    frame.render_widget(CloudWidget::new(layout), inner)
                }
                _ => frame.render_widget(
                    Paragraph::new(Span::styled(EMPTY_CLOUD, ComponentStyles::muted())),
                    inner,
                ),
            }
        }
    }

    if display.show_common_words {
        if let (Some(section), Some(view)) = (next.next(), &state.view) {
            let table = common_words_table(&view.common_words, state.cloud.colormap).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Most Common Words "),
            );
            frame.render_widget(table, section);
        }
    }
}

fn draw_stats(frame: &mut Frame, area: Rect, stats: &LyricsStats) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Lyrics Statistics ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(inner);

    let metrics = [
        ("Total Words", stats.total_words.to_string()),
        ("Unique Words", stats.unique_words.to_string()),
        ("Unique Ratio", stats.unique_ratio_display()),
    ];
    for ((label, value), column) in metrics.into_iter().zip(columns.iter()) {
        let metric = Paragraph::new(vec![
            Line::from(Span::styled(label, ComponentStyles::muted())),
            Line::from(Span::styled(value, ComponentStyles::metric_value())),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(metric, *column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::Song;
    use crate::core::wordcloud::WordCloudOptions;
    use crate::ui::terminal::state::UpdateMessage;
    use crate::ui::DisplayOptions;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn found_state() -> ExplorerState {
        let mut state = ExplorerState::new(
            "Love Story",
            DisplayOptions::default(),
            WordCloudOptions::default(),
        );
        let request = state.start_search().unwrap();
        state.apply(UpdateMessage::SearchFinished {
            request_id: request.id,
            outcome: Ok(Some(Song {
                id: 3,
                title: "Love Story".to_string(),
                artist: "Taylor Swift".to_string(),
                url: String::new(),
                lyrics: "Romeo take me somewhere we can be alone\nRomeo save me".to_string(),
            })),
        });
        state
    }

    #[test]
    fn test_sidebar_and_lyrics_tab() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut state = found_state();
        terminal.draw(|f| draw(f, &mut state)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Customization Options"));
        assert!(text.contains("[x] Show statistics"));
        assert!(text.contains("Romeo take me somewhere"));
    }

    #[test]
    fn test_analysis_tab_sections() {
        let mut terminal = Terminal::new(TestBackend::new(120, 50)).unwrap();
        let mut state = found_state();
        state.tab = Tab::Analysis;
        state.display.show_wordcloud = false;
        terminal.draw(|f| draw(f, &mut state)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Lyrics Statistics"));
        assert!(text.contains("Unique Ratio"));
        assert!(text.contains("Most Common Words"));
        assert!(text.contains("romeo"));
        assert!(!text.contains("┌ Word Cloud"));
    }

    #[test]
    fn test_input_label_uses_configured_artist() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut state = ExplorerState::new(
            "Motion Sickness",
            DisplayOptions::default(),
            WordCloudOptions::default(),
        )
        .with_artist("Phoebe Bridgers");
        terminal.draw(|f| draw(f, &mut state)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Phoebe Bridgers Lyrics Explorer"));
        assert!(text.contains("Enter a Phoebe Bridgers song title:"));
        assert!(!text.contains("Taylor Swift"));
    }

    #[test]
    fn test_very_long_title_keeps_cursor_in_input() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut state = ExplorerState::new(
            &"a".repeat(70_000),
            DisplayOptions::default(),
            WordCloudOptions::default(),
        );
        terminal.draw(|f| draw(f, &mut state)).unwrap();
        terminal.draw(|f| draw(f, &mut state)).unwrap();
    }

    #[test]
    fn test_not_found_message() {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut state = ExplorerState::new(
            "Nope",
            DisplayOptions::default(),
            WordCloudOptions::default(),
        );
        let request = state.start_search().unwrap();
        state.apply(UpdateMessage::SearchFinished { request_id: request.id, outcome: Ok(None) });
        terminal.draw(|f| draw(f, &mut state)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains(Messages::NOT_FOUND));
        assert!(!text.contains("Lyrics Statistics"));
    }
}
