use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One row per movie: poster marker, title, group, synopsis.
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let synopsis_width = (area.width as usize).saturating_sub(50);

    let items: Vec<ListItem> = app
        .sections
        .iter()
        .flat_map(|section| section.items.iter())
        .filter_map(|&index| app.movie_at(index))
        .map(|movie| {
            let has_poster = !app.poster_for(movie).is_missing();
            let line = Line::from(vec![
                Span::styled(
                    if has_poster { "▣ " } else { "□ " },
                    Style::default().fg(if has_poster {
                        Color::Green
                    } else {
                        Color::DarkGray
                    }),
                ),
                Span::styled(
                    pad_str(&truncate_str(&movie.title, 24), 25),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    pad_str(&truncate_str(&movie.group, 16), 17),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    truncate_str(&movie.synopsis, synopsis_width),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let position = format!(
        " {} of {} ",
        if items.is_empty() { 0 } else { app.flat_selected() + 1 },
        items.len()
    );

    let list_widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Movies ")
                .title_bottom(Line::from(position).alignment(Alignment::Right)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    if !app.sections.is_empty() {
        list_state.select(Some(app.flat_selected()));
    }
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}

/// Right-pad with spaces to `width` display columns.
fn pad_str(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}
