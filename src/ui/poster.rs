use super::list::truncate_str;
use crate::catalog::Movie;
use crate::posters::{PosterHandle, initials};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Rows taken by one card: framed art plus the title line.
pub const CARD_HEIGHT: u16 = 8;

/// Art lines for a poster, clipped to `width` columns.
pub fn poster_lines(movie: &Movie, handle: PosterHandle<'_>, width: usize) -> Vec<Line<'static>> {
    match handle {
        PosterHandle::Art(poster) => poster
            .lines()
            .map(|l| Line::from(Span::styled(truncate_str(l, width), Style::default().fg(Color::White))))
            .collect(),
        PosterHandle::Missing => vec![
            Line::from(""),
            Line::from(Span::styled(
                initials(&movie.title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                truncate_str("no poster", width),
                Style::default().fg(Color::DarkGray),
            )),
        ],
    }
}

/// Framed poster only.
pub fn render_frame(
    frame: &mut Frame,
    area: Rect,
    movie: &Movie,
    handle: PosterHandle<'_>,
    selected: bool,
) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner_width = area.width.saturating_sub(2) as usize;
    let art = Paragraph::new(poster_lines(movie, handle, inner_width))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(art, area);
}

/// Poster frame with the bold title underneath.
pub fn render_card(
    frame: &mut Frame,
    area: Rect,
    movie: &Movie,
    handle: PosterHandle<'_>,
    selected: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    render_frame(frame, chunks[0], movie, handle, selected);

    let title_style = if selected {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let title = Paragraph::new(Span::styled(
        truncate_str(&movie.title, area.width as usize),
        title_style,
    ));
    frame.render_widget(title, chunks[1]);
}
