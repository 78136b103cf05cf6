use super::poster;
use crate::app::App;
use crate::catalog::{Availability, Movie};
use crate::posters::{PosterHandle, PosterOrigin};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn field<'a>(label: &'static str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!(" {label}: "),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.into()),
    ])
}

fn availability_badge(availability: Availability) -> Span<'static> {
    match availability {
        Availability::Available { days_left: 0 } => {
            Span::styled("  [last day]", Style::default().fg(Color::Red))
        }
        Availability::Available { days_left } if days_left <= 30 => Span::styled(
            format!("  [{days_left} days left]"),
            Style::default().fg(Color::Yellow),
        ),
        Availability::Available { .. } => {
            Span::styled("  [available]", Style::default().fg(Color::Green))
        }
        Availability::Expired => Span::styled(
            "  [expired]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Availability::Unknown => Span::raw(""),
    }
}

fn poster_source(handle: PosterHandle<'_>) -> String {
    match handle {
        PosterHandle::Art(poster) => match &poster.origin {
            PosterOrigin::Bundled => format!("  [poster: {}]", poster.id),
            PosterOrigin::File(path) => format!("  [poster: {}]", path.display()),
        },
        PosterHandle::Missing => "  [no poster]".to_string(),
    }
}

/// Labelled rows for every field of a movie.
pub fn detail_lines(movie: &Movie, availability: Availability) -> Vec<Line<'static>> {
    let mut until = field("Available Until", movie.available_until.clone());
    until.spans.push(availability_badge(availability));

    vec![
        field("Title", movie.title.clone()),
        field("Group", movie.group.clone()),
        field("Synopsis", movie.synopsis.clone()),
        field("Original Title", movie.original_title.clone()),
        field("Genre", movie.genre.clone()),
        field("Episodes", movie.episodes.to_string()),
        field("Year", movie.year.to_string()),
        field("Country", movie.country.clone()),
        field("Director", movie.director.clone()),
        field("Cast", movie.cast_line()),
        until,
    ]
}

pub fn render(app: &App, movie: &Movie, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + content(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ← ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("Movie Details", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("   {}", movie.title),
            Style::default().fg(Color::Cyan),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    // ── Poster | fields ──
    let poster_width = app.card_width.saturating_add(4);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(poster_width), Constraint::Min(10)])
        .split(chunks[1]);

    let poster_area = body[0].intersection(ratatui::layout::Rect {
        height: poster::CARD_HEIGHT,
        ..body[0]
    });
    poster::render_frame(frame, poster_area, movie, app.poster_for(movie), false);

    let content = Paragraph::new(detail_lines(movie, movie.availability(app.today)))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", movie.title))
                .title_bottom(
                    Line::from(format!(" scroll: {} ", app.detail_scroll))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(content, body[1]);

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ↑↓/PgUp/PgDn",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Scroll  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Back  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit"),
        Span::styled(poster_source(app.poster_for(movie)), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[2]);
}

pub fn render_not_found(title: &str, frame: &mut Frame) {
    let area = frame.area();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Movie not found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            if title.is_empty() {
                "(no title given)".to_string()
            } else {
                format!("\"{title}\"")
            },
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled("Esc to go back", Style::default().fg(Color::Cyan))),
    ];
    let message = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(message, area);
}
