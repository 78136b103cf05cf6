use super::{list, poster};
use crate::app::{App, InputMode, Section};
use crate::config::Layout as CatalogLayout;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const CARD_GAP: u16 = 2;
// header line + cards + spacer
const SECTION_HEIGHT: u16 = 1 + poster::CARD_HEIGHT + 1;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + filter(3) + body(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = format!(
        " Movie Shelf   [{} titles, {} groups]   {} view",
        app.visible_count(),
        app.sections.len(),
        app.layout.label()
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Filter bar ──
    let filter_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let filter_label = if app.input_mode == InputMode::Editing {
        " Filter (Enter to apply, Esc to cancel): "
    } else {
        " Filter (/): "
    };
    let filter_text = format!("{}{}", filter_label, app.filter);
    let filter_bar = Paragraph::new(filter_text)
        .style(filter_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(filter_style)
                .title(" Search "),
        );
    frame.render_widget(filter_bar, chunks[1]);

    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[1].x + 1 + filter_label.len() as u16 + app.filter.chars().count() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x.min(chunks[1].right().saturating_sub(2)), cursor_y));
    }

    // ── Body ──
    if app.sections.is_empty() {
        let empty = Paragraph::new("No titles match the filter")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        frame.render_widget(empty, chunks[2]);
    } else {
        match app.layout {
            CatalogLayout::Grid => render_grid(app, frame, chunks[2]),
            CatalogLayout::List => list::render(app, frame, chunks[2]),
        }
    }

    // ── Status bar ──
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ←↑↓→"),
        Span::raw(" Navigate  "),
        key("/"),
        Span::raw(" Search  "),
        key("Enter"),
        Span::raw(" Detail  "),
        key("Tab"),
        Span::raw(" Layout  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

/// Cards that fit in `width` columns, at least one.
pub fn cards_per_row(width: u16, card_width: u16) -> usize {
    (width.saturating_add(CARD_GAP) / card_width.saturating_add(CARD_GAP)).max(1) as usize
}

/// First visible item so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, per_row: usize) -> usize {
    selected.saturating_sub(per_row.saturating_sub(1))
}

fn render_grid(app: &App, frame: &mut Frame, area: Rect) {
    let visible_sections = (area.height / SECTION_HEIGHT).max(1) as usize;
    let first = scroll_offset(app.selected_group, visible_sections);

    for (row, (group_index, section)) in app
        .sections
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_sections)
        .enumerate()
    {
        let y = area.y + row as u16 * SECTION_HEIGHT;
        if y >= area.bottom() {
            break;
        }
        let height = SECTION_HEIGHT.min(area.bottom() - y);
        let rect = Rect::new(area.x, y, area.width, height);
        let selected = (group_index == app.selected_group).then_some(app.selected_item);
        render_section(app, frame, rect, section, selected);
    }
}

fn render_section(app: &App, frame: &mut Frame, area: Rect, section: &Section, selected: Option<usize>) {
    let card_width = app.card_width.min(area.width.max(1));
    let per_row = cards_per_row(area.width, card_width);
    let offset = selected.map_or(0, |s| scroll_offset(s, per_row));
    let shown_end = (offset + per_row).min(section.items.len());

    let header_style = if selected.is_some() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut header = vec![Span::styled(format!(" {}", section.name), header_style)];
    if section.items.len() > per_row {
        header.push(Span::styled(
            format!(
                "  {}{}-{} of {}{}",
                if offset > 0 { "◂ " } else { "" },
                offset + 1,
                shown_end,
                section.items.len(),
                if shown_end < section.items.len() { " ▸" } else { "" }
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let header_area = Rect::new(area.x, area.y, area.width, 1u16.min(area.height));
    frame.render_widget(Paragraph::new(Line::from(header)), header_area);

    if area.height <= 1 {
        return;
    }
    let cards_height = poster::CARD_HEIGHT.min(area.height - 1);
    for (slot, &index) in section.items[offset..shown_end].iter().enumerate() {
        let Some(movie) = app.movie_at(index) else {
            continue;
        };
        let x = area.x.saturating_add((slot as u16).saturating_mul(card_width.saturating_add(CARD_GAP)));
        if x >= area.right() {
            break;
        }
        let width = card_width.min(area.right() - x);
        let card_area = Rect::new(x, area.y + 1, width, cards_height);
        let is_selected = selected == Some(offset + slot);
        poster::render_card(frame, card_area, movie, app.poster_for(movie), is_selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_per_row() {
        assert_eq!(cards_per_row(16, 16), 1);
        assert_eq!(cards_per_row(34, 16), 2);
        assert_eq!(cards_per_row(33, 16), 1);
        assert_eq!(cards_per_row(5, 16), 1);
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 4), 0);
        assert_eq!(scroll_offset(3, 4), 0);
        assert_eq!(scroll_offset(5, 4), 2);
        assert_eq!(scroll_offset(5, 1), 5);
        assert_eq!(scroll_offset(2, 0), 2);
    }
}
