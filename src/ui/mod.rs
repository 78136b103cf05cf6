mod catalog;
mod detail;
mod help;
mod list;
mod poster;

use crate::app::{App, Screen};
use ratatui::Frame;

/// Top-level render dispatch.
pub fn render(app: &App, frame: &mut Frame) {
    match app.screen() {
        Screen::Catalog => catalog::render(app, frame),
        Screen::Detail(movie) => detail::render(app, movie, frame),
        Screen::NotFound(title) => detail::render_not_found(title, frame),
    }

    // Render help overlay on top if active
    if app.show_help {
        help::render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::Layout;
    use crate::posters::PosterRegistry;
    use crate::route::Route;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn bundled_app(layout: Layout) -> App {
        App::new(Catalog::bundled().unwrap(), PosterRegistry::bundled(), layout, 16)
    }

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_grid_shows_group_headers_and_titles() {
        let app = bundled_app(Layout::Grid);
        let text = buffer_text(&draw(&app, 100, 40));
        assert!(text.contains("Trending Now"));
        assert!(text.contains("Award Winners"));
        assert!(text.contains("Stranger Things"));
    }

    #[test]
    fn test_list_layout_shows_rows() {
        let app = bundled_app(Layout::List);
        let text = buffer_text(&draw(&app, 100, 30));
        assert!(text.contains("Money Heist"));
        assert!(text.contains("Trending Now"));
    }

    #[test]
    fn test_detail_shows_all_labels() {
        let mut app = bundled_app(Layout::Grid);
        app.open_route(Route::detail("Parasite"));
        let text = buffer_text(&draw(&app, 120, 40));
        for label in [
            "Movie Details",
            "Title:",
            "Group:",
            "Synopsis:",
            "Original Title:",
            "Genre:",
            "Episodes:",
            "Year:",
            "Country:",
            "Director:",
            "Cast:",
            "Available Until:",
        ] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("Bong Joon-ho"));
    }

    #[test]
    fn test_not_found_screen() {
        let mut app = bundled_app(Layout::Grid);
        app.open_route(Route::detail("Nope"));
        let text = buffer_text(&draw(&app, 80, 20));
        assert!(text.contains("Movie not found"));
    }

    #[test]
    fn test_help_overlay_and_tiny_terminal() {
        let mut app = bundled_app(Layout::Grid);
        app.show_help = true;
        let text = buffer_text(&draw(&app, 100, 40));
        assert!(text.contains("Keybindings"));

        // must not panic on very small areas
        app.show_help = false;
        draw(&app, 10, 4);
        app.open_route(Route::detail("Dark"));
        draw(&app, 10, 4);
    }

    #[test]
    fn test_oversized_card_width_renders() {
        let mut app = App::new(
            Catalog::bundled().unwrap(),
            PosterRegistry::bundled(),
            Layout::Grid,
            u16::MAX,
        );
        let text = buffer_text(&draw(&app, 80, 30));
        assert!(text.contains("Trending Now"));

        app.open_route(Route::detail("Dark"));
        let text = buffer_text(&draw(&app, 80, 30));
        assert!(text.contains("Movie Details"));
    }
}
