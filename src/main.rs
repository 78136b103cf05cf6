mod app;
mod catalog;
mod config;
mod logging;
mod posters;
mod route;
mod ui;

use app::{App, InputMode, Screen};
use catalog::{Catalog, CatalogSource, Movie};
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use posters::PosterRegistry;
use std::path::PathBuf;
use tracing::{info, warn};

/// Browse a movie catalog grouped by category
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog JSON file to load instead of the bundled one
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Directory of `<image id>.txt` poster art
    #[arg(long, global = true)]
    posters: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `movie_shelf=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI browser (default)
    Browse {
        /// Route to open on start, e.g. `detail/Dark`
        #[arg(short, long)]
        route: Option<String>,
        /// Start in list layout instead of the grid
        #[arg(long)]
        list: bool,
    },
    /// Print every group with its titles
    Groups {
        /// Only titles matching this filter (`*` and `?` allowed)
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Print all fields of one movie
    Show {
        /// Exact title
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };

    let filter = match logging::build_filter(cli.log_level.as_deref(), &config.log_level) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };
    match config::project_dirs() {
        Ok(dirs) => {
            if let Err(e) = logging::init(dirs.cache_dir(), filter) {
                eprintln!("Warning: logging disabled: {e}");
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {}", e.user_message()),
    }

    let source = match cli.data.or_else(|| config.data_path.clone()) {
        Some(path) => CatalogSource::File(path),
        None => CatalogSource::Bundled,
    };
    let catalog = match Catalog::load(&source).await {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };
    if catalog.is_empty() {
        warn!(source = %source.describe(), "catalog has no movies");
    }
    info!(
        source = %source.describe(),
        movies = catalog.len(),
        groups = catalog.groups().len(),
        "catalog loaded"
    );

    let posters = match cli.posters.or_else(|| config.poster_dir.clone()) {
        Some(dir) => PosterRegistry::with_dir(&dir).unwrap_or_else(|e| {
            warn!(dir = %dir.display(), error = %e, "cannot read poster directory, using bundled posters");
            PosterRegistry::bundled()
        }),
        None => PosterRegistry::bundled(),
    };
    let missing = posters.report_missing(catalog.movies().iter().map(|m| m.image_resource.as_str()));
    info!(posters = posters.len(), missing = missing.len(), "posters resolved");

    let command = cli.command.unwrap_or(Commands::Browse {
        route: None,
        list: false,
    });

    match command {
        Commands::Groups { filter } => {
            let movies = catalog.filter(filter.as_deref().unwrap_or(""));
            for group in catalog::group_by_category(movies) {
                println!("{} ({})", group.name, group.movies.len());
                for movie in group.movies {
                    println!("  {} ({})", movie.title, movie.year);
                }
            }
        }
        Commands::Show { title } => match catalog.find_by_title(&title) {
            Some(movie) => print_movie(movie),
            None => {
                warn!(title = %title, "show: no such title");
                eprintln!("Movie not found: {title}");
                std::process::exit(1);
            }
        },
        Commands::Browse { route, list } => {
            let layout = if list {
                config::Layout::List
            } else {
                config.start_layout
            };
            let mut app = App::new(catalog, posters, layout, config.card_width);

            if let Some(path) = route {
                if let Err(e) = app.nav.navigate_path(&path) {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }

            // Init terminal
            let mut terminal = ratatui::init();

            // Main loop
            let result = run_app(&mut terminal, &mut app).await;

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_movie(movie: &Movie) {
    println!("Title: {}", movie.title);
    println!("Group: {}", movie.group);
    println!("Synopsis: {}", movie.synopsis);
    println!("Original Title: {}", movie.original_title);
    println!("Genre: {}", movie.genre);
    println!("Episodes: {}", movie.episodes);
    println!("Year: {}", movie.year);
    println!("Country: {}", movie.country);
    println!("Director: {}", movie.director);
    println!("Cast: {}", movie.cast_line());
    println!("Available Until: {}", movie.available_until);
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            info!("quit");
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if crossterm::event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key);
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_filter_input(app, key);
        return;
    }

    if app.screen() == Screen::Catalog {
        handle_catalog_key(app, key);
    } else {
        handle_detail_key(app, key);
    }
}

fn handle_filter_input(app: &mut App, key: KeyEvent) {
    let mut changed = false;
    match key.code {
        KeyCode::Enter => app.commit_filter_edit(),
        KeyCode::Esc => app.cancel_filter_edit(),
        KeyCode::Backspace => {
            app.filter.pop();
            changed = true;
        }
        KeyCode::Char(c) => {
            app.filter.push(c);
            changed = true;
        }
        _ => {}
    }

    if changed {
        app.apply_filter();
    }
}

fn handle_catalog_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => app.begin_filter_edit(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Right | KeyCode::Char('l') => app.move_right(),
        KeyCode::Left | KeyCode::Char('h') => app.move_left(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Tab => app.toggle_layout(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Esc => {
            // Clear filter
            if !app.filter.is_empty() {
                app.filter.clear();
                app.apply_filter();
            }
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => app.go_back(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::PageDown => app.scroll_page_down(),
        KeyCode::PageUp => app.scroll_page_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::route::Route;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn bundled_app() -> App {
        App::new(Catalog::bundled().unwrap(), PosterRegistry::bundled(), Layout::Grid, 16)
    }

    #[test]
    fn test_enter_opens_detail_and_esc_returns() {
        let mut app = bundled_app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.screen(), Screen::Detail(m) if m.title == "Dark"));

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.screen(), Screen::Catalog);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_filter_typing() {
        let mut app = bundled_app();
        press(&mut app, KeyCode::Char('/'));
        for c in "narc".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.visible_count(), 1);

        // q while editing is text, not quit
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.selected_movie().map(|m| m.title.as_str()), Some("Narcos"));

        press(&mut app, KeyCode::Esc);
        assert!(app.filter.is_empty());
        assert_eq!(app.visible_count(), app.catalog.len());
    }

    #[test]
    fn test_esc_while_typing_restores_filter() {
        let mut app = bundled_app();
        press(&mut app, KeyCode::Char('/'));
        for c in "dark".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.visible_count(), 1);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.filter, "dark");
        assert_eq!(app.visible_count(), 1);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = bundled_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_detail() {
        let mut app = bundled_app();
        app.open_route(Route::detail("Roma"));
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["movie-shelf", "show", "Dark", "--data", "x.json"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("x.json")));
        assert!(matches!(cli.command, Some(Commands::Show { ref title }) if title == "Dark"));

        let cli = Cli::try_parse_from(["movie-shelf", "browse", "--route", "detail/Roma", "--list"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Browse { route: Some(ref r), list: true }) if r == "detail/Roma"
        ));

        let cli = Cli::try_parse_from(["movie-shelf", "groups", "-f", "dr*"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Groups { filter: Some(ref f) }) if f == "dr*"));

        let cli = Cli::try_parse_from(["movie-shelf"]).unwrap();
        assert!(cli.command.is_none());
    }
}
