use crate::catalog::{Catalog, Movie, partition_by_group};
use crate::config::Layout;
use crate::posters::{PosterHandle, PosterRegistry};
use crate::route::{Navigator, Route};
use chrono::NaiveDate;
use tracing::{debug, info};

/// What the current route resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    Catalog,
    Detail(&'a Movie),
    NotFound(&'a str),
}

/// Input mode for the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// A group label and the catalog indices of its (filtered) movies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub items: Vec<usize>,
}

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub posters: PosterRegistry,
    pub nav: Navigator,
    pub should_quit: bool,
    pub show_help: bool,
    pub layout: Layout,
    pub card_width: u16,
    pub today: NaiveDate,

    // Catalog view state
    pub sections: Vec<Section>,
    pub selected_group: usize,
    pub selected_item: usize,

    pub filter: String,
    pub input_mode: InputMode,
    filter_before_edit: String,

    // Detail view state
    pub detail_scroll: u16,

    // Status message
    pub status_msg: String,
}

impl App {
    pub fn new(catalog: Catalog, posters: PosterRegistry, layout: Layout, card_width: u16) -> Self {
        let mut app = Self {
            catalog,
            posters,
            nav: Navigator::default(),
            should_quit: false,
            show_help: false,
            layout,
            card_width,
            today: chrono::Local::now().date_naive(),

            sections: Vec::new(),
            selected_group: 0,
            selected_item: 0,

            filter: String::new(),
            input_mode: InputMode::Normal,
            filter_before_edit: String::new(),

            detail_scroll: 0,

            status_msg: String::new(),
        };
        app.apply_filter();
        app.status_msg = format!(
            "{} titles in {} groups",
            app.catalog.len(),
            app.sections.len()
        );
        app
    }

    pub fn screen(&self) -> Screen<'_> {
        match self.nav.current() {
            Route::Catalog => Screen::Catalog,
            Route::Detail { title } => match self.catalog.find_by_title(title) {
                Some(movie) => Screen::Detail(movie),
                None => Screen::NotFound(title),
            },
        }
    }

    pub fn poster_for(&self, movie: &Movie) -> PosterHandle<'_> {
        self.posters.resolve(&movie.image_resource)
    }

    pub fn movie_at(&self, index: usize) -> Option<&Movie> {
        self.catalog.movies().get(index)
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        let section = self.sections.get(self.selected_group)?;
        let index = *section.items.get(self.selected_item)?;
        self.movie_at(index)
    }

    pub fn visible_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Position of the selection in list layout (sections flattened).
    pub fn flat_selected(&self) -> usize {
        let before: usize = self
            .sections
            .iter()
            .take(self.selected_group)
            .map(|s| s.items.len())
            .sum();
        before + self.selected_item
    }

    fn select_flat(&mut self, mut flat: usize) {
        for (g, section) in self.sections.iter().enumerate() {
            if flat < section.items.len() {
                self.selected_group = g;
                self.selected_item = flat;
                return;
            }
            flat -= section.items.len();
        }
    }

    fn clamp_item(&mut self) {
        let len = self
            .sections
            .get(self.selected_group)
            .map_or(0, |s| s.items.len());
        self.selected_item = self.selected_item.min(len.saturating_sub(1));
    }

    /// Next group in grid layout, next row in list layout.
    pub fn move_down(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        match self.layout {
            Layout::Grid => {
                if self.selected_group + 1 < self.sections.len() {
                    self.selected_group += 1;
                    self.clamp_item();
                }
            }
            Layout::List => {
                let flat = self.flat_selected();
                if flat + 1 < self.visible_count() {
                    self.select_flat(flat + 1);
                }
            }
        }
    }

    pub fn move_up(&mut self) {
        if self.sections.is_empty() {
            return;
        }
        match self.layout {
            Layout::Grid => {
                if self.selected_group > 0 {
                    self.selected_group -= 1;
                    self.clamp_item();
                }
            }
            Layout::List => {
                let flat = self.flat_selected();
                if flat > 0 {
                    self.select_flat(flat - 1);
                }
            }
        }
    }

    pub fn move_right(&mut self) {
        if let Some(section) = self.sections.get(self.selected_group) {
            if self.selected_item + 1 < section.items.len() {
                self.selected_item += 1;
            }
        }
    }

    pub fn move_left(&mut self) {
        self.selected_item = self.selected_item.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected_group = 0;
        self.selected_item = 0;
    }

    pub fn select_last(&mut self) {
        if let Some(last) = self.sections.len().checked_sub(1) {
            self.selected_group = last;
            self.selected_item = self.sections[last].items.len().saturating_sub(1);
        }
    }

    pub fn toggle_layout(&mut self) {
        self.layout = self.layout.toggle();
        self.status_msg = format!("{} layout", self.layout.label());
    }

    /// Navigate to the detail route of the selected movie.
    pub fn open_selected(&mut self) {
        let Some(title) = self.selected_movie().map(|m| m.title.clone()) else {
            return;
        };
        info!(title = %title, "open detail");
        self.open_route(Route::detail(title));
    }

    pub fn open_route(&mut self, route: Route) {
        self.nav.navigate(route);
        self.detail_scroll = 0;
        if let Screen::NotFound(title) = self.screen() {
            debug!(title = %title, "detail route has no matching movie");
        }
    }

    pub fn go_back(&mut self) {
        if self.nav.pop_back() {
            self.detail_scroll = 0;
        }
    }

    /// Rebuild sections from the filter text and reset the selection.
    pub fn apply_filter(&mut self) {
        self.sections = build_sections(&self.catalog, &self.filter);
        self.select_first();
        debug!(filter = %self.filter, sections = self.sections.len(), "filter applied");

        self.status_msg = format!(
            "{} titles in {} groups for \"{}\"",
            self.visible_count(),
            self.sections.len(),
            if self.filter.is_empty() { "all" } else { &self.filter }
        );
    }

    pub fn begin_filter_edit(&mut self) {
        self.filter_before_edit = self.filter.clone();
        self.input_mode = InputMode::Editing;
    }

    pub fn commit_filter_edit(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave the filter bar, restoring the text it had when editing began.
    pub fn cancel_filter_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.filter != self.filter_before_edit {
            self.filter = std::mem::take(&mut self.filter_before_edit);
            self.apply_filter();
        }
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(10);
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(10);
    }
}

/// Group the movies matching `query`, keeping first-appearance order.
pub fn build_sections(catalog: &Catalog, query: &str) -> Vec<Section> {
    let movies = catalog.movies();
    partition_by_group(catalog.filter_indices(query), |&i: &usize| {
        movies[i].group.as_str()
    })
    .into_iter()
    .map(|(name, items)| Section {
        name: name.to_string(),
        items,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{catalog_of, movie};

    fn sample_app(layout: Layout) -> App {
        let catalog = catalog_of(vec![
            movie("Dark", "Trending"),
            movie("Roma", "Awards"),
            movie("Narcos", "Trending"),
            movie("Parasite", "Awards"),
            movie("Arcane", "Animation"),
        ]);
        App::new(catalog, PosterRegistry::bundled(), layout, 16)
    }

    fn selected_title(app: &App) -> &str {
        app.selected_movie().map(|m| m.title.as_str()).unwrap_or("")
    }

    #[test]
    fn test_sections_follow_catalog_grouping() {
        let app = sample_app(Layout::Grid);
        let names: Vec<&str> = app.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Trending", "Awards", "Animation"]);
        assert_eq!(app.sections[0].items, vec![0, 2]);
        assert_eq!(app.visible_count(), 5);

        let groups = app.catalog.groups();
        for (section, group) in app.sections.iter().zip(&groups) {
            assert_eq!(section.name, group.name);
            let titles: Vec<&str> = section
                .items
                .iter()
                .filter_map(|&i| app.movie_at(i))
                .map(|m| m.title.as_str())
                .collect();
            let expected: Vec<&str> = group.movies.iter().map(|m| m.title.as_str()).collect();
            assert_eq!(titles, expected);
        }
    }

    #[test]
    fn test_grid_navigation_clamps() {
        let mut app = sample_app(Layout::Grid);
        app.move_right();
        app.move_right();
        assert_eq!(selected_title(&app), "Narcos");

        app.move_down();
        assert_eq!(selected_title(&app), "Parasite");
        app.move_down();
        // Animation has a single entry
        assert_eq!(selected_title(&app), "Arcane");
        app.move_down();
        assert_eq!(selected_title(&app), "Arcane");

        app.move_up();
        app.move_left();
        app.move_left();
        assert_eq!(selected_title(&app), "Roma");
    }

    #[test]
    fn test_list_navigation_crosses_groups() {
        let mut app = sample_app(Layout::List);
        let mut seen = vec![selected_title(&app).to_string()];
        for _ in 0..6 {
            app.move_down();
            seen.push(selected_title(&app).to_string());
        }
        assert_eq!(
            seen,
            vec!["Dark", "Narcos", "Roma", "Parasite", "Arcane", "Arcane", "Arcane"]
        );
        app.move_up();
        assert_eq!(app.flat_selected(), 3);
    }

    #[test]
    fn test_open_selected_and_back() {
        let mut app = sample_app(Layout::Grid);
        app.move_down();
        app.open_selected();
        assert_eq!(app.screen(), Screen::Detail(app.catalog.find_by_title("Roma").unwrap()));

        app.scroll_page_down();
        app.go_back();
        assert_eq!(app.screen(), Screen::Catalog);
        assert_eq!(app.detail_scroll, 0);
        app.go_back();
        assert_eq!(app.screen(), Screen::Catalog);
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let mut app = sample_app(Layout::Grid);
        app.open_route(Route::detail("Missing"));
        assert_eq!(app.screen(), Screen::NotFound("Missing"));
        app.open_route(Route::detail(""));
        assert_eq!(app.screen(), Screen::NotFound(""));
    }

    #[test]
    fn test_filter_rebuilds_sections() {
        let mut app = sample_app(Layout::Grid);
        app.move_down();
        app.filter = "ar".to_string();
        app.apply_filter();
        let names: Vec<&str> = app.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Trending", "Awards", "Animation"]);
        assert_eq!(app.visible_count(), 4);
        assert_eq!(app.sections[1].items, vec![3]);
        assert_eq!(selected_title(&app), "Dark");

        app.filter = "nothing matches".to_string();
        app.apply_filter();
        assert!(app.sections.is_empty());
        assert!(app.selected_movie().is_none());
        app.move_down();
        app.open_selected();
        assert_eq!(app.screen(), Screen::Catalog);
    }

    #[test]
    fn test_cancel_filter_edit_restores_previous_text() {
        let mut app = sample_app(Layout::Grid);
        app.filter = "dark".to_string();
        app.apply_filter();

        app.begin_filter_edit();
        app.filter.push_str("zzz");
        app.apply_filter();
        assert_eq!(app.visible_count(), 0);

        app.cancel_filter_edit();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.filter, "dark");
        assert_eq!(selected_title(&app), "Dark");

        app.begin_filter_edit();
        app.filter.clear();
        app.apply_filter();
        app.commit_filter_edit();
        assert_eq!(app.visible_count(), 5);
    }

    #[test]
    fn test_select_last_and_toggle_layout() {
        let mut app = sample_app(Layout::Grid);
        app.select_last();
        assert_eq!(selected_title(&app), "Arcane");
        app.toggle_layout();
        assert_eq!(app.layout, Layout::List);
        assert_eq!(app.flat_selected(), 4);
    }
}
