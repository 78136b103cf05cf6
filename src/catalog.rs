use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use wildmatch::WildMatch;

/// Catalog JSON compiled into the binary.
pub const BUNDLED_JSON: &str = include_str!("../assets/movies.json");

/// A single movie record as stored in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub image_resource: String,
    pub title: String,
    pub group: String,
    pub synopsis: String,
    pub original_title: String,
    pub genre: String,
    pub episodes: i32,
    pub year: i32,
    pub country: String,
    pub director: String,
    pub cast: Vec<String>,
    pub available_until: String,
}

/// How long a title stays in the catalog, when `availableUntil` is a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available { days_left: i64 },
    Expired,
    Unknown,
}

impl Movie {
    /// Cast members joined for display.
    pub fn cast_line(&self) -> String {
        self.cast.join(", ")
    }

    /// Parse `availableUntil` as `DD/MM/YYYY` or `YYYY-MM-DD`.
    pub fn available_until_date(&self) -> Option<NaiveDate> {
        let raw = self.available_until.trim();
        NaiveDate::parse_from_str(raw, "%d/%m/%Y")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }

    pub fn availability(&self, today: NaiveDate) -> Availability {
        match self.available_until_date() {
            Some(until) if until >= today => Availability::Available {
                days_left: until.signed_duration_since(today).num_days(),
            },
            Some(_) => Availability::Expired,
            None => Availability::Unknown,
        }
    }

    fn matches(&self, query: &Query) -> bool {
        let fields = [
            &self.title,
            &self.original_title,
            &self.genre,
            &self.director,
        ];
        fields.into_iter().any(|f| query.matches(f)) || self.cast.iter().any(|c| query.matches(c))
    }
}

/// Where the catalog JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Bundled => "bundled catalog".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Io { path, source } => {
                format!("Could not read catalog file {}: {}", path.display(), source)
            }
            CatalogError::Parse(e) => format!(
                "Catalog file is not valid (line {}, column {}): {}",
                e.line(),
                e.column(),
                e
            ),
        }
    }
}

/// Records sharing a group label, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieGroup<'a> {
    pub name: &'a str,
    pub movies: Vec<&'a Movie>,
}

/// The in-memory movie list. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let movies: Vec<Movie> = serde_json::from_str(text)?;
        Ok(Self { movies })
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_JSON)
    }

    pub async fn load(source: &CatalogSource) -> Result<Self, CatalogError> {
        match source {
            CatalogSource::Bundled => Self::bundled(),
            CatalogSource::File(path) => Self::load_file(path).await,
        }
    }

    async fn load_file(path: &Path) -> Result<Self, CatalogError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&text)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Partition all records by group, groups in order of first appearance.
    pub fn groups(&self) -> Vec<MovieGroup<'_>> {
        group_by_category(self.movies.iter())
    }

    /// First record whose title equals `title` exactly.
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        if title.is_empty() {
            return None;
        }
        self.movies.iter().find(|m| m.title == title)
    }

    /// Records matching a search query. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Movie> {
        self.filter_indices(query)
            .into_iter()
            .map(|i| &self.movies[i])
            .collect()
    }

    /// Indices of the records matching `query`, in file order.
    pub fn filter_indices(&self, query: &str) -> Vec<usize> {
        let query = Query::new(query);
        self.movies
            .iter()
            .enumerate()
            .filter(|(_, m)| query.is_empty() || m.matches(&query))
            .map(|(i, _)| i)
            .collect()
    }
}

pub fn group_by_category<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Vec<MovieGroup<'a>> {
    partition_by_group(movies, |m: &&'a Movie| -> &'a str {
        let movie: &'a Movie = *m;
        &movie.group
    })
    .into_iter()
    .map(|(name, movies)| MovieGroup { name, movies })
    .collect()
}

/// Partition `items` by group label. Groups keep the order in which they
/// first appear and items keep their input order within a group.
pub fn partition_by_group<'a, T>(
    items: impl IntoIterator<Item = T>,
    group_of: impl Fn(&T) -> &'a str,
) -> Vec<(&'a str, Vec<T>)> {
    let mut groups: Vec<(&'a str, Vec<T>)> = Vec::new();
    for item in items {
        let name = group_of(&item);
        match groups.iter_mut().find(|(g, _)| *g == name) {
            Some((_, members)) => members.push(item),
            None => groups.push((name, vec![item])),
        }
    }
    groups
}

/// Case-insensitive search term. Contains `*` or `?` → wildcard pattern.
struct Query {
    needle: String,
    pattern: Option<WildMatch>,
}

impl Query {
    fn new(raw: &str) -> Self {
        let needle = raw.trim().to_lowercase();
        let pattern = if needle.contains('*') || needle.contains('?') {
            Some(WildMatch::new(&needle))
        } else {
            None
        };
        Self { needle, pattern }
    }

    fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    fn matches(&self, field: &str) -> bool {
        let field = field.to_lowercase();
        match &self.pattern {
            Some(p) => p.matches(&field),
            None => field.contains(&self.needle),
        }
    }
}
