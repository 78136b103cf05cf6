use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Poster art compiled into the binary, keyed by image identifier.
const BUNDLED_POSTERS: &[(&str, &str)] = &[
    ("arcane", include_str!("../assets/posters/arcane.txt")),
    ("city_of_god", include_str!("../assets/posters/city_of_god.txt")),
    ("dark", include_str!("../assets/posters/dark.txt")),
    ("money_heist", include_str!("../assets/posters/money_heist.txt")),
    ("narcos", include_str!("../assets/posters/narcos.txt")),
    ("parasite", include_str!("../assets/posters/parasite.txt")),
    ("spirited_away", include_str!("../assets/posters/spirited_away.txt")),
    ("stranger_things", include_str!("../assets/posters/stranger_things.txt")),
    ("the_crown", include_str!("../assets/posters/the_crown.txt")),
];

/// Where a poster's art came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterOrigin {
    Bundled,
    File(PathBuf),
}

/// Text-art poster for one image identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poster {
    pub id: String,
    pub art: String,
    pub origin: PosterOrigin,
}

impl Poster {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.art.lines()
    }
}

/// Result of resolving an image identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterHandle<'a> {
    Art(&'a Poster),
    Missing,
}

impl PosterHandle<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, PosterHandle::Missing)
    }
}

/// Explicit image identifier → poster table.
#[derive(Debug, Clone, Default)]
pub struct PosterRegistry {
    posters: HashMap<String, Poster>,
}

impl PosterRegistry {
    pub fn bundled() -> Self {
        let posters = BUNDLED_POSTERS
            .iter()
            .map(|(id, art)| {
                let poster = Poster {
                    id: id.to_string(),
                    art: art.to_string(),
                    origin: PosterOrigin::Bundled,
                };
                (id.to_string(), poster)
            })
            .collect();
        Self { posters }
    }

    /// Bundled posters, overridden by any `*.txt` files in `dir`.
    pub fn with_dir(dir: &Path) -> std::io::Result<Self> {
        let mut registry = Self::bundled();
        registry.scan(dir)?;
        Ok(registry)
    }

    /// Add every `<id>.txt` in `dir`. A missing directory adds nothing, and
    /// files that cannot be read as text are skipped.
    pub fn scan(&mut self, dir: &Path) -> std::io::Result<usize> {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "poster directory not found, skipping");
            return Ok(0);
        }

        let mut added = 0;
        for entry in std::fs::read_dir(dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "txt") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let art = match std::fs::read_to_string(&path) {
                Ok(art) => art,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable poster file, skipping");
                    continue;
                }
            };
            self.posters.insert(
                id.to_string(),
                Poster {
                    id: id.to_string(),
                    art,
                    origin: PosterOrigin::File(path.clone()),
                },
            );
            added += 1;
        }
        debug!(dir = %dir.display(), added, "scanned poster directory");
        Ok(added)
    }

    pub fn resolve(&self, id: &str) -> PosterHandle<'_> {
        match self.posters.get(id) {
            Some(poster) => PosterHandle::Art(poster),
            None => PosterHandle::Missing,
        }
    }

    /// Identifiers referenced by `ids` that have no poster. Logged once at load.
    pub fn report_missing<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        let missing: Vec<&str> = ids
            .into_iter()
            .filter(|id| !self.posters.contains_key(*id))
            .collect();
        for id in &missing {
            warn!(image = %id, "no poster for image identifier, using placeholder");
        }
        missing
    }

    pub fn len(&self) -> usize {
        self.posters.len()
    }
}

/// Up to two initials from a title, for placeholder posters.
pub fn initials(title: &str) -> String {
    title
        .split_whitespace()
        .filter_map(|w| w.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
