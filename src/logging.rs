use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "movie-shelf.log";

#[derive(Error, Debug)]
#[error("invalid log filter {filter:?}: {source}")]
pub struct FilterError {
    filter: String,
    #[source]
    source: tracing_subscriber::filter::ParseError,
}

impl FilterError {
    pub fn user_message(&self) -> String {
        format!(
            "Invalid log filter \"{}\" (expected e.g. `debug` or `movie_shelf=trace`)",
            self.filter
        )
    }
}

fn parse_filter(filter: &str) -> Result<EnvFilter, FilterError> {
    EnvFilter::try_new(filter).map_err(|source| FilterError {
        filter: filter.to_string(),
        source,
    })
}

/// Pick the filter: explicit flag, then `RUST_LOG`, then the config value.
pub fn build_filter(flag: Option<&str>, config_level: &str) -> Result<EnvFilter, FilterError> {
    match flag {
        Some(level) => parse_filter(level),
        None => EnvFilter::try_from_default_env().or_else(|_| parse_filter(config_level)),
    }
}

/// Send logs to `<dir>/movie-shelf.log`; the terminal belongs to the TUI.
pub fn init(
    dir: &Path,
    filter: EnvFilter,
) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()?;

    Ok(path)
}
