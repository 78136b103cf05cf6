use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_CARD_WIDTH: u16 = 16;
const MIN_CARD_WIDTH: u16 = 10;
const MAX_CARD_WIDTH: u16 = 40;

/// Initial catalog layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
}

impl Layout {
    pub fn toggle(self) -> Self {
        match self {
            Layout::Grid => Layout::List,
            Layout::List => Layout::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Layout::Grid => "Grid",
            Layout::List => "List",
        }
    }
}

/// User configuration, read from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog JSON to load instead of the bundled one.
    pub data_path: Option<PathBuf>,
    /// Directory of `<image id>.txt` poster files.
    pub poster_dir: Option<PathBuf>,
    pub start_layout: Layout,
    pub log_level: String,
    pub card_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            poster_dir: None,
            start_layout: Layout::Grid,
            log_level: "info".to_string(),
            card_width: DEFAULT_CARD_WIDTH,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NoHomeDirectory => {
                "Could not determine the configuration directory".to_string()
            }
            ConfigError::Io { path, source } => {
                format!("Could not read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                format!("Config {} is not valid JSON: {}", path.display(), source)
            }
        }
    }
}

pub fn project_dirs() -> Result<directories::ProjectDirs, ConfigError> {
    directories::ProjectDirs::from("com", "movieshelf", "movie-shelf")
        .ok_or(ConfigError::NoHomeDirectory)
}

impl Config {
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, or the default location. A missing file gives defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        config.card_width = config.card_width.clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.start_layout, Layout::Grid);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.card_width, DEFAULT_CARD_WIDTH);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("config.json"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "start_layout": "list", "card_width": 4 }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.start_layout, Layout::List);
        assert_eq!(config.card_width, MIN_CARD_WIDTH);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_card_width_upper_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "card_width": 65535 }"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.card_width, MAX_CARD_WIDTH);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.user_message().contains("not valid JSON"));
    }

    #[test]
    fn test_layout_toggle() {
        assert_eq!(Layout::Grid.toggle(), Layout::List);
        assert_eq!(Layout::List.toggle().label(), "Grid");
    }
}
