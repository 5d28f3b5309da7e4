//! Optional RON configuration for the scraper.
//!
//! Looked up at `$TAGSCRAPE_CONFIG`, then `./tagscrape.ron`. A missing file
//! means defaults; every field may be omitted.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use scrape_core::{MergeMode, DEFAULT_MAX_PAGES, DEFAULT_PAGE_PARAM};
use scrape_engine::{
    EngineSettings, FetchSettings, DEFAULT_CONCURRENCY, DEFAULT_CSV_FILE, DEFAULT_DB_FILE,
    DEFAULT_ERROR_LOG, DEFAULT_JSON_FILE, DEFAULT_TABLE,
};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

const CONFIG_ENV: &str = "TAGSCRAPE_CONFIG";
const CONFIG_FILENAME: &str = "tagscrape.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub redirect_limit: usize,
    pub concurrency: usize,
    pub page_param: String,
    pub default_max_pages: u32,
    pub merge_mode: MergeMode,
    pub error_log: PathBuf,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub csv_file: String,
    pub json_file: String,
    pub db_file: String,
    pub table: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            request_timeout_secs: fetch.request_timeout.as_secs(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            max_body_bytes: fetch.max_bytes,
            redirect_limit: fetch.redirect_limit,
            concurrency: DEFAULT_CONCURRENCY,
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            default_max_pages: DEFAULT_MAX_PAGES,
            merge_mode: MergeMode::default(),
            error_log: PathBuf::from(DEFAULT_ERROR_LOG),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("tagscrape.log"),
            csv_file: DEFAULT_CSV_FILE.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            db_file: DEFAULT_DB_FILE.to_string(),
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Resolve the config path and load it; `Ok(default)` when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            fetch: FetchSettings {
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                redirect_limit: self.redirect_limit,
                max_bytes: self.max_body_bytes,
            },
            concurrency: self.concurrency,
            error_log_path: self.error_log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ScraperConfig::load_from(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, ScraperConfig::default());
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.page_param, "page");
        assert_eq!(config.default_max_pages, 5);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tagscrape.ron");
        fs::write(
            &path,
            "(request_timeout_secs: 3, concurrency: 1, merge_mode: Append, table: \"prices\")",
        )
        .unwrap();

        let config = ScraperConfig::load_from(&path).unwrap();
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.merge_mode, MergeMode::Append);
        assert_eq!(config.table, "prices");
        assert_eq!(config.csv_file, "scraped_data.csv");

        let settings = config.engine_settings();
        assert_eq!(settings.fetch.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.concurrency, 1);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.ron");
        fs::write(&path, "(concurrency: \"many\"").unwrap();

        let err = ScraperConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn pretty_config_round_trips() {
        let config = ScraperConfig {
            log_destination: LogDestination::Both,
            ..ScraperConfig::default()
        };
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap();
        let back: ScraperConfig = ron::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
