use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use scrape_logging::scrape_warn;

use crate::FetchError;

pub const DEFAULT_ERROR_LOG: &str = "error_log.txt";

/// Append-only, best-effort log of fetch failures for the user.
///
/// Never rotated or truncated. A failure to write is logged and swallowed.
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn record(&self, err: &FetchError) {
        self.append(&format!(
            "Error fetching {}: {}: {}",
            err.url, err.kind, err.message
        ));
    }

    pub fn append(&self, message: &str) {
        let line = format!(
            "{} {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            message.trim_end()
        );
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));
        if let Err(err) = written {
            scrape_warn!("Could not append to error log {:?}: {}", self.path, err);
        }
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG)
    }
}
