use std::fmt;
use std::path::PathBuf;

use crate::{JobId, ScrapeJob, ScrapedRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RunScrape { job_id: JobId, job: ScrapeJob },
    Save {
        target: SinkTarget,
        records: Vec<ScrapedRecord>,
    },
}

/// Where a save request writes the session records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    Csv { path: PathBuf },
    Json { path: PathBuf },
    Sqlite { db_path: PathBuf, table: String },
}

impl fmt::Display for SinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkTarget::Csv { path } | SinkTarget::Json { path } => {
                write!(f, "{}", path.display())
            }
            SinkTarget::Sqlite { db_path, table } => {
                write!(f, "database {} in table '{}'", db_path.display(), table)
            }
        }
    }
}
