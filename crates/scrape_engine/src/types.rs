use std::fmt;

use scrape_core::{JobId, ScrapedRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub page: u32,
    pub total_pages: u32,
    pub stage: Stage,
    pub records: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(JobProgress),
    JobCompleted { job_id: JobId, report: ScrapeReport },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Any failure to obtain a page: bad URL, transport error, timeout or non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} fetching {url}: {message}")]
pub struct FetchError {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Result of one page within a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub page: u32,
    pub url: String,
    /// Number of records extracted, or why the page could not be fetched.
    pub result: Result<usize, FetchError>,
}

/// Everything a finished job produced, pages in index order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeReport {
    pub pages: Vec<PageOutcome>,
    pub records: Vec<ScrapedRecord>,
}

impl ScrapeReport {
    pub fn pages_ok(&self) -> u32 {
        self.pages.iter().filter(|p| p.result.is_ok()).count() as u32
    }

    pub fn pages_failed(&self) -> u32 {
        self.pages.iter().filter(|p| p.result.is_err()).count() as u32
    }

    pub fn failures(&self) -> impl Iterator<Item = &FetchError> {
        self.pages.iter().filter_map(|p| p.result.as_ref().err())
    }
}
