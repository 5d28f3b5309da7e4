use crate::{JobId, ScrapeJob, ScrapedRecord, SinkTarget};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a single-page or paginated scrape.
    ScrapeRequested(ScrapeJob),
    /// Engine completion for a scrape job.
    ScrapeFinished {
        job_id: JobId,
        records: Vec<ScrapedRecord>,
        pages_ok: u32,
        pages_failed: u32,
    },
    /// User asked to persist the session records.
    SaveRequested(SinkTarget),
    /// A sink finished writing.
    SaveCompleted { target: SinkTarget, rows: usize },
    /// A sink failed.
    SaveFailed { target: SinkTarget, message: String },
    /// User asked to see the current records.
    PreviewRequested,
    /// User flipped between replace and append.
    MergeModeToggled,
    /// Report a rejected input line.
    InputRejected(String),
}
