use crate::{JobId, MergeMode, Notice, ScrapedRecord};

/// How many records a preview shows.
pub const PREVIEW_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub record_count: usize,
    pub merge_mode: MergeMode,
    pub pending_job: Option<JobId>,
    pub notice: Option<Notice>,
    pub preview: Vec<ScrapedRecord>,
    pub dirty: bool,
}
