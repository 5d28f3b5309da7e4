use crate::view_model::{AppViewModel, PREVIEW_LIMIT};
use crate::{JobId, MergeMode, ScrapeJob, ScrapedRecord};

/// Ordered records produced by scrape jobs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeSession {
    records: Vec<ScrapedRecord>,
}

impl ScrapeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ScrapedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply a finished job's records; `Replace` discards everything held before.
    pub fn apply(&mut self, records: Vec<ScrapedRecord>, mode: MergeMode) {
        match mode {
            MergeMode::Replace => self.records = records,
            MergeMode::Append => self.records.extend(records),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One user-visible status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingJob {
    pub job_id: JobId,
    pub job: ScrapeJob,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: ScrapeSession,
    merge_mode: MergeMode,
    next_job_id: JobId,
    pending: Option<PendingJob>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merge_mode(merge_mode: MergeMode) -> Self {
        Self {
            merge_mode,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            record_count: self.session.len(),
            merge_mode: self.merge_mode,
            pending_job: self.pending.as_ref().map(|p| p.job_id),
            notice: self.notice.clone(),
            preview: self
                .session
                .records()
                .iter()
                .take(PREVIEW_LIMIT)
                .cloned()
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> &ScrapeSession {
        &self.session
    }

    pub fn merge_mode(&self) -> MergeMode {
        self.merge_mode
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Removes the current notice so it is shown only once.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice::new(level, text));
        self.mark_dirty();
    }

    pub(crate) fn begin_job(&mut self, job: ScrapeJob) -> Option<JobId> {
        if self.pending.is_some() {
            return None;
        }
        self.next_job_id += 1;
        let job_id = self.next_job_id;
        self.pending = Some(PendingJob { job_id, job });
        self.mark_dirty();
        Some(job_id)
    }

    pub(crate) fn finish_job(&mut self, job_id: JobId) -> Option<PendingJob> {
        match &self.pending {
            Some(pending) if pending.job_id == job_id => self.pending.take(),
            _ => None,
        }
    }

    pub(crate) fn session_mut(&mut self) -> &mut ScrapeSession {
        &mut self.session
    }

    pub(crate) fn toggle_merge_mode(&mut self) -> MergeMode {
        self.merge_mode = self.merge_mode.toggled();
        self.mark_dirty();
        self.merge_mode
    }
}
