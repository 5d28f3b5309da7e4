use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use scrape_core::{ExtractRule, JobId, PageRequest, PaginationPlan, ScrapeJob, ScrapedRecord};
use scrape_logging::scrape_info;

use crate::{EngineEvent, JobProgress, PageOutcome, PageScraper, ScrapeReport, Stage};

pub const DEFAULT_CONCURRENCY: usize = 4;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Discards progress; for callers that only want the report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: EngineEvent) {}
}

/// Runs scrape jobs page by page.
///
/// Up to `concurrency` pages are in flight at once; results are always
/// reassembled in page-index order. Every page is attempted, failures included.
pub struct Paginator {
    scraper: Arc<PageScraper>,
    concurrency: usize,
}

impl Paginator {
    pub fn new(scraper: Arc<PageScraper>, concurrency: usize) -> Self {
        Self {
            scraper,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn run(
        &self,
        job_id: JobId,
        job: &ScrapeJob,
        sink: &dyn ProgressSink,
    ) -> ScrapeReport {
        match job {
            ScrapeJob::Single { url, rule } => {
                let outcome = self.scrape_one(job_id, 1, 1, url.clone(), rule, sink).await;
                collect_report(vec![outcome])
            }
            ScrapeJob::Paginated { plan, rule } => self.paginate(job_id, plan, rule, sink).await,
        }
    }

    pub async fn paginate(
        &self,
        job_id: JobId,
        plan: &PaginationPlan,
        rule: &ExtractRule,
        sink: &dyn ProgressSink,
    ) -> ScrapeReport {
        scrape_info!(
            "Job {} paginating {} over {} pages ({} at a time)",
            job_id,
            plan.base_url,
            plan.max_pages,
            self.concurrency
        );
        let total = plan.max_pages;
        let outcomes: Vec<(PageOutcome, Vec<ScrapedRecord>)> = stream::iter(plan.pages())
            .map(|request: PageRequest| {
                self.scrape_one(job_id, request.page, total, request.url(), rule, sink)
            })
            .buffered(self.concurrency)
            .collect()
            .await;
        collect_report(outcomes)
    }

    async fn scrape_one(
        &self,
        job_id: JobId,
        page: u32,
        total_pages: u32,
        url: String,
        rule: &ExtractRule,
        sink: &dyn ProgressSink,
    ) -> (PageOutcome, Vec<ScrapedRecord>) {
        let progress = |stage: Stage, records: Option<usize>| {
            EngineEvent::Progress(JobProgress {
                job_id,
                page,
                total_pages,
                stage,
                records,
            })
        };

        sink.emit(progress(Stage::Fetching, None));
        match self.scraper.scrape_page(&url, rule).await {
            Ok(records) => {
                sink.emit(progress(Stage::Done, Some(records.len())));
                let outcome = PageOutcome {
                    page,
                    url,
                    result: Ok(records.len()),
                };
                (outcome, records)
            }
            Err(err) => {
                sink.emit(progress(Stage::Failed, None));
                let outcome = PageOutcome {
                    page,
                    url,
                    result: Err(err),
                };
                (outcome, Vec::new())
            }
        }
    }
}

fn collect_report(outcomes: Vec<(PageOutcome, Vec<ScrapedRecord>)>) -> ScrapeReport {
    let mut report = ScrapeReport::default();
    for (outcome, records) in outcomes {
        report.pages.push(outcome);
        report.records.extend(records);
    }
    report
}
