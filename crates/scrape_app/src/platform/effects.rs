use indicatif::{ProgressBar, ProgressStyle};
use scrape_core::{Effect, JobId, Msg, ScrapeJob};
use scrape_engine::{
    save_records, EngineEvent, EngineHandle, EngineSettings, SaveOutcome, ScrapeReport, Stage,
};
use scrape_logging::{scrape_error, scrape_info, scrape_warn};

use super::ui::render;

/// Runs effects produced by `update` and turns their outcome back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            engine: EngineHandle::new(settings),
        }
    }

    pub fn run(&self, effect: Effect) -> Vec<Msg> {
        match effect {
            Effect::RunScrape { job_id, job } => {
                scrape_info!("RunScrape job_id={} target={}", job_id, job.target());
                self.engine.submit(job_id, job.clone());
                let msg = match self.wait_for(job_id, &job) {
                    Some(report) => {
                        for failure in report.failures() {
                            println!("{}", render::fetch_failure(failure));
                        }
                        Msg::ScrapeFinished {
                            job_id,
                            pages_ok: report.pages_ok(),
                            pages_failed: report.pages_failed(),
                            records: report.records,
                        }
                    }
                    None => Msg::ScrapeFinished {
                        job_id,
                        records: Vec::new(),
                        pages_ok: 0,
                        pages_failed: job.page_count(),
                    },
                };
                vec![msg]
            }
            Effect::Save { target, records } => match save_records(&target, &records) {
                Ok(SaveOutcome::Saved { rows, .. }) => vec![Msg::SaveCompleted { target, rows }],
                Ok(SaveOutcome::NothingToSave) => {
                    scrape_warn!("Save to {} skipped: no records", target);
                    Vec::new()
                }
                Err(err) => {
                    scrape_error!("Save to {} failed: {}", target, err);
                    vec![Msg::SaveFailed {
                        target,
                        message: err.to_string(),
                    }]
                }
            },
        }
    }

    /// Blocks on engine events for `job_id`, drawing a bar per finished page.
    /// `None` when the engine thread went away first.
    fn wait_for(&self, job_id: JobId, job: &ScrapeJob) -> Option<ScrapeReport> {
        let bar = progress_bar(job);
        loop {
            match self.engine.recv() {
                Some(EngineEvent::Progress(progress)) if progress.job_id == job_id => {
                    match progress.stage {
                        Stage::Fetching => {
                            bar.set_message(format!("page {}", progress.page));
                        }
                        Stage::Done | Stage::Failed => bar.inc(1),
                    }
                }
                Some(EngineEvent::JobCompleted {
                    job_id: finished,
                    report,
                }) if finished == job_id => {
                    bar.finish_and_clear();
                    return Some(report);
                }
                Some(_) => {}
                None => {
                    bar.abandon();
                    scrape_error!("Engine stopped while job {} was running", job_id);
                    return None;
                }
            }
        }
    }
}

fn progress_bar(job: &ScrapeJob) -> ProgressBar {
    let bar = ProgressBar::new(u64::from(job.page_count()));
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}
