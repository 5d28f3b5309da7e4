use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use scrape_core::{JobId, ScrapeJob};
use scrape_logging::{scrape_error, scrape_info};

use crate::paginate::{ChannelProgressSink, Paginator, DEFAULT_CONCURRENCY};
use crate::{EngineEvent, ErrorLog, FetchSettings, Fetcher, PageScraper, ReqwestFetcher};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub fetch: FetchSettings,
    pub concurrency: usize,
    pub error_log_path: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            concurrency: DEFAULT_CONCURRENCY,
            error_log_path: PathBuf::from(crate::error_log::DEFAULT_ERROR_LOG),
        }
    }
}

enum EngineCommand {
    Run { job_id: JobId, job: ScrapeJob },
}

/// Owns the async runtime on a background thread; jobs go in, events come out.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(settings.fetch.clone()));
        Self::with_fetcher(fetcher, settings)
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>, settings: EngineSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let error_log = Arc::new(ErrorLog::new(settings.error_log_path.clone()));
        let scraper = Arc::new(PageScraper::new(fetcher, error_log));
        let paginator = Arc::new(Paginator::new(scraper, settings.concurrency));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    // Dropping the senders makes `recv` on the handle return `None`.
                    scrape_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let paginator = paginator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(paginator.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, job_id: JobId, job: ScrapeJob) {
        let _ = self.cmd_tx.send(EngineCommand::Run { job_id, job });
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    paginator: &Paginator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Run { job_id, job } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let report = paginator.run(job_id, &job, &sink).await;
            scrape_info!(
                "Job {} finished: {} records, {} pages ok, {} failed",
                job_id,
                report.records.len(),
                report.pages_ok(),
                report.pages_failed()
            );
            let _ = event_tx.send(EngineEvent::JobCompleted { job_id, report });
        }
    }
}
