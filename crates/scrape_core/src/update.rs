use crate::{AppState, Effect, Msg, NoticeLevel, ScrapeJob};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ScrapeRequested(job) => {
            let describe = describe_start(&job);
            match state.begin_job(job.clone()) {
                Some(job_id) => {
                    state.notify(NoticeLevel::Info, describe);
                    vec![Effect::RunScrape { job_id, job }]
                }
                None => {
                    state.notify(
                        NoticeLevel::Warning,
                        "A scrape is already running; wait for it to finish.",
                    );
                    Vec::new()
                }
            }
        }
        Msg::ScrapeFinished {
            job_id,
            records,
            pages_ok,
            pages_failed,
        } => {
            let Some(pending) = state.finish_job(job_id) else {
                // Stale completion for a job we no longer track.
                return (state, Vec::new());
            };

            if pages_ok == 0 {
                // Nothing was fetched: keep the session as it was.
                let text = match &pending.job {
                    ScrapeJob::Single { url, .. } => {
                        format!("Failed to fetch {url}. Check error log.")
                    }
                    ScrapeJob::Paginated { .. } => {
                        format!("All {pages_failed} pages failed. Check error log.")
                    }
                };
                state.notify(NoticeLevel::Error, text);
                return (state, Vec::new());
            }

            let count = records.len();
            let mode = state.merge_mode();
            state.session_mut().apply(records, mode);

            let (level, mut text) = if count == 0 {
                (
                    NoticeLevel::Warning,
                    format!("Scraped 0 items. Nothing matched {}.", pending.job.rule()),
                )
            } else {
                (NoticeLevel::Success, format!("Scraped {count} items."))
            };
            if pages_failed > 0 {
                text.push_str(&format!(
                    " {pages_failed} of {} pages failed, see error log.",
                    pages_ok + pages_failed
                ));
                state.notify(NoticeLevel::Warning, text);
            } else {
                state.notify(level, text);
            }
            Vec::new()
        }
        Msg::SaveRequested(target) => {
            if state.session().is_empty() {
                state.notify(NoticeLevel::Error, "No data to save!");
                Vec::new()
            } else {
                vec![Effect::Save {
                    target,
                    records: state.session().records().to_vec(),
                }]
            }
        }
        Msg::SaveCompleted { target, rows } => {
            state.notify(
                NoticeLevel::Success,
                format!("Data saved to {target} ({rows} rows)."),
            );
            Vec::new()
        }
        Msg::SaveFailed { target, message } => {
            state.notify(
                NoticeLevel::Error,
                format!("Failed to save to {target}: {message}"),
            );
            Vec::new()
        }
        Msg::PreviewRequested => {
            let count = state.session().len();
            if count == 0 {
                state.notify(NoticeLevel::Warning, "No data to preview.");
            } else {
                state.notify(NoticeLevel::Info, format!("{count} records in session."));
            }
            Vec::new()
        }
        Msg::MergeModeToggled => {
            let mode = state.toggle_merge_mode();
            state.notify(
                NoticeLevel::Info,
                format!("Merge mode is now '{mode}'."),
            );
            Vec::new()
        }
        Msg::InputRejected(reason) => {
            state.notify(NoticeLevel::Error, reason);
            Vec::new()
        }
    };

    (state, effects)
}

fn describe_start(job: &ScrapeJob) -> String {
    match job {
        ScrapeJob::Single { url, .. } => format!("Scraping data from {url}..."),
        ScrapeJob::Paginated { plan, .. } => format!(
            "Starting pagination over {} pages of {}...",
            plan.max_pages, plan.base_url
        ),
    }
}
