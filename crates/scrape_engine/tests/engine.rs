use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use scrape_core::{ExtractRule, PaginationPlan, ScrapeJob, ScrapedRecord};
use scrape_engine::{
    EngineEvent, EngineHandle, EngineSettings, ErrorLog, FailureKind, FetchError, FetchSettings,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(error_log_path: PathBuf) -> EngineSettings {
    EngineSettings {
        fetch: FetchSettings::default(),
        concurrency: 2,
        error_log_path,
    }
}

fn wait_for_completion(engine: &EngineHandle) -> (Vec<EngineEvent>, scrape_engine::ScrapeReport) {
    let mut progress = Vec::new();
    while let Some(event) = engine.recv() {
        match event {
            EngineEvent::JobCompleted { report, .. } => return (progress, report),
            other => progress.push(other),
        }
    }
    panic!("engine stopped before completing the job");
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_runs_single_page_job() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<h1 id="name"> Desk   Lamp </h1><h1 id="other">x</h1>"#,
            "text/html",
        ))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(settings(temp.path().join("error_log.txt")));
    engine.submit(
        7,
        ScrapeJob::Single {
            url: format!("{}/item", server.uri()),
            rule: ExtractRule::new("h1", "id", "name"),
        },
    );

    let report = tokio::task::spawn_blocking(move || wait_for_completion(&engine).1)
        .await
        .unwrap();
    assert_eq!(report.records, vec![ScrapedRecord::new("H1", "Desk Lamp")]);
    assert_eq!(report.pages_ok(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_logs_failures_and_keeps_going() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("error_log.txt");
    let engine = EngineHandle::new(settings(log_path.clone()));
    engine.submit(
        1,
        ScrapeJob::Paginated {
            plan: PaginationPlan::new(format!("{}/list", server.uri())).with_max_pages(3),
            rule: ExtractRule::new("span", "class", "price"),
        },
    );

    let (progress, report) = tokio::task::spawn_blocking(move || wait_for_completion(&engine))
        .await
        .unwrap();
    assert_eq!(report.pages_failed(), 3);
    assert!(report.records.is_empty());
    assert_eq!(progress.len(), 6);

    let log = fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 3);
    for page in 1..=3 {
        assert!(log.contains(&format!("/list?page={page}: http status 404")));
    }
}

#[test]
fn error_log_appends_timestamped_lines() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("error_log.txt");
    fs::write(&path, "existing line\n").unwrap();
    let log = ErrorLog::new(&path);

    log.record(&FetchError::new(
        "https://a.example",
        FailureKind::Timeout,
        "operation timed out",
    ));

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "existing line");
    let (timestamp, message) = lines[1].split_once(' ').unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert_eq!(
        message,
        "Error fetching https://a.example: timeout: operation timed out"
    );
}

#[test]
fn error_log_swallows_write_failures() {
    let temp = TempDir::new().unwrap();
    // A directory cannot be opened for appending.
    let log = ErrorLog::new(temp.path());
    log.append("this goes nowhere");
    assert!(temp.path().is_dir());
}
