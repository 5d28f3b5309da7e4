//! Scraper engine: fetch, extract, paginate and persist.
mod document;
mod engine;
mod error_log;
mod extract;
mod fetch;
mod paginate;
mod persist;
mod scrape;
mod sink;
mod types;

pub use document::Document;
pub use engine::{EngineHandle, EngineSettings};
pub use error_log::{ErrorLog, DEFAULT_ERROR_LOG};
pub use extract::{Extractor, TagExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use paginate::{
    ChannelProgressSink, NullProgressSink, Paginator, ProgressSink, DEFAULT_CONCURRENCY,
};
pub use persist::{ensure_output_dir, write_atomic, PersistError};
pub use scrape::PageScraper;
pub use sink::{
    load_json, save_records, CsvSink, JsonSink, RecordSink, SaveOutcome, SinkError, SqliteSink,
    DEFAULT_CSV_FILE, DEFAULT_DB_FILE, DEFAULT_JSON_FILE, DEFAULT_TABLE,
};
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobProgress, PageOutcome,
    ScrapeReport, Stage,
};
