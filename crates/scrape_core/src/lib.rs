//! Scraper core: data model, menu parsing and the pure session state machine.
mod effect;
mod job;
mod menu;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, SinkTarget};
pub use job::{
    ExtractRule, JobId, MergeMode, PageRequest, PaginationPlan, ScrapeJob, DEFAULT_MAX_PAGES,
    DEFAULT_PAGE_PARAM,
};
pub use menu::{or_default, parse_page_count, InputError, MenuCommand};
pub use msg::Msg;
pub use record::{capitalize, distinct_fields, RecordError, ScrapedRecord};
pub use state::{AppState, Notice, NoticeLevel, ScrapeSession};
pub use update::update;
pub use view_model::{AppViewModel, PREVIEW_LIMIT};
