use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::capitalize;

pub type JobId = u64;

pub const DEFAULT_PAGE_PARAM: &str = "page";
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Which elements to select and what to call the extracted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRule {
    pub tag: String,
    pub attribute: String,
    pub value: String,
    /// Explicit output field name; `None` means `Capitalize(tag)`.
    pub field: Option<String>,
}

impl ExtractRule {
    pub fn new(
        tag: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attribute: attribute.into(),
            value: value.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn field_name(&self) -> String {
        match self.field.as_deref() {
            Some(field) => field.to_string(),
            None => capitalize(&self.tag),
        }
    }
}

impl fmt::Display for ExtractRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}=\"{}\">", self.tag, self.attribute, self.value)
    }
}

/// One page of a paginated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub base_url: String,
    pub page_param: String,
    pub page: u32,
}

impl PageRequest {
    /// `{base}?{param}={page}`; a base that already has a query string is not special-cased.
    pub fn url(&self) -> String {
        format!("{}?{}={}", self.base_url, self.page_param, self.page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPlan {
    pub base_url: String,
    pub page_param: String,
    pub max_pages: u32,
}

impl PaginationPlan {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_page_param(mut self, page_param: impl Into<String>) -> Self {
        self.page_param = page_param.into();
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Page requests for indices `1..=max_pages`.
    pub fn pages(&self) -> impl Iterator<Item = PageRequest> + '_ {
        (1..=self.max_pages).map(move |page| PageRequest {
            base_url: self.base_url.clone(),
            page_param: self.page_param.clone(),
            page,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeJob {
    Single { url: String, rule: ExtractRule },
    Paginated { plan: PaginationPlan, rule: ExtractRule },
}

impl ScrapeJob {
    pub fn rule(&self) -> &ExtractRule {
        match self {
            ScrapeJob::Single { rule, .. } | ScrapeJob::Paginated { rule, .. } => rule,
        }
    }

    pub fn page_count(&self) -> u32 {
        match self {
            ScrapeJob::Single { .. } => 1,
            ScrapeJob::Paginated { plan, .. } => plan.max_pages,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            ScrapeJob::Single { url, .. } => url,
            ScrapeJob::Paginated { plan, .. } => &plan.base_url,
        }
    }
}

/// How a finished job's records are applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergeMode {
    #[default]
    Replace,
    Append,
}

impl MergeMode {
    pub fn toggled(self) -> Self {
        match self {
            MergeMode::Replace => MergeMode::Append,
            MergeMode::Append => MergeMode::Replace,
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeMode::Replace => write!(f, "replace"),
            MergeMode::Append => write!(f, "append"),
        }
    }
}
