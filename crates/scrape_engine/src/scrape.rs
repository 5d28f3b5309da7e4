use std::sync::Arc;

use scrape_core::{ExtractRule, ScrapedRecord};
use scrape_logging::{scrape_info, scrape_warn};

use crate::{Document, ErrorLog, Extractor, FetchError, Fetcher, TagExtractor};

/// Fetch one URL and extract records from it.
pub struct PageScraper {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
    error_log: Arc<ErrorLog>,
}

impl PageScraper {
    pub fn new(fetcher: Arc<dyn Fetcher>, error_log: Arc<ErrorLog>) -> Self {
        Self::with_extractor(fetcher, Arc::new(TagExtractor), error_log)
    }

    pub fn with_extractor(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn Extractor>,
        error_log: Arc<ErrorLog>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            error_log,
        }
    }

    /// Fetch the page; a failure goes to the error log and is returned, never raised further.
    pub async fn fetch_document(&self, url: &str) -> Result<Document, FetchError> {
        match self.fetcher.fetch(url).await {
            Ok(output) => Ok(Document::from_fetch(&output)),
            Err(err) => {
                scrape_warn!("{}", err);
                self.error_log.record(&err);
                Err(err)
            }
        }
    }

    pub async fn scrape_page(
        &self,
        url: &str,
        rule: &ExtractRule,
    ) -> Result<Vec<ScrapedRecord>, FetchError> {
        let document = self.fetch_document(url).await?;
        let records = self.extractor.extract(&document, rule);
        scrape_info!("Extracted {} {} from {}", records.len(), rule, url);
        Ok(records)
    }
}
