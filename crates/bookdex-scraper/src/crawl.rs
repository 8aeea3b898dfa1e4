//! The crawl loop: sequential pagination chain, concurrent detail fetches.

use std::time::Duration;

use futures::StreamExt;
use scraper::Html;
use url::Url;

use bookdex_core::{AppConfig, ProductRecord};

use crate::client::CatalogClient;
use crate::detail::parse_detail_page;
use crate::error::ScraperError;
use crate::listing::{parse_listing_page, DetailRequest};
use crate::selectors::Selectors;

/// Options for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// URL of the first listing page.
    pub seed_url: String,
    /// Continuation guard: stop following next-page links once this many
    /// listing pages have been fetched. `None` means unlimited.
    pub max_listing_pages: Option<usize>,
    /// How many detail pages may be in flight at once per listing page.
    pub max_concurrent_details: usize,
    /// Delay in milliseconds between consecutive listing-page fetches.
    pub inter_page_delay_ms: u64,
}

impl From<&AppConfig> for CrawlOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            seed_url: config.seed_url.clone(),
            max_listing_pages: config.max_listing_pages,
            max_concurrent_details: config.max_concurrent_details,
            inter_page_delay_ms: config.inter_page_delay_ms,
        }
    }
}

/// Counters reported at the end of a crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Listing pages fetched and parsed.
    pub listing_pages: usize,
    /// Records pushed to the sink.
    pub records: usize,
    /// Detail pages skipped because their fetch failed.
    pub skipped_details: usize,
}

/// Drives the listing/detail handlers over a live catalog.
pub struct Crawler {
    client: CatalogClient,
    selectors: Selectors,
}

impl Crawler {
    /// Builds a crawler for the default catalog layout.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if the selector set fails
    /// to parse.
    pub fn new(client: CatalogClient) -> Result<Self, ScraperError> {
        Ok(Self {
            client,
            selectors: Selectors::new()?,
        })
    }

    /// Crawls the catalog starting at the seed URL, pushing each extracted
    /// record to `sink` as it is produced.
    ///
    /// Listing pages are fetched strictly one after another: page N+1 is
    /// only requested after page N's handler has discovered the next link.
    /// Detail pages within one listing are fetched concurrently up to
    /// `max_concurrent_details`, and their records reach the sink in
    /// dispatch order. A failed detail fetch is logged and skipped; a
    /// failed listing fetch ends the run, since the pagination chain
    /// cannot continue without it.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSeedUrl`] if the seed does not parse,
    /// or any error from fetching a listing page.
    pub async fn crawl<F>(
        &self,
        options: &CrawlOptions,
        mut sink: F,
    ) -> Result<CrawlSummary, ScraperError>
    where
        F: FnMut(ProductRecord),
    {
        let mut listing_url =
            Url::parse(&options.seed_url).map_err(|e| ScraperError::InvalidSeedUrl {
                url: options.seed_url.clone(),
                reason: e.to_string(),
            })?;
        let mut summary = CrawlSummary::default();

        loop {
            if let Some(max) = options.max_listing_pages {
                if summary.listing_pages >= max {
                    tracing::info!(max, "listing page cap reached — stopping pagination");
                    break;
                }
            }

            if summary.listing_pages > 0 && options.inter_page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(options.inter_page_delay_ms)).await;
            }

            let body = self.client.fetch_page(&listing_url).await?;
            // `Html` is not `Send`; parse and extract before the next await.
            let listing = {
                let doc = Html::parse_document(&body);
                parse_listing_page(&doc, &listing_url, &self.selectors)
            };
            summary.listing_pages += 1;

            tracing::info!(
                url = %listing_url,
                page_number = ?listing.page_number,
                details = listing.detail_requests.len(),
                "parsed listing page"
            );

            let results = futures::stream::iter(listing.detail_requests)
                .map(|request| self.fetch_detail(request))
                .buffered(options.max_concurrent_details.max(1))
                .collect::<Vec<_>>()
                .await;

            for result in results {
                match result {
                    Some(record) => {
                        summary.records += 1;
                        sink(record);
                    }
                    None => summary.skipped_details += 1,
                }
            }

            match listing.next_page_url {
                Some(next) => listing_url = next,
                None => break,
            }
        }

        tracing::info!(
            listing_pages = summary.listing_pages,
            records = summary.records,
            skipped_details = summary.skipped_details,
            "crawl finished"
        );
        Ok(summary)
    }

    /// Fetches and extracts one detail page. A fetch failure produces no
    /// emission, not an error: the failure is logged and the crawl moves on.
    async fn fetch_detail(&self, request: DetailRequest) -> Option<ProductRecord> {
        match self.client.fetch_page(&request.url).await {
            Ok(body) => {
                let doc = Html::parse_document(&body);
                Some(parse_detail_page(&doc, request.page_number, &self.selectors))
            }
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "skipping detail page — fetch failed");
                None
            }
        }
    }
}
