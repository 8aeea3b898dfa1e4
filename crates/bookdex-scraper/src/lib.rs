pub mod client;
pub mod crawl;
pub mod detail;
pub mod error;
pub mod listing;
pub mod selectors;

mod extract;
mod retry;

pub use client::CatalogClient;
pub use crawl::{CrawlOptions, CrawlSummary, Crawler};
pub use detail::parse_detail_page;
pub use error::ScraperError;
pub use listing::{parse_listing_page, DetailRequest, ListingPage};
pub use selectors::Selectors;
