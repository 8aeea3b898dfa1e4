//! Listing page handler: discovers detail pages and the pagination chain.

use scraper::Html;
use url::Url;

use crate::extract::{first_text, parse_page_number};
use crate::selectors::Selectors;

/// A detail-page fetch discovered on a listing page, carrying the page
/// number it was discovered on as dispatch context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub url: Url,
    pub page_number: Option<u32>,
}

/// Everything extracted from one listing document. Transient: exists only
/// between parsing a listing page and dispatching its follow-up fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Current page number from the `Page N of M` indicator, `None` when
    /// the indicator is absent or unparseable.
    pub page_number: Option<u32>,
    /// One request per anchor found under a listing card, in document
    /// order.
    pub detail_requests: Vec<DetailRequest>,
    /// Resolved target of the "next" pagination control, if present.
    pub next_page_url: Option<Url>,
}

/// Extracts page number, detail links, and the next-page link from a parsed
/// listing document.
///
/// Pure function of its inputs: no retained state, no side effects beyond
/// a warning log for links that cannot be resolved against `base_url`
/// (those are skipped, never fatal).
#[must_use]
pub fn parse_listing_page(doc: &Html, base_url: &Url, selectors: &Selectors) -> ListingPage {
    let page_number = parse_page_number(&first_text(doc, &selectors.pagination_current));

    let detail_requests = doc
        .select(&selectors.listing_card_link)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| resolve(base_url, href))
        .map(|url| DetailRequest { url, page_number })
        .collect();

    let next_page_url = doc
        .select(&selectors.pagination_next)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| resolve(base_url, href));

    ListingPage {
        page_number,
        detail_requests,
        next_page_url,
    }
}

fn resolve(base_url: &Url, href: &str) -> Option<Url> {
    match base_url.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(href, error = %e, "skipping link — not resolvable against page URL");
            None
        }
    }
}
