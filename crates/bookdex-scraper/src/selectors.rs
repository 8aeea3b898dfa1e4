//! CSS selectors used by the listing and detail handlers.
//!
//! All selectors are parsed once at construction and passed by reference
//! into the pure extraction functions. Class selectors are containment
//! matches by CSS semantics, so markup carrying extra classes (e.g.
//! `class="product_pod recent"`) still matches.

use scraper::Selector;

use crate::error::ScraperError;

const LISTING_CARD_LINK: &str = "article.product_pod a";
const PAGINATION_CURRENT: &str = "ul.pager li.current";
const PAGINATION_NEXT: &str = "ul.pager li.next a";
const HEADING: &str = "h1";
const PRICE: &str = "div.product_main p.price_color";
const AVAILABILITY: &str = "div.product_main p.availability";
const SPEC_HEADER: &str = "table th";
const BREADCRUMB_ITEM: &str = "ul.breadcrumb > li";
const ANCHOR: &str = "a";
const DESCRIPTION_ANCHOR: &str = "#product_description";

/// Parsed selector set for one catalog layout.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Anchors nested under a listing-card container, in document order.
    pub listing_card_link: Selector,
    /// Pagination indicator carrying the `Page N of M` text.
    pub pagination_current: Selector,
    /// The "next" control under the pager.
    pub pagination_next: Selector,
    /// Top-level product heading.
    pub heading: Selector,
    /// Price element scoped under the main-product container, so related
    /// products reusing the price class elsewhere do not match first.
    pub price: Selector,
    /// Availability block, scoped like the price.
    pub availability: Selector,
    /// Header cells of the product specification table.
    pub spec_header: Selector,
    /// Direct child items of the breadcrumb list.
    pub breadcrumb_item: Selector,
    /// Anchor within a breadcrumb item.
    pub anchor: Selector,
    /// Element whose following `p` sibling holds the description.
    pub description_anchor: Selector,
}

impl Selectors {
    /// Parses the full selector set for the default catalog layout.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] naming the offending
    /// selector if any fails to parse.
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            listing_card_link: parse(LISTING_CARD_LINK)?,
            pagination_current: parse(PAGINATION_CURRENT)?,
            pagination_next: parse(PAGINATION_NEXT)?,
            heading: parse(HEADING)?,
            price: parse(PRICE)?,
            availability: parse(AVAILABILITY)?,
            spec_header: parse(SPEC_HEADER)?,
            breadcrumb_item: parse(BREADCRUMB_ITEM)?,
            anchor: parse(ANCHOR)?,
            description_anchor: parse(DESCRIPTION_ANCHOR)?,
        })
    }
}

fn parse(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
