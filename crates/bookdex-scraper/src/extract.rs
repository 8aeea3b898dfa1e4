//! Shared field-extraction helpers for listing and detail handlers.
//!
//! Every textual extraction follows the same default-and-strip policy: if a
//! selector matches nothing the field is an empty string, otherwise the
//! first match's text content is taken and surrounding whitespace stripped.
//! Numeric fields degrade to `None`/`0` when the text does not carry the
//! expected pattern. Nothing here is fatal.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use bookdex_core::StockStatus;

/// Current page number out of a `Page 3 of 50` pagination indicator.
static PAGE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Page (\d+) of").expect("valid regex"));

/// Unit count out of an `In stock (22 available)` availability block.
static STOCK_QUANTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+) available\)").expect("valid regex"));

/// Phrase gating the quantity search; matched case-sensitively.
const IN_STOCK_PHRASE: &str = "In stock";

/// Full text content of an element (descendant text nodes included),
/// stripped of surrounding whitespace.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the first element matching `selector`, or an empty string when
/// nothing matches.
pub(crate) fn first_text(doc: &Html, selector: &Selector) -> String {
    doc.select(selector).next().map(element_text).unwrap_or_default()
}

/// Parses a price out of text like `"  £51.77 "`, stripping surrounding
/// whitespace and any leading currency symbol.
///
/// Returns `None` for empty or unparseable input.
pub(crate) fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_start_matches(|c: char| !c.is_ascii_digit());
    cleaned.parse::<f64>().ok()
}

/// Parses the current page number out of pagination indicator text in the
/// `Page {current} of {total}` format.
///
/// Returns `None` when the text does not carry the pattern. No default is
/// fabricated: a listing without a parseable indicator yields records with
/// a null page number.
pub(crate) fn parse_page_number(text: &str) -> Option<u32> {
    PAGE_NUMBER_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
}

/// Joint stock status and quantity extraction from one availability block.
///
/// The block is available iff its text contains the `In stock` phrase, and
/// only then is the `(N available)` count searched for. An unavailable
/// block is always `(Unavailable, 0)`: a spurious count elsewhere in the
/// text must not be picked up.
pub(crate) fn parse_stock(text: &str) -> (StockStatus, u32) {
    if !text.contains(IN_STOCK_PHRASE) {
        return (StockStatus::Unavailable, 0);
    }
    let quantity = STOCK_QUANTITY_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0);
    (StockStatus::Available, quantity)
}

/// First following sibling element with the given tag name, skipping text
/// and comment nodes (sibling, not descendant).
pub(crate) fn following_sibling_named<'a>(
    element: ElementRef<'a>,
    name: &str,
) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == name)
}
