//! Detail page handler: one [`ProductRecord`] per product document.

use scraper::Html;

use bookdex_core::ProductRecord;

use crate::extract::{element_text, first_text, following_sibling_named, parse_price, parse_stock};
use crate::selectors::Selectors;

/// Extracts a [`ProductRecord`] from a parsed product detail document.
///
/// Exactly one record is produced per invocation. Missing or malformed
/// fields degrade to their per-field defaults (empty string, `None`, `0`);
/// nothing here aborts the record. Pure function of (document, inherited
/// page number): re-running it on the same document yields an identical
/// record.
#[must_use]
pub fn parse_detail_page(
    doc: &Html,
    page_number: Option<u32>,
    selectors: &Selectors,
) -> ProductRecord {
    let (stock_status, stock_quantity) =
        parse_stock(&first_text(doc, &selectors.availability));

    ProductRecord {
        page_number,
        title: first_text(doc, &selectors.heading),
        price: parse_price(&first_text(doc, &selectors.price)),
        stock_status,
        stock_quantity,
        upc: spec_table_value(doc, selectors, "UPC"),
        category: breadcrumb_category(doc, selectors),
        description: description_text(doc, selectors),
    }
}

/// Text of the `td` following the specification-table header cell whose
/// text equals `header` exactly (after whitespace stripping).
fn spec_table_value(doc: &Html, selectors: &Selectors, header: &str) -> String {
    doc.select(&selectors.spec_header)
        .find(|th| element_text(*th) == header)
        .and_then(|th| following_sibling_named(th, "td"))
        .map(element_text)
        .unwrap_or_default()
}

/// Text of the anchor inside the second-to-last breadcrumb item, i.e. the
/// item before the final current-category leaf.
fn breadcrumb_category(doc: &Html, selectors: &Selectors) -> String {
    let items: Vec<_> = doc.select(&selectors.breadcrumb_item).collect();
    items
        .len()
        .checked_sub(2)
        .and_then(|idx| items.get(idx))
        .and_then(|item| item.select(&selectors.anchor).next())
        .map(element_text)
        .unwrap_or_default()
}

/// Text of the first `p` sibling following the description anchor element.
fn description_text(doc: &Html, selectors: &Selectors) -> String {
    doc.select(&selectors.description_anchor)
        .next()
        .and_then(|anchor| following_sibling_named(anchor, "p"))
        .map(element_text)
        .unwrap_or_default()
}
