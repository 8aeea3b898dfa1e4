use serde::{Deserialize, Serialize};

/// Stock availability of a product, derived from the availability text on
/// its detail page.
///
/// Serialized lowercase (`"available"` / `"unavailable"`) in output records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Available,
    Unavailable,
}

/// One product extracted from a detail page, ready for serialization.
///
/// Records are created once per detail page and never mutated or merged.
/// Missing or malformed source data degrades to the per-field defaults
/// (empty string, `None`, `0`) rather than aborting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Number of the listing page this product was discovered on. `None`
    /// when the listing carried no parseable pagination indicator.
    pub page_number: Option<u32>,
    /// Product title. Empty when the page has no heading.
    pub title: String,
    /// Price with the currency symbol stripped, e.g. `£51.77` → `51.77`.
    /// `None` when the price element is absent or unparseable.
    ///
    /// Boundary note: this is a scrape-time `f64` convenience type; any
    /// downstream store requiring exact decimals converts at write time.
    pub price: Option<f64>,
    pub stock_status: StockStatus,
    /// Units in stock. `0` when unavailable or when the availability text
    /// carries no count.
    pub stock_quantity: u32,
    /// Product UPC from the specification table. Empty when absent.
    pub upc: String,
    /// Category from the breadcrumb trail. Empty when absent.
    pub category: String,
    /// Product description. Empty when absent.
    pub description: String,
}

impl ProductRecord {
    /// Returns `true` if the product was marked in stock.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.stock_status == StockStatus::Available
    }

    /// Returns `true` if a positive stock count was parsed. Implies
    /// [`Self::is_available`]: the count is only searched for on pages
    /// whose availability text says in stock.
    #[must_use]
    pub fn has_counted_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}
