/// Runtime configuration for a crawl, loaded from `BOOKDEX_*` environment
/// variables by [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL of the first listing page.
    pub seed_url: String,
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
    /// Total per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Additional attempts after the first failure for transient errors.
    pub max_retries: u32,
    /// Base delay in seconds for exponential retry backoff.
    pub retry_backoff_base_secs: u64,
    /// Delay in milliseconds between consecutive listing-page fetches.
    pub inter_page_delay_ms: u64,
    /// How many detail pages may be in flight at once per listing page.
    pub max_concurrent_details: usize,
    /// Continuation guard: stop following next-page links after this many
    /// listing pages. `None` means follow the chain to its end.
    pub max_listing_pages: Option<usize>,
}
