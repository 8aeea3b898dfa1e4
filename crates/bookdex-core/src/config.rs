use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable cannot be parsed. No variable is
/// required: every setting has a default.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // Absent means unlimited; a set-but-unparseable value is still an error.
    let max_listing_pages = match lookup("BOOKDEX_MAX_LISTING_PAGES") {
        Ok(raw) => Some(raw.parse::<usize>().map_err(|e| {
            ConfigError::InvalidEnvVar {
                var: "BOOKDEX_MAX_LISTING_PAGES".to_string(),
                reason: e.to_string(),
            }
        })?),
        Err(_) => None,
    };

    let seed_url = or_default(
        "BOOKDEX_SEED_URL",
        "https://books.toscrape.com/index.html",
    );
    let log_level = or_default("BOOKDEX_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("BOOKDEX_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BOOKDEX_USER_AGENT", "bookdex/0.1 (catalog-crawler)");
    let max_retries = parse_u32("BOOKDEX_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("BOOKDEX_RETRY_BACKOFF_BASE_SECS", "5")?;
    let inter_page_delay_ms = parse_u64("BOOKDEX_INTER_PAGE_DELAY_MS", "250")?;
    let max_concurrent_details = parse_usize("BOOKDEX_MAX_CONCURRENT_DETAILS", "4")?;

    Ok(AppConfig {
        seed_url,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        inter_page_delay_ms,
        max_concurrent_details,
        max_listing_pages,
    })
}
