//! Crawl command handler.
//!
//! Records are written as they arrive, one JSON object per line, to stdout
//! or the `--output` file. Per-detail-page failures are handled inside the
//! crawler (logged and skipped); only listing-chain failures surface here.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use bookdex_core::AppConfig;
use bookdex_scraper::{CatalogClient, CrawlOptions, Crawler};

pub(crate) async fn run_crawl(
    config: &AppConfig,
    seed: Option<String>,
    max_pages: Option<usize>,
    output: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut options = CrawlOptions::from(config);
    if let Some(seed) = seed {
        options.seed_url = seed;
    }
    if let Some(max) = max_pages {
        options.max_listing_pages = Some(max);
    }

    if dry_run {
        let cap = options
            .max_listing_pages
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string());
        println!(
            "dry-run: would crawl {} (listing page cap: {cap}, {} detail fetches in flight)",
            options.seed_url, options.max_concurrent_details
        );
        return Ok(());
    }

    let client = CatalogClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
    let crawler =
        Crawler::new(client).map_err(|e| anyhow::anyhow!("failed to build crawler: {e}"))?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("failed to create output file {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    // The sink closure cannot return an error; remember the first write
    // failure and report it after the crawl winds down.
    let mut write_error: Option<io::Error> = None;
    let summary = crawler
        .crawl(&options, |record| {
            if write_error.is_some() {
                return;
            }
            if let Err(e) = write_record(&mut writer, &record) {
                write_error = Some(e);
            }
        })
        .await?;

    if let Some(e) = write_error {
        return Err(e).context("failed to write records");
    }
    writer.flush().context("failed to flush records")?;

    tracing::info!(
        listing_pages = summary.listing_pages,
        records = summary.records,
        skipped_details = summary.skipped_details,
        "crawl complete"
    );
    Ok(())
}

/// Writes one record as a single JSON line.
fn write_record<W: Write>(writer: &mut W, record: &bookdex_core::ProductRecord) -> io::Result<()> {
    let line = serde_json::to_string(record).map_err(io::Error::other)?;
    writeln!(writer, "{line}")
}

#[cfg(test)]
mod tests {
    use bookdex_core::{ProductRecord, StockStatus};

    use super::*;

    #[test]
    fn records_are_written_one_json_object_per_line() {
        let record = ProductRecord {
            page_number: Some(1),
            title: "Alpha".to_string(),
            price: Some(51.77),
            stock_status: StockStatus::Available,
            stock_quantity: 22,
            upc: "upc-a".to_string(),
            category: "Fiction".to_string(),
            description: "About Alpha.".to_string(),
        };

        let mut buf = Vec::new();
        write_record(&mut buf, &record).expect("write to a Vec cannot fail");
        write_record(&mut buf, &record).expect("write to a Vec cannot fail");

        let text = String::from_utf8(buf).expect("output is UTF-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value =
                serde_json::from_str(line).expect("each line is standalone JSON");
            assert_eq!(value["title"], "Alpha");
            assert_eq!(value["stock_status"], "available");
            assert_eq!(value["price"], serde_json::json!(51.77));
        }
    }
}
