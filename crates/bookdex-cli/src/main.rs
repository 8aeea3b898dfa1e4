mod crawl;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookdex")]
#[command(about = "Paginated catalog crawler emitting NDJSON product records")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the catalog and emit one JSON record per product.
    Crawl {
        /// Listing page to start from (overrides BOOKDEX_SEED_URL).
        #[arg(long)]
        seed: Option<String>,
        /// Stop after this many listing pages (overrides
        /// BOOKDEX_MAX_LISTING_PAGES).
        #[arg(long)]
        max_pages: Option<usize>,
        /// Write records to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the effective crawl plan without fetching anything.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bookdex_core::load_app_config_from_env()?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Crawl {
            seed,
            max_pages,
            output,
            dry_run,
        }) => crawl::run_crawl(&config, seed, max_pages, output.as_deref(), dry_run).await,
        None => {
            println!("bookdex: no command given (try `bookdex crawl`)");
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
