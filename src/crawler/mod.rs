//! Crawler module for page fetching and quote collection
//!
//! This module contains the scraping pipeline:
//! - HTTP fetching
//! - HTML parsing and selector queries
//! - Quote extraction from each quote block
//! - Pagination across the numbered listing pages

mod extract;
mod fetcher;
mod paginator;
mod parser;

pub use extract::{extract_quote, MissingFieldError};
pub use fetcher::{build_http_client, HttpFetcher, PageSource};
pub use paginator::{next_state, CrawlState, NextLink, Paginator, ScrapedPage};
pub use parser::{compile_selector, Document, Fragment, Selectors};

use crate::config::Config;
use crate::output::write_quotes;
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Walk every listing page and collect the quotes
/// 3. Write all quotes to the configured CSV file
///
/// The output file is only touched after every page has been collected, so
/// a failed run leaves any previous file in place.
///
/// # Arguments
///
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(usize)` - Number of quotes written
/// * `Err(HarvestError)` - The first error encountered
pub async fn harvest(config: &Config) -> Result<usize, HarvestError> {
    let fetcher = HttpFetcher::new(&config.http)?;
    let paginator = Paginator::new(fetcher, &config.site, &config.selectors)?;

    let quotes = paginator.collect_all().await?;
    write_quotes(&quotes, &config.output.csv_path)?;

    tracing::info!(
        "Wrote {} quotes to {}",
        quotes.len(),
        config.output.csv_path.display()
    );

    Ok(quotes.len())
}
