//! Pagination driver - walks the numbered listing pages
//!
//! Pages are requested strictly one after another:
//! 1. Build the page URL from the base URL and the page path template
//! 2. Fetch and parse it
//! 3. Extract every quote block in document order
//! 4. Continue with the next index while the page shows a next-page link
//!
//! The first error of any kind aborts the walk; no partial result is returned.

use crate::config::{SelectorConfig, SiteConfig, PAGE_PLACEHOLDER};
use crate::crawler::extract::extract_quote;
use crate::crawler::fetcher::PageSource;
use crate::crawler::parser::{Document, Selectors};
use crate::record::Quote;
use crate::HarvestError;
use url::Url;

/// Position of the pagination walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// The given 1-based page is the next to fetch
    Fetching { page: u32 },
    /// The last page has been processed
    Done,
}

/// What one listing page yielded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    /// Quotes in document order
    pub quotes: Vec<Quote>,
    /// The next-page link, if the page has one
    pub next: Option<NextLink>,
}

impl ScrapedPage {
    /// Returns true if another page follows this one
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A next-page link; only its presence drives pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextLink {
    /// The anchor's `href`, absent on a bare `<a>`
    pub href: Option<String>,
}

/// Returns the state following `page`
///
/// Fails with `Pagination` if the page index cannot be advanced.
pub fn next_state(page: u32, url: &Url, has_next: bool) -> Result<CrawlState, HarvestError> {
    if !has_next {
        return Ok(CrawlState::Done);
    }

    page.checked_add(1)
        .map(|next| CrawlState::Fetching { page: next })
        .ok_or_else(|| HarvestError::Pagination {
            url: url.to_string(),
            page,
        })
}

/// Collects quotes across all listing pages
pub struct Paginator<S> {
    source: S,
    base_url: Url,
    page_path: String,
    selectors: Selectors,
}

impl<S: PageSource> Paginator<S> {
    /// Creates a paginator reading pages from `source`
    ///
    /// # Returns
    ///
    /// * `Ok(Paginator)` - Base URL parsed and selectors compiled
    /// * `Err(HarvestError)` - Invalid base URL or selector
    pub fn new(
        source: S,
        site: &SiteConfig,
        selectors: &SelectorConfig,
    ) -> Result<Self, HarvestError> {
        Ok(Self {
            source,
            base_url: Url::parse(&site.base_url)?,
            page_path: site.page_path.clone(),
            selectors: Selectors::compile(selectors)?,
        })
    }

    /// Returns the page source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Builds the URL of a 1-based page index
    pub fn page_url(&self, page: u32) -> Result<Url, HarvestError> {
        let path = self.page_path.replace(PAGE_PLACEHOLDER, &page.to_string());
        Ok(self.base_url.join(&path)?)
    }

    /// Fetches every page until one has no next-page link
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Quote>)` - All quotes, in page-then-document order
    /// * `Err(HarvestError)` - The first fetch, extraction, or pagination error
    pub async fn collect_all(&self) -> Result<Vec<Quote>, HarvestError> {
        let mut quotes = Vec::new();
        let mut previous: Option<Url> = None;
        let mut state = CrawlState::Fetching { page: 1 };

        while let CrawlState::Fetching { page } = state {
            let url = self.page_url(page)?;

            if previous.as_ref() == Some(&url) {
                return Err(HarvestError::Pagination {
                    url: url.to_string(),
                    page,
                });
            }

            let body = self.source.fetch(&url).await?;
            let scraped = self.scrape_page(&url, &body)?;

            tracing::info!(
                "Page {} ({}): {} quotes, {} total",
                page,
                url,
                scraped.quotes.len(),
                quotes.len() + scraped.quotes.len()
            );

            if let Some(link) = &scraped.next {
                tracing::debug!(
                    "Next-page link on page {}: {}",
                    page,
                    link.href.as_deref().unwrap_or("(no href)")
                );
            }
            state = next_state(page, &url, scraped.has_next())?;

            quotes.extend(scraped.quotes);
            previous = Some(url);
        }

        Ok(quotes)
    }

    /// Parses one page body and extracts its quotes and next-page link
    pub fn scrape_page(&self, url: &Url, body: &str) -> Result<ScrapedPage, HarvestError> {
        let document = Document::parse(body);

        let quotes = document
            .select_all(&self.selectors.quote)
            .iter()
            .enumerate()
            .map(|(i, block)| {
                extract_quote(block, &self.selectors).map_err(|source| {
                    HarvestError::MissingField {
                        url: url.to_string(),
                        index: i + 1,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let next = document
            .select_one(&self.selectors.next_page)
            .map(|link| NextLink {
                href: link.attr("href").map(str::to_string),
            });

        Ok(ScrapedPage { quotes, next })
    }
}
