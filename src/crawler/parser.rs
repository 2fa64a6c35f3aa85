//! HTML parsing and selector queries
//!
//! This module wraps `scraper` behind a small query surface:
//! - `Document::select_all` for repeated blocks
//! - `Fragment::select_one` and `Fragment::select_all` inside a block
//! - `Fragment::text` for raw inner text
//!
//! Parsing never fails; malformed markup produces whatever tree html5ever
//! recovers, and selector misses come back as `None` or an empty list.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for the listing markup
#[derive(Debug, Clone)]
pub struct Selectors {
    pub quote: Selector,
    pub text: Selector,
    pub author: Selector,
    pub tag: Selector,
    pub next_page: Selector,
}

impl Selectors {
    /// Compiles every selector in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Selectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            quote: compile_selector(&config.quote)?,
            text: compile_selector(&config.text)?,
            author: compile_selector(&config.author)?,
            tag: compile_selector(&config.tag)?,
            next_page: compile_selector(&config.next_page)?,
        })
    }
}

/// Compiles a single CSS selector
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// A parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML document
    ///
    /// # Example
    ///
    /// ```
    /// use quote_harvest::crawler::{compile_selector, Document};
    ///
    /// let doc = Document::parse(r#"<div class="quote"><span class="text">Hi</span></div>"#);
    /// let quote = compile_selector(".quote").unwrap();
    /// assert_eq!(doc.select_all(&quote).len(), 1);
    /// ```
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns every element matching `selector`, in document order
    pub fn select_all<'a>(&'a self, selector: &Selector) -> Vec<Fragment<'a>> {
        self.html.select(selector).map(Fragment::new).collect()
    }

    /// Returns the first element matching `selector`
    pub fn select_one<'a>(&'a self, selector: &Selector) -> Option<Fragment<'a>> {
        self.html.select(selector).next().map(Fragment::new)
    }
}

/// A subtree of a parsed document
#[derive(Debug, Clone, Copy)]
pub struct Fragment<'a> {
    element: ElementRef<'a>,
}

impl<'a> Fragment<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Returns the first descendant matching `selector`
    pub fn select_one(&self, selector: &Selector) -> Option<Fragment<'a>> {
        self.element.select(selector).next().map(Fragment::new)
    }

    /// Returns every descendant matching `selector`, in document order
    pub fn select_all(&self, selector: &Selector) -> Vec<Fragment<'a>> {
        self.element.select(selector).map(Fragment::new).collect()
    }

    /// Concatenated text of all descendant text nodes, untrimmed
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Returns an attribute value of this element
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }
}
