use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Quote-Harvest
///
/// Every section is optional; missing sections and keys take their defaults,
/// which point at `https://quotes.toscrape.com/` and write `quotes.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Where the listing pages live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base location every page path is joined onto (must end with `/`)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Relative page path template; `{page}` is replaced by the 1-based index
    #[serde(rename = "page-path")]
    pub page_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quotes.toscrape.com/".to_string(),
            page_path: "page/{page}/".to_string(),
        }
    }
}

/// CSS selectors describing the listing markup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One match per quote block on a page
    pub quote: String,

    /// Quote text, searched inside a quote block
    pub text: String,

    /// Author name, searched inside a quote block
    pub author: String,

    /// Tag elements, searched inside a quote block
    pub tag: String,

    /// Next-page link inside the pagination control
    #[serde(rename = "next-page")]
    pub next_page: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            quote: ".quote".to_string(),
            text: ".text".to_string(),
            author: ".author".to_string(),
            tag: ".tags > .tag".to_string(),
            next_page: ".pager > .next > a".to_string(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout in milliseconds; unset keeps the client default
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("quote-harvest/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file, rewritten on every run
    #[serde(rename = "csv-path")]
    pub csv_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("quotes.csv"),
        }
    }
}
