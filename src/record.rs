//! Record model for a single scraped quote

/// Column order used for every CSV file this crate writes or reads
pub const QUOTE_FIELDS: [&str; 3] = ["text", "author", "tags"];

/// One quote block as it appeared on a listing page
///
/// `text` and `author` hold the raw inner text of their elements, without
/// trimming. `tags` keeps document order and may contain duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl Quote {
    /// Creates a new quote record
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }
}
