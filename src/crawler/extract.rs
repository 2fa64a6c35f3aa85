//! Quote extraction from a single quote block

use crate::crawler::parser::{Fragment, Selectors};
use crate::record::Quote;
use thiserror::Error;

/// A quote block lacked a required sub-element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing required `{field}` element")]
pub struct MissingFieldError {
    /// Name of the missing field (`text` or `author`)
    pub field: &'static str,
}

/// Builds a `Quote` from one quote block
///
/// Text and author are required; a missing element means the page no longer
/// has the expected shape and is reported as `MissingFieldError`. Tags are
/// optional and collected in document order.
pub fn extract_quote(
    fragment: &Fragment<'_>,
    selectors: &Selectors,
) -> Result<Quote, MissingFieldError> {
    let text = fragment
        .select_one(&selectors.text)
        .ok_or(MissingFieldError { field: "text" })?
        .text();

    let author = fragment
        .select_one(&selectors.author)
        .ok_or(MissingFieldError { field: "author" })?
        .text();

    let tags = fragment
        .select_all(&selectors.tag)
        .iter()
        .map(Fragment::text)
        .collect();

    Ok(Quote { text, author, tags })
}
