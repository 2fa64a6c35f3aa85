//! Output module for writing harvested quotes
//!
//! This module handles:
//! - Writing quotes to CSV with a fixed `text,author,tags` header
//! - Encoding each tag list into a single cell
//! - Reading produced files back

mod csv_writer;
mod tags;

pub use csv_writer::{read_quotes, write_quotes};
pub use tags::{decode_tags, encode_tags, TAG_DELIMITER};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error on {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Malformed CSV in {} at line {line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Invalid tags cell: {0}")]
    TagCell(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
