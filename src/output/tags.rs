//! Encoding of a tag list into a single CSV cell
//!
//! The tags are written as one nested CSV record using `;` as the delimiter,
//! so a tag containing `;`, `"` or a line break is quoted by the usual CSV
//! rules and splits back unambiguously. The outer CSV writer then quotes the
//! whole cell as needed.
//!
//! | Tags                 | Cell          |
//! |----------------------|---------------|
//! | `[]`                 | (empty)       |
//! | `[""]`               | `""`          |
//! | `["love", "life"]`   | `love;life`   |
//! | `["a;b", "c"]`       | `"a;b";c`     |

use crate::output::{OutputError, OutputResult};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

/// Separator between tags inside the tags cell
pub const TAG_DELIMITER: u8 = b';';

/// Encodes a tag list as a single cell value
pub fn encode_tags(tags: &[String]) -> OutputResult<String> {
    // csv-core writes `""` for a record with no bytes, which would read back as one empty tag
    if tags.is_empty() {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .delimiter(TAG_DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(tags).map_err(tag_error)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::TagCell(e.to_string()))?;
    let mut cell = String::from_utf8(bytes).map_err(|e| OutputError::TagCell(e.to_string()))?;

    if cell.ends_with('\n') {
        cell.pop();
    }

    Ok(cell)
}

/// Decodes a cell produced by `encode_tags`
pub fn decode_tags(cell: &str) -> OutputResult<Vec<String>> {
    if cell.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(TAG_DELIMITER)
        .from_reader(cell.as_bytes());

    let mut record = StringRecord::new();
    if !reader.read_record(&mut record).map_err(tag_error)? {
        return Ok(Vec::new());
    }

    let mut trailing = StringRecord::new();
    if reader.read_record(&mut trailing).map_err(tag_error)? {
        return Err(OutputError::TagCell(format!(
            "unquoted line break in tags cell {:?}",
            cell
        )));
    }

    Ok(record.iter().map(String::from).collect())
}

fn tag_error(e: csv::Error) -> OutputError {
    OutputError::TagCell(e.to_string())
}
