//! CSV output of collected quotes
//!
//! Files are written to a temporary file next to the target and renamed over
//! it once complete, so a failed write never leaves a half-written CSV behind.
//! The replacement keeps the mode of the file it replaces; a new file gets the
//! same mode a plain `File::create` would.

use crate::output::tags::{decode_tags, encode_tags};
use crate::output::{OutputError, OutputResult};
use crate::record::{Quote, QUOTE_FIELDS};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// Writes quotes to `path` with a `text,author,tags` header
///
/// Any existing file is replaced only after the new content has been fully
/// written and synced.
///
/// # Arguments
///
/// * `quotes` - Quotes in output order
/// * `path` - Destination CSV file
///
/// # Returns
///
/// * `Ok(())` - The file now holds exactly the header and one row per quote
/// * `Err(OutputError)` - Nothing was changed at `path`
pub fn write_quotes(quotes: &[Quote], path: &Path) -> OutputResult<()> {
    let io_error = |source: std::io::Error| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_error = |source: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = create_temp_file(dir, path).map_err(io_error)?;
    tracing::debug!(
        "Writing {} quotes to temporary file {}",
        quotes.len(),
        temp.path().display()
    );

    {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(temp.as_file());

        writer.write_record(QUOTE_FIELDS).map_err(csv_error)?;

        for quote in quotes {
            let tags = encode_tags(&quote.tags)?;
            writer
                .write_record([quote.text.as_str(), quote.author.as_str(), tags.as_str()])
                .map_err(csv_error)?;
        }

        writer.flush().map_err(io_error)?;
    }

    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|e| io_error(e.error))?;

    Ok(())
}

/// Creates the temporary file that will replace `target`
fn create_temp_file(dir: &Path, target: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".quotes-").suffix(".csv.tmp");

    // tempfile defaults to 0600; 0666 lets the umask decide, as File::create does
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let temp = builder.tempfile_in(dir)?;

    match fs::metadata(target) {
        Ok(existing) => temp.as_file().set_permissions(existing.permissions())?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    Ok(temp)
}

/// Reads a file produced by `write_quotes` back into quotes
pub fn read_quotes(path: &Path) -> OutputResult<Vec<Quote>> {
    let csv_error = |source: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?;
    if headers.iter().ne(QUOTE_FIELDS) {
        return Err(malformed(
            path,
            1,
            format!("expected header {:?}, got {:?}", QUOTE_FIELDS, headers),
        ));
    }

    let mut quotes = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let (Some(text), Some(author), Some(tags)) = (record.get(0), record.get(1), record.get(2))
        else {
            return Err(malformed(path, line, format!("expected 3 fields, got {}", record.len())));
        };

        quotes.push(Quote {
            text: text.to_string(),
            author: author.to_string(),
            tags: decode_tags(tags)?,
        });
    }

    Ok(quotes)
}

fn malformed(path: &Path, line: u64, reason: String) -> OutputError {
    OutputError::Malformed {
        path: PathBuf::from(path),
        line,
        reason,
    }
}
