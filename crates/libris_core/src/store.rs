//! Flat-file persistence for the catalog.
//!
//! # Responsibility
//! - Load the whole catalog from the data file at startup.
//! - Rewrite the whole data file from the catalog at shutdown.
//!
//! # Invariants
//! - A missing data file loads as an empty catalog, not an error.
//! - A malformed line aborts the load with its line number; rows are never
//!   skipped or defaulted, so corruption cannot pass silently.
//! - File handles are scoped to each call; save flushes before returning.

use crate::catalog::Catalog;
use crate::codec::{decode_line, encode_line, CodecError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence error for catalog load/save operations.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    /// A persisted line failed to decode. `line_number` is 1-based.
    Malformed {
        line_number: usize,
        line: String,
        source: CodecError,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Malformed {
                line_number,
                line,
                source,
            } => write!(f, "malformed record on line {line_number} (`{line}`): {source}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Loads the catalog from `path`.
///
/// Reads the file line by line in order, decoding each non-empty line.
/// A missing file yields an empty catalog with the id counter at 1. A
/// decode failure returns `StoreError::Malformed` and no catalog at all;
/// the caller decides whether to abort or continue without loaded state.
///
/// # Side effects
/// - Emits `store_load` logging events with duration and status.
pub fn load_catalog(path: impl AsRef<Path>) -> StoreResult<Catalog> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_load module=store status=start path={}", path.display());

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=store_load module=store status=ok duration_ms={} records=0 mode=fresh",
                started_at.elapsed().as_millis()
            );
            return Ok(Catalog::new());
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error duration_ms={} error_code=open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    let reader = BufReader::new(file);
    let mut books = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match decode_line(&line) {
            Ok(book) => books.push(book),
            Err(source) => {
                let line_number = index + 1;
                error!(
                    "event=store_load module=store status=error duration_ms={} error_code=malformed_record line={}",
                    started_at.elapsed().as_millis(),
                    line_number
                );
                return Err(StoreError::Malformed {
                    line_number,
                    line,
                    source,
                });
            }
        }
    }

    let catalog = Catalog::from_books(books);
    info!(
        "event=store_load module=store status=ok duration_ms={} records={}",
        started_at.elapsed().as_millis(),
        catalog.len()
    );
    Ok(catalog)
}

/// Saves the whole catalog to `path`, truncating any previous contents.
///
/// Writes one encoded line per book in catalog order and flushes before
/// returning. An IO failure is returned to the caller; the in-memory
/// catalog is unaffected and the session can keep running.
///
/// # Side effects
/// - Emits `store_save` logging events with duration and status.
pub fn save_catalog(path: impl AsRef<Path>, catalog: &Catalog) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=store_save module=store status=start path={}", path.display());

    let result = write_all(path, catalog);
    match &result {
        Ok(()) => info!(
            "event=store_save module=store status=ok duration_ms={} records={}",
            started_at.elapsed().as_millis(),
            catalog.len()
        ),
        Err(err) => error!(
            "event=store_save module=store status=error duration_ms={} error_code=write_failed error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn write_all(path: &Path, catalog: &Catalog) -> StoreResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for book in catalog.books() {
        writeln!(writer, "{}", encode_line(book))?;
    }
    writer.flush()?;
    Ok(())
}
