//! Bulk readers.
//!
//! Readers turn an input stream into a lazy, single-pass sequence of encoded
//! `PutItem` request bodies:
//! - [`JsonLineReader`]: one JSON document per line, sent verbatim
//! - [`CsvItemReader`]: header plus rows, repacked into `{"Key", "Item"}` documents

mod csv;
mod json;

use std::io::BufRead;

pub use self::csv::CsvItemReader;
pub use self::json::JsonLineReader;

use crate::config::InputFormat;
use crate::error_handling::{ConfigError, IngestError, ReadError};

/// A single-pass source of encoded records.
pub trait ItemReader {
    /// Returns the next encoded record, or `None` once the input is exhausted.
    ///
    /// After `None` has been returned every later call returns `None` too.
    fn read(&mut self) -> Result<Option<Vec<u8>>, ReadError>;
}

impl<T: ItemReader + ?Sized> ItemReader for Box<T> {
    fn read(&mut self) -> Result<Option<Vec<u8>>, ReadError> {
        (**self).read()
    }
}

/// Builds the reader for `format` over `input`.
///
/// CSV input requires a non-empty `key`; this is checked before the header is read.
///
/// # Errors
///
/// Returns `ConfigError::MissingKey` for CSV without a key, or a `ReadError`
/// if the CSV header cannot be read.
pub fn build_reader<R>(
    format: InputFormat,
    key: Option<&str>,
    input: R,
) -> Result<Box<dyn ItemReader + Send>, IngestError>
where
    R: BufRead + Send + 'static,
{
    match format {
        InputFormat::Json => Ok(Box::new(JsonLineReader::new(input))),
        InputFormat::Csv => {
            let key = key
                .filter(|k| !k.is_empty())
                .ok_or(ConfigError::MissingKey)?;
            Ok(Box::new(CsvItemReader::new(input, key)?))
        }
    }
}
