//! Bulk writers for records returned by a scan.
//!
//! This module renders records to an output sink:
//! - [`JsonItemWriter`]: one flat JSON object per line, numbers unwrapped
//! - [`CsvItemWriter`]: header plus rows, column order fixed by the first record

mod csv;
mod jsonl;
mod pipe;

use std::io::Write;

pub use self::csv::{column_order, CsvItemWriter};
pub use self::jsonl::{render_json_line, JsonItemWriter};
pub use self::pipe::is_broken_pipe;

use crate::config::OutputFormat;
use crate::error_handling::WriteError;
use crate::record::Record;

/// A sink for records.
pub trait ItemWriter {
    /// Renders one record.
    fn write(&mut self, record: &Record) -> Result<(), WriteError>;

    /// Flushes buffered output to the underlying sink.
    fn flush(&mut self) -> Result<(), WriteError>;
}

impl<T: ItemWriter + ?Sized> ItemWriter for Box<T> {
    fn write(&mut self, record: &Record) -> Result<(), WriteError> {
        (**self).write(record)
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        (**self).flush()
    }
}

/// Builds the writer for `format` over `out`.
pub fn build_writer<W>(format: OutputFormat, out: W) -> Box<dyn ItemWriter + Send>
where
    W: Write + Send + 'static,
{
    match format {
        OutputFormat::Json => Box::new(JsonItemWriter::new(out)),
        OutputFormat::Csv => Box::new(CsvItemWriter::new(out)),
    }
}
