//! CSV reader.

use std::io::Read;

use ::csv::{Reader, ReaderBuilder, StringRecord};

use super::ItemReader;
use crate::error_handling::ReadError;
use crate::record::{AttributeValue, PutItemDocument};

/// Reads CSV rows and repacks each one as a `PutItem` document.
///
/// Every cell becomes a string attribute. The configured key column goes under
/// `Key`, all other columns under `Item`. Rows shorter than the header pair only
/// the cells they have; extra cells beyond the header are ignored.
pub struct CsvItemReader<R> {
    under: Reader<R>,
    header: Vec<String>,
    key: String,
    row: StringRecord,
}

impl<R: Read> CsvItemReader<R> {
    /// Reads the header line and prepares the reader.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::Header` if the header line cannot be parsed, or
    /// `ReadError::MissingHeader` if the input is empty.
    pub fn new(input: R, key: &str) -> Result<Self, ReadError> {
        let mut under = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut header_row = StringRecord::new();
        if !under
            .read_record(&mut header_row)
            .map_err(ReadError::Header)?
        {
            return Err(ReadError::MissingHeader);
        }

        Ok(Self {
            under,
            header: header_row.iter().map(str::to_string).collect(),
            key: key.to_string(),
            row: StringRecord::new(),
        })
    }

    fn to_document(&self) -> PutItemDocument {
        let mut document = PutItemDocument::default();
        // zip stops at the shorter of header and row
        for (name, cell) in self.header.iter().zip(self.row.iter()) {
            let value = AttributeValue::String(cell.to_string());
            if *name == self.key {
                document.key.insert(name.clone(), value);
            } else {
                document.item.insert(name.clone(), value);
            }
        }
        document
    }
}

impl<R: Read> ItemReader for CsvItemReader<R> {
    fn read(&mut self) -> Result<Option<Vec<u8>>, ReadError> {
        if !self.under.read_record(&mut self.row)? {
            return Ok(None);
        }
        let document = self.to_document();
        serde_json::to_vec(&document)
            .map(Some)
            .map_err(ReadError::Encode)
    }
}
