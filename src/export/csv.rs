//! CSV writer.
//!
//! The header is derived from the first record written: attribute names in
//! lexicographic order, with the reserved item-name attribute moved to the front.
//! Later records are rendered against that header; missing attributes become
//! empty cells and attributes outside the header are dropped.

use std::io::Write;

use ::csv::Writer;

use super::ItemWriter;
use crate::config::ITEM_NAME_ATTRIBUTE;
use crate::error_handling::WriteError;
use crate::record::Record;

/// Renders records as CSV rows.
pub struct CsvItemWriter<W: Write> {
    under: Writer<W>,
    header: Option<Vec<String>>,
}

impl<W: Write> CsvItemWriter<W> {
    /// Wraps an output sink.
    pub fn new(out: W) -> Self {
        Self {
            under: Writer::from_writer(out),
            header: None,
        }
    }

    /// Column order fixed by the first record, if any was written.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> Result<W, WriteError> {
        self.under
            .into_inner()
            .map_err(|e| WriteError::Io(e.into_error()))
    }
}

/// Computes the CSV column order for a record.
pub fn column_order(record: &Record) -> Vec<String> {
    let mut names: Vec<String> = record.names().map(str::to_string).collect();
    if let Some(pos) = names.iter().position(|n| n == ITEM_NAME_ATTRIBUTE) {
        let name = names.remove(pos);
        names.insert(0, name);
    }
    names
}

impl<W: Write> ItemWriter for CsvItemWriter<W> {
    fn write(&mut self, record: &Record) -> Result<(), WriteError> {
        if self.header.is_none() {
            let header = column_order(record);
            self.under.write_record(&header)?;
            self.header = Some(header);
        }
        let header = self.header.as_deref().unwrap_or_default();
        let row = header
            .iter()
            .map(|name| record.get(name).map(|v| v.as_str()).unwrap_or(""));
        self.under.write_record(row)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        self.under.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AttributeValue;

    fn record(pairs: &[(&str, AttributeValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn s(v: &str) -> AttributeValue {
        AttributeValue::String(v.into())
    }

    fn n(v: &str) -> AttributeValue {
        AttributeValue::Number(v.into())
    }

    fn render(records: &[Record]) -> String {
        let mut writer = CsvItemWriter::new(Vec::new());
        for r in records {
            writer.write(r).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_header_sorted_with_name_first() {
        let r = record(&[("zeta", s("z")), ("__name", s("k1")), ("Age", n("1"))]);
        assert_eq!(column_order(&r), ["__name", "Age", "zeta"]);
        assert_eq!(render(&[r]), "__name,Age,zeta\nk1,1,z\n");
    }

    #[test]
    fn test_header_fixed_by_first_record() {
        let first = record(&[("a", s("1")), ("b", s("2"))]);
        let second = record(&[("b", s("3")), ("c", s("4"))]);
        assert_eq!(render(&[first, second]), "a,b\n1,2\n,3\n");
    }

    #[test]
    fn test_values_quoted_when_needed() {
        let r = record(&[("note", s("a,b"))]);
        assert_eq!(render(&[r]), "note\n\"a,b\"\n");
    }

    #[test]
    fn test_header_is_none_before_first_write() {
        let writer = CsvItemWriter::new(Vec::new());
        assert!(writer.header().is_none());
    }

    #[test]
    fn test_tabular_encoding_loses_types() {
        // A typed record written as CSV and read back comes back all strings.
        use crate::reader::{CsvItemReader, ItemReader};
        use crate::record::PutItemDocument;

        let original = record(&[("__name", s("k")), ("age", n("30"))]);
        let csv_text = render(&[original.clone()]);
        let mut reader = CsvItemReader::new(std::io::Cursor::new(csv_text), "__name").unwrap();
        let doc: PutItemDocument =
            serde_json::from_slice(&reader.read().unwrap().unwrap()).unwrap();

        assert_eq!(doc.item.get("age"), Some(&s("30")));
        assert_ne!(doc.item.get("age"), original.get("age"));
    }
}
