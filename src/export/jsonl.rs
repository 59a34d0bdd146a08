//! JSONL writer.
//!
//! Each record becomes one flat JSON object per line. Type tags are dropped:
//! string values render as JSON strings and numeric values as bare JSON numbers
//! copied from their stored text, so large integers keep every digit.

use std::io::Write;

use super::ItemWriter;
use crate::error_handling::WriteError;
use crate::record::{AttributeValue, Record};

/// Renders records as JSON lines.
pub struct JsonItemWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonItemWriter<W> {
    /// Wraps an output sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// True if `text` is a JSON number literal that can be emitted verbatim.
///
/// Checked against the grammar `-? int frac? exp?` without converting the
/// value, so literals beyond the range of `f64` still qualify.
fn is_json_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if digits(&mut i) == 0 {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

/// Renders one record as a flat JSON object, without a trailing newline.
///
/// Numbers whose stored text is not a valid JSON number fall back to strings so
/// the line stays valid JSON.
pub fn render_json_line(record: &Record) -> Result<String, serde_json::Error> {
    let mut line = String::from("{");
    for (i, (name, value)) in record.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        line.push_str(&serde_json::to_string(name)?);
        line.push(':');
        match value {
            AttributeValue::Number(text) if is_json_number(text) => line.push_str(text),
            other => line.push_str(&serde_json::to_string(other.as_str())?),
        }
    }
    line.push('}');
    Ok(line)
}

impl<W: Write> ItemWriter for JsonItemWriter<W> {
    fn write(&mut self, record: &Record) -> Result<(), WriteError> {
        let line = render_json_line(record)?;
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), WriteError> {
        self.out.flush()?;
        Ok(())
    }
}
