//! JSON-lines reader.

use std::io::BufRead;

use serde_json::{Map, Value};

use super::ItemReader;
use crate::error_handling::ReadError;

/// Reads one JSON document per line.
///
/// Lines are forwarded verbatim (without the line terminator) after checking
/// that they hold a JSON object. Blank lines are skipped.
pub struct JsonLineReader<R> {
    under: R,
    buf: String,
    line: usize,
    eof: bool,
}

impl<R: BufRead> JsonLineReader<R> {
    /// Wraps a buffered input stream.
    pub fn new(under: R) -> Self {
        Self {
            under,
            buf: String::new(),
            line: 0,
            eof: false,
        }
    }
}

impl<R: BufRead> ItemReader for JsonLineReader<R> {
    fn read(&mut self) -> Result<Option<Vec<u8>>, ReadError> {
        loop {
            if self.eof {
                return Ok(None);
            }
            self.buf.clear();
            if self.under.read_line(&mut self.buf)? == 0 {
                self.eof = true;
                return Ok(None);
            }
            self.line += 1;
            // A final line without a terminator ends the stream
            if !self.buf.ends_with('\n') {
                self.eof = true;
            }

            let line = self.buf.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }
            serde_json::from_str::<Map<String, Value>>(line).map_err(|source| {
                ReadError::Decode {
                    line: self.line,
                    source,
                }
            })?;
            return Ok(Some(line.as_bytes().to_vec()));
        }
    }
}
