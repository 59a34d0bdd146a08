//! Closed-pipe detection for output sinks.
//!
//! A reader that closes stdout early (`getitems | head`) makes the next write
//! fail with `BrokenPipe`. The failure propagates like any other write error so
//! the scan stops; the binary then treats it as a normal end of output.

use std::io::ErrorKind;

use crate::error_handling::WriteError;

/// True if `err` was caused by the downstream end of the pipe closing.
pub fn is_broken_pipe(err: &WriteError) -> bool {
    match err {
        WriteError::Io(e) => e.kind() == ErrorKind::BrokenPipe,
        WriteError::Csv(e) => match e.kind() {
            ::csv::ErrorKind::Io(e) => e.kind() == ErrorKind::BrokenPipe,
            _ => false,
        },
        WriteError::Json(e) => e.io_error_kind() == Some(ErrorKind::BrokenPipe),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_broken_pipe_detected() {
        let err = WriteError::Io(io::Error::new(ErrorKind::BrokenPipe, "closed"));
        assert!(is_broken_pipe(&err));
    }

    #[test]
    fn test_csv_broken_pipe_detected() {
        let err = WriteError::Csv(::csv::Error::from(io::Error::new(
            ErrorKind::BrokenPipe,
            "closed",
        )));
        assert!(is_broken_pipe(&err));
    }

    #[test]
    fn test_other_errors_not_broken_pipe() {
        let err = WriteError::Io(io::Error::new(ErrorKind::PermissionDenied, "nope"));
        assert!(!is_broken_pipe(&err));
    }
}
