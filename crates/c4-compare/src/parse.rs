//! Search-log stream parsing.
//!
//! A log is read strictly sequentially: everything before the
//! `***START***` marker is prolog and discarded, then each line is either
//! a `key: value` record, a cache-bookkeeping record (value `CACHE`,
//! skipped silently), or the `***FINISH***` terminator. Physical
//! end-of-file before a marker is a definite parse error, never a spin.

use std::io::BufRead;

use thiserror::Error;

use crate::record::{CACHE_SENTINEL, DELIMITER, Entry, FINISH_MARKER, Record, START_MARKER};

/// Errors raised while reading one log stream.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record line with no `": "` delimiter. The message mirrors the
    /// historical tool's diagnostic.
    #[error("Not len 2 [{0:?}]")]
    MalformedRecord(String),

    #[error("log ended before the ***START*** marker")]
    MissingStartMarker,

    #[error("log ended before the ***FINISH*** marker")]
    MissingFinishMarker,
}

/// Sequential parser over one search log.
pub struct LogParser<R> {
    reader: R,
}

impl<R: BufRead> LogParser<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one line, stripping the trailing line terminator.
    ///
    /// Returns `None` at physical end-of-file.
    fn next_line(&mut self) -> Result<Option<String>, ParseError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Discard everything up to and including the `***START***` marker.
    pub fn skip_prolog(&mut self) -> Result<(), ParseError> {
        loop {
            match self.next_line()? {
                Some(line) if line == START_MARKER => return Ok(()),
                Some(_) => continue,
                None => return Err(ParseError::MissingStartMarker),
            }
        }
    }

    /// Produce the next meaningful entry.
    ///
    /// Cache-sentinel records are consumed here and never surface to the
    /// caller. A line that does not split into exactly two parts on the
    /// first `": "` is a malformed log, not a comparison mismatch.
    pub fn next_entry(&mut self) -> Result<Entry, ParseError> {
        loop {
            let line = self
                .next_line()?
                .ok_or(ParseError::MissingFinishMarker)?;
            if line == FINISH_MARKER {
                return Ok(Entry::Finished);
            }
            let Some((key, value)) = line.split_once(DELIMITER) else {
                return Err(ParseError::MalformedRecord(line));
            };
            if value == CACHE_SENTINEL {
                continue;
            }
            return Ok(Entry::Record(Record {
                key: key.to_string(),
                value: value.to_string(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(text: &str) -> LogParser<&[u8]> {
        LogParser::new(text.as_bytes())
    }

    #[test]
    fn test_skip_prolog_discards_leading_lines() {
        let mut p = parser("noise\nmore noise\n***START***\na: 1\n");
        p.skip_prolog().unwrap();
        assert_eq!(
            p.next_entry().unwrap(),
            Entry::Record(Record { key: "a".into(), value: "1".into() })
        );
    }

    #[test]
    fn test_skip_prolog_missing_marker_is_error() {
        let mut p = parser("noise\nmore noise\n");
        assert!(matches!(
            p.skip_prolog(),
            Err(ParseError::MissingStartMarker)
        ));
    }

    #[test]
    fn test_finish_marker_ends_stream() {
        let mut p = parser("***FINISH***\n");
        assert_eq!(p.next_entry().unwrap(), Entry::Finished);
    }

    #[test]
    fn test_cache_records_are_invisible() {
        let mut p = parser("a: CACHE\nb: CACHE\nc: 2\n***FINISH***\n");
        assert_eq!(
            p.next_entry().unwrap(),
            Entry::Record(Record { key: "c".into(), value: "2".into() })
        );
        assert_eq!(p.next_entry().unwrap(), Entry::Finished);
    }

    #[test]
    fn test_value_may_contain_delimiter() {
        let mut p = parser("move 3: eval: 42\n***FINISH***\n");
        assert_eq!(
            p.next_entry().unwrap(),
            Entry::Record(Record { key: "move 3".into(), value: "eval: 42".into() })
        );
    }

    #[test]
    fn test_malformed_record_is_fatal() {
        let mut p = parser("no delimiter here\n***FINISH***\n");
        let err = p.next_entry().unwrap_err();
        assert!(matches!(&err, ParseError::MalformedRecord(l) if l == "no delimiter here"));
        assert_eq!(err.to_string(), "Not len 2 [\"no delimiter here\"]");
    }

    #[test]
    fn test_eof_before_finish_marker_is_error() {
        let mut p = parser("a: 1\n");
        p.next_entry().unwrap();
        assert!(matches!(
            p.next_entry(),
            Err(ParseError::MissingFinishMarker)
        ));
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut p = parser("a: 1\n***FINISH***");
        assert_eq!(
            p.next_entry().unwrap(),
            Entry::Record(Record { key: "a".into(), value: "1".into() })
        );
        assert_eq!(p.next_entry().unwrap(), Entry::Finished);
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut p = parser("a: 1\r\n***FINISH***\r\n");
        assert_eq!(
            p.next_entry().unwrap(),
            Entry::Record(Record { key: "a".into(), value: "1".into() })
        );
        assert_eq!(p.next_entry().unwrap(), Entry::Finished);
    }
}
