//! Reading reporter output back into structured records.
//!
//! A capture file is simply several reports written one after another, so
//! the same decoder handles a single run of the reporter and a whole
//! recorded suite.

use std::fs::File;
use std::io::{Read, Write};

use log::debug;

use crate::error::{Error, Result};
use crate::report::{write_block, Separator};
use crate::winparse;

/// One decoded report: a raw command line and the arguments printed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub raw: String,
    pub args: Vec<String>,
}

impl Record {
    pub fn new(raw: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            raw: raw.into(),
            args,
        }
    }

    /// Writes the record in the reporter's format.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W, separator: Separator) -> std::io::Result<()> {
        let args = self.args.iter().map(String::as_bytes);
        write_block(out, self.raw.as_bytes(), args, separator)
    }

    /// Checks that splitting the raw line with the Windows rules gives back
    /// exactly the recorded arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mismatch`] naming the first argument that differs. A
    /// missing argument on either side is reported as `None`.
    pub fn verify(&self) -> Result<()> {
        let expected = winparse::split(&self.raw);
        let longest = expected.len().max(self.args.len());

        for index in 0..longest {
            let want = expected.get(index);
            let got = self.args.get(index);
            if want != got {
                return Err(Error::Mismatch {
                    command_line: self.raw.clone(),
                    index,
                    expected: want.cloned(),
                    actual: got.cloned(),
                });
            }
        }

        Ok(())
    }
}

/// Splits a byte buffer into terminated fields, tracking the offset for errors.
struct Fields<'a> {
    bytes: &'a [u8],
    pos: usize,
    terminator: &'static [u8],
}

impl<'a> Fields<'a> {
    fn new(bytes: &'a [u8], separator: Separator) -> Self {
        Self {
            bytes,
            pos: 0,
            terminator: separator.terminator(),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn next_field(&mut self, what: &str) -> Result<&'a [u8]> {
        let rest = &self.bytes[self.pos..];
        let Some(end) = rest
            .windows(self.terminator.len())
            .position(|window| window == self.terminator)
        else {
            return Err(Error::malformed(
                self.pos,
                format!("{what} is not terminated"),
            ));
        };

        self.pos += end + self.terminator.len();
        Ok(&rest[..end])
    }
}

fn text(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

/// Decodes every report in `bytes`.
///
/// Fields are decoded as UTF-8, with invalid sequences replaced.
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] if a count is not a decimal number or
/// the buffer ends in the middle of a report.
///
/// # Examples
///
/// ```
/// use argdump_core::records::decode;
/// use argdump_core::report::Separator;
///
/// let records = decode(b"EXE \"\"\x002\x00EXE\x00\x00", Separator::Null)?;
/// assert_eq!(records[0].args, ["EXE", ""]);
/// # Ok::<(), argdump_core::error::Error>(())
/// ```
pub fn decode(bytes: &[u8], separator: Separator) -> Result<Vec<Record>> {
    let mut fields = Fields::new(bytes, separator);
    let mut records = Vec::new();

    while !fields.is_exhausted() {
        let raw = text(fields.next_field("raw command line")?);

        let count_offset = fields.pos;
        let count_field = fields.next_field("argument count")?;
        let count: usize = std::str::from_utf8(count_field)
            .ok()
            .and_then(|count| count.parse().ok())
            .ok_or_else(|| {
                Error::malformed(
                    count_offset,
                    format!("argument count `{}` is not a number", text(count_field)),
                )
            })?;

        // The count is untrusted until the arguments are actually read.
        let mut args = Vec::with_capacity(count.min(1024));
        for index in 0..count {
            args.push(text(fields.next_field(&format!("argument {index}"))?));
        }

        records.push(Record { raw, args });
    }

    debug!("Decoded {} records from {} bytes", records.len(), bytes.len());
    Ok(records)
}

/// Reads and decodes a capture file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any decoding error.
pub fn read_records(path: &str, separator: Separator) -> Result<Vec<Record>> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut bytes))
        .map_err(|e| Error::io_error("capture".to_string(), path.to_string(), e))?;

    decode(&bytes, separator)
}

/// Writes records to a capture file, replacing its contents.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written.
pub fn write_records(path: &str, records: &[Record], separator: Separator) -> Result<()> {
    let io_error = |e| Error::io_error("capture".to_string(), path.to_string(), e);

    let mut file = File::create(path).map_err(io_error)?;
    for record in records {
        record.write_to(&mut file, separator).map_err(io_error)?;
    }
    file.flush().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: &str, args: &[&str]) -> Record {
        Record::new(raw, args.iter().map(ToString::to_string).collect())
    }

    fn encode(record: &Record, separator: Separator) -> Vec<u8> {
        let mut out = Vec::new();
        record.write_to(&mut out, separator).unwrap();
        out
    }

    #[test]
    fn test_decode_concatenated_reports() {
        let mut bytes = encode(&record("EXE a", &["EXE", "a"]), Separator::Null);
        bytes.extend(encode(&record(r#"EXE "" b"#, &["EXE", "", "b"]), Separator::Null));

        let records = decode(&bytes, Separator::Null).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].args, ["EXE", "", "b"]);
    }

    #[test]
    fn test_decode_keeps_newlines_in_null_mode() {
        let bytes = encode(&record("EXE x", &["EXE", "line one\nline two"]), Separator::Null);
        let records = decode(&bytes, Separator::Null).unwrap();
        assert_eq!(records[0].args[1], "line one\nline two");
    }

    #[test]
    fn test_decode_line_mode() {
        let bytes = encode(&record("EXE a b", &["EXE", "a", "b"]), Separator::Line);
        let records = decode(&bytes, Separator::Line).unwrap();
        assert_eq!(records, [record("EXE a b", &["EXE", "a", "b"])]);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode(b"", Separator::Null).unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_count() {
        let result = decode(b"EXE\x00two\x00EXE\x00", Separator::Null);
        match result {
            Err(Error::MalformedRecord { offset, reason }) => {
                assert_eq!(offset, 4);
                assert!(reason.contains("two"));
            }
            other => panic!("Expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_truncated_report() {
        let result = decode(b"EXE a\x002\x00EXE\x00a", Separator::Null);
        assert!(matches!(result, Err(Error::MalformedRecord { .. })));

        let result = decode(b"EXE a\x002\x00EXE\x00", Separator::Null);
        assert!(matches!(result, Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn test_verify_accepts_consistent_record() {
        let record = record(r#"EXE "hello world" a\"b"#, &["EXE", "hello world", r#"a"b"#]);
        assert!(record.verify().is_ok());
    }

    #[test]
    fn test_verify_reports_first_difference() {
        let record = record(r#"EXE "a b""#, &["EXE", "a", "b"]);
        match record.verify() {
            Err(Error::Mismatch {
                index,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(expected.as_deref(), Some("a b"));
                assert_eq!(actual.as_deref(), Some("a"));
            }
            other => panic!("Expected Mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_reports_missing_argument() {
        let record = record("EXE a", &["EXE", "a", ""]);
        match record.verify() {
            Err(Error::Mismatch {
                index, expected, ..
            }) => {
                assert_eq!(index, 2);
                assert!(expected.is_none());
            }
            other => panic!("Expected Mismatch, got {other:?}"),
        }
    }
}
