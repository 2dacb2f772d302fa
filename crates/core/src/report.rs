//! Writing an invocation in the three-block report format.
//!
//! A report is the raw command line, the decimal argument count, then every
//! argument, each record followed by the active [`Separator`]. Nothing is
//! quoted or escaped.

use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::invocation::Invocation;

#[cfg(windows)]
const LINE_TERMINATOR: &[u8] = b"\r\n";
#[cfg(not(windows))]
const LINE_TERMINATOR: &[u8] = b"\n";

/// How each record of a report is terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// The platform line terminator. Readable, but ambiguous for arguments
    /// that contain newlines.
    Line,
    /// A single NUL byte. Exact for any argument the OS can pass.
    Null,
}

impl Separator {
    pub fn terminator(self) -> &'static [u8] {
        match self {
            Separator::Line => LINE_TERMINATOR,
            Separator::Null => b"\0",
        }
    }
}

/// Writes one report from already-encoded records.
///
/// This is shared by the reporter and by [`crate::records::Record::write_to`]
/// so both produce byte-identical output.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_block<'a, W, I>(
    out: &mut W,
    raw: &[u8],
    args: I,
    separator: Separator,
) -> io::Result<()>
where
    W: Write + ?Sized,
    I: ExactSizeIterator<Item = &'a [u8]>,
{
    let terminator = separator.terminator();

    out.write_all(raw)?;
    out.write_all(terminator)?;
    write!(out, "{}", args.len())?;
    out.write_all(terminator)?;
    for arg in args {
        out.write_all(arg)?;
        out.write_all(terminator)?;
    }
    Ok(())
}

/// Writes the report for `invocation` and flushes `out`.
///
/// Arguments are written as their platform encoding: the exact bytes on Unix,
/// WTF-8 on Windows. An argument holding an unpaired surrogate is therefore
/// not valid UTF-8, and a writer that insists on UTF-8 (such as `Stdout`
/// attached to a Windows console) fails with [`Error::Output`] rather than
/// printing it. The `args` binary writes through a raw handle for this
/// reason.
///
/// # Errors
///
/// Returns [`Error::Output`] if any write or the final flush fails.
pub fn write_report<W: Write + ?Sized>(
    invocation: &Invocation,
    separator: Separator,
    out: &mut W,
) -> Result<()> {
    let args = invocation.args().iter().map(|arg| arg.as_encoded_bytes());

    write_block(out, invocation.raw().as_encoded_bytes(), args, separator)
        .and_then(|()| out.flush())
        .map_err(Error::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::RawOrigin;
    use std::ffi::OsString;

    fn invocation(raw: &str, args: &[&str]) -> Invocation {
        Invocation::new(
            raw,
            args.iter().map(OsString::from).collect(),
            RawOrigin::Native,
        )
    }

    fn render(invocation: &Invocation, separator: Separator) -> Vec<u8> {
        let mut out = Vec::new();
        write_report(invocation, separator, &mut out).unwrap();
        out
    }

    /// A writer that rejects everything, like a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_null_report_layout() {
        let out = render(
            &invocation(r#"EXE "hello world" """#, &["EXE", "hello world", ""]),
            Separator::Null,
        );
        assert_eq!(out, b"EXE \"hello world\" \"\"\x003\x00EXE\x00hello world\x00\x00");
    }

    #[test]
    fn test_line_report_layout() {
        let out = render(&invocation("EXE", &["EXE"]), Separator::Line);
        let nl = String::from_utf8(LINE_TERMINATOR.to_vec()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("EXE{nl}1{nl}EXE{nl}"));
    }

    #[test]
    fn test_line_report_keeps_embedded_newline() {
        let out = render(&invocation("EXE x", &["EXE", "a\nb"]), Separator::Line);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a\nb"));
    }

    #[test]
    fn test_arguments_are_not_requoted() {
        let out = render(
            &invocation(r#"EXE a\"b "c d""#, &["EXE", r#"a"b"#, "c d"]),
            Separator::Null,
        );
        let records: Vec<&[u8]> = out.split(|&b| b == 0).collect();
        assert_eq!(records[3], br#"a"b"#);
        assert_eq!(records[4], b"c d");
    }

    #[test]
    fn test_empty_argument_vector_counts_zero() {
        let out = render(&invocation("", &[]), Separator::Null);
        assert_eq!(out, b"\x000\x00");
    }

    #[test]
    fn test_write_failure_is_output_error() {
        let result = write_report(&invocation("EXE", &["EXE"]), Separator::Line, &mut ClosedPipe);
        assert!(matches!(result, Err(Error::Output(_))));
    }

    #[test]
    fn test_null_terminator_is_single_byte() {
        assert_eq!(Separator::Null.terminator(), b"\0");
    }
}
