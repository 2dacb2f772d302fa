//! Rendering records as Rust test assertions.
//!
//! Each record becomes a `chk(<command line>, &[<args>...]);` line that can be
//! pasted into a splitter test. Raw string literals are used where they make
//! the command line easier to read.

use crate::records::Record;

/// Renders `text` as a Rust string literal.
///
/// Plain literals are used when nothing needs escaping, `r"..."` when the
/// text has backslashes, and `r#"..."#` (with as many `#` as needed) when it
/// has quotes. Control characters other than tab and newline fall back to an
/// escaped literal.
///
/// # Examples
///
/// ```
/// use argdump_core::checks::literal;
///
/// assert_eq!(literal("a b"), r#""a b""#);
/// assert_eq!(literal(r"a\b"), r#"r"a\b""#);
/// assert_eq!(literal(r#"a"b"#), r###"r#"a"b"#"###);
/// ```
pub fn literal(text: &str) -> String {
    if text
        .chars()
        .any(|c| c.is_control() && c != '\t' && c != '\n')
    {
        return format!("{text:?}");
    }

    if text.contains('"') {
        let mut hashes = String::from("#");
        while text.contains(&format!("\"{hashes}")) {
            hashes.push('#');
        }
        return format!("r{hashes}\"{text}\"{hashes}");
    }

    if text.contains('\\') {
        return format!("r\"{text}\"");
    }

    format!("\"{text}\"")
}

/// Renders one record as a `chk(...)` call.
///
/// # Examples
///
/// ```
/// use argdump_core::checks::render_check;
/// use argdump_core::records::Record;
///
/// let record = Record::new("EXE a", vec!["EXE".to_string(), "a".to_string()]);
/// assert_eq!(render_check(&record), r#"chk("EXE a", &["EXE", "a"]);"#);
/// ```
pub fn render_check(record: &Record) -> String {
    let args: Vec<String> = record.args.iter().map(|arg| literal(arg)).collect();
    format!("chk({}, &[{}]);", literal(&record.raw), args.join(", "))
}
