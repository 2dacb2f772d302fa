//! Harness subcommands.

use std::io::Write;
use std::path::PathBuf;

use argdump_core::checks::render_check;
use argdump_core::config::expand_path;
use argdump_core::error::{Error, Result};
use argdump_core::records::{read_records, write_records, Record};
use argdump_core::report::Separator;
use argdump_core::suite::get_suite;
use log::{info, warn};

use crate::capture::{default_reporter_path, Reporter};
use crate::cli_args::HarnessCommand;
use crate::permutations;

/// Every 1000 command lines, a progress line is logged.
const PROGRESS_INTERVAL: usize = 1000;

fn reporter(path: Option<&str>) -> Result<Reporter> {
    let program = match path {
        Some(path) => PathBuf::from(expand_path(path)),
        None => default_reporter_path()?,
    };
    info!("Using reporter `{}`", program.display());
    Ok(Reporter::new(program))
}

/// Runs each tail through `reporter`, in order, one child at a time.
///
/// # Errors
///
/// Stops at the first command line that could not be run or decoded.
pub fn run_all<I>(reporter: &Reporter, tails: I, total: usize) -> Result<Vec<Record>>
where
    I: IntoIterator<Item = String>,
{
    let mut records = Vec::new();
    for (index, tail) in tails.into_iter().enumerate() {
        records.push(reporter.run(&tail)?);
        if (index + 1) % PROGRESS_INTERVAL == 0 {
            info!("Recorded {} of {} command lines", index + 1, total);
        }
    }
    Ok(records)
}

/// Checks every record, logging each mismatch.
///
/// # Errors
///
/// Returns [`Error::VerificationFailed`] if any record does not verify.
pub fn verify_records(records: &[Record]) -> Result<()> {
    let failed = records
        .iter()
        .filter_map(|record| record.verify().err())
        .inspect(|e| warn!("{e}"))
        .count();

    if failed > 0 {
        return Err(Error::VerificationFailed {
            failed,
            total: records.len(),
        });
    }

    info!("All {} recorded command lines verified", records.len());
    Ok(())
}

/// Writes one `chk(...)` line per record.
///
/// # Errors
///
/// Returns [`Error::Output`] if writing fails.
pub fn emit_checks<W: Write + ?Sized>(records: &[Record], out: &mut W) -> Result<()> {
    for record in records {
        writeln!(out, "{}", render_check(record)).map_err(Error::Output)?;
    }
    out.flush().map_err(Error::Output)
}

/// Executes a parsed harness command.
///
/// # Errors
///
/// Returns the first error encountered by the subcommand.
pub fn execute<W: Write + ?Sized>(command: HarnessCommand, out: &mut W) -> Result<()> {
    match command {
        HarnessCommand::Capture {
            suite,
            output,
            reporter: reporter_path,
        } => {
            let reporter = reporter(reporter_path.as_deref())?;
            let groups = get_suite(&expand_path(&suite))?;
            let total = groups.iter().map(|group| group.lines.len()).sum();

            for group in &groups {
                info!("Capturing group {} ({} lines)", group, group.lines.len());
            }
            let tails = groups.into_iter().flat_map(|group| group.lines);
            let records = run_all(&reporter, tails, total)?;

            write_records(&expand_path(&output), &records, Separator::Null)?;
            info!("Wrote {} records to `{}`", records.len(), output);
            Ok(())
        }
        HarnessCommand::Permute {
            alphabet,
            max_len,
            output,
            reporter: reporter_path,
        } => {
            let reporter = reporter(reporter_path.as_deref())?;
            let total = permutations::count(&alphabet, max_len);
            info!(
                "Generating {} command lines up to {} characters (this may take a while)",
                total, max_len
            );

            let tails = permutations::command_lines(&alphabet, max_len);
            let records = run_all(&reporter, tails, total)?;

            write_records(&expand_path(&output), &records, Separator::Null)?;
            info!("Wrote {} records to `{}`", records.len(), output);
            Ok(())
        }
        HarnessCommand::Verify { input } => {
            let records = read_records(&expand_path(&input), Separator::Null)?;
            verify_records(&records)
        }
        HarnessCommand::EmitChecks { input } => {
            let records = read_records(&expand_path(&input), Separator::Null)?;
            emit_checks(&records, out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw: &str, args: &[&str]) -> Record {
        Record::new(raw, args.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_verify_records_all_good() {
        let records = [
            record(r#"EXE "a b""#, &["EXE", "a b"]),
            record(r#"EXE "" x"#, &["EXE", "", "x"]),
        ];
        assert!(verify_records(&records).is_ok());
    }

    #[test]
    fn test_verify_records_counts_failures() {
        let records = [
            record(r#"EXE "a b""#, &["EXE", "a b"]),
            record(r#"EXE "a b""#, &["EXE", "a", "b"]),
            record("EXE", &["EXE", ""]),
        ];
        match verify_records(&records) {
            Err(Error::VerificationFailed { failed, total }) => {
                assert_eq!(failed, 2);
                assert_eq!(total, 3);
            }
            other => panic!("Expected VerificationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_emit_checks_writes_one_line_per_record() {
        let records = [record("EXE a", &["EXE", "a"]), record(r"EXE a\b", &["EXE", r"a\b"])];
        let mut out = Vec::new();
        emit_checks(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                r#"chk("EXE a", &["EXE", "a"]);"#,
                r#"chk(r"EXE a\b", &["EXE", r"a\b"]);"#,
            ]
        );
    }

    #[test]
    fn test_execute_verify_missing_file() {
        let command = HarnessCommand::Verify {
            input: "/definitely/not/a/capture.bin".to_string(),
        };
        let result = execute(command, &mut Vec::new());
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
