//! Running the reporter as a child process and collecting what it prints.
//!
//! On Windows the command-line tail is handed to the child untouched with
//! `raw_arg`, so the record holds exactly what the C runtime saw. Other
//! platforms cannot pass a raw string. There the tail is split with the
//! Windows rules and passed as discrete arguments, and the record keeps the
//! Windows command line being simulated in place of the child's lossy
//! reconstruction.

use std::env;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use argdump_core::config::SEPARATOR_ENV_VAR;
use argdump_core::error::{Error, Result};
use argdump_core::records::{decode, Record};
use argdump_core::report::Separator;
use log::debug;

/// Name of the reporter binary, without the platform executable suffix.
pub const REPORTER_BIN_NAME: &str = "args";

/// Locates the reporter next to the running executable.
///
/// # Errors
///
/// Returns [`Error::Io`] if the current executable cannot be determined.
pub fn default_reporter_path() -> Result<PathBuf> {
    let current = env::current_exe()
        .map_err(|e| Error::io_error("harness".to_string(), "<current exe>".to_string(), e))?;
    Ok(current.with_file_name(format!("{REPORTER_BIN_NAME}{}", env::consts::EXE_SUFFIX)))
}

/// A reporter binary that command lines can be run through.
#[derive(Debug, Clone)]
pub struct Reporter {
    program: PathBuf,
}

impl Reporter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The full Windows command line that running `tail` stands for.
    pub fn command_line_for(&self, tail: &str) -> String {
        let program = argdump_core::winparse::program_token(&self.program.to_string_lossy());
        format!("{program} {tail}")
    }

    /// Runs the reporter with `tail` after the program name and decodes its output.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reporter cannot be launched
    /// - The reporter exits unsuccessfully
    /// - The output is not exactly one well-formed report
    pub fn run(&self, tail: &str) -> Result<Record> {
        let mut command = Command::new(&self.program);
        command
            .env(SEPARATOR_ENV_VAR, "null")
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());
        self.add_tail(&mut command, tail);

        debug!("Running {:?} with tail {:?}", self.program, tail);
        let output = command.output().map_err(|e| Error::Spawn {
            program: self.program.display().to_string(),
            original: e,
        })?;

        if !output.status.success() {
            return Err(Error::ReporterExit {
                status: output.status.to_string(),
                command_line: self.command_line_for(tail),
            });
        }

        let mut records = decode(&output.stdout, Separator::Null)?;
        if records.len() != 1 {
            return Err(Error::malformed(
                0,
                format!("expected one report, found {}", records.len()),
            ));
        }
        let record = records.remove(0);

        Ok(self.finish_record(record, tail))
    }

    #[cfg(windows)]
    fn add_tail(&self, command: &mut Command, tail: &str) {
        use std::os::windows::process::CommandExt;

        command.raw_arg(tail);
    }

    #[cfg(not(windows))]
    fn add_tail(&self, command: &mut Command, tail: &str) {
        let simulated = argdump_core::winparse::split(&self.command_line_for(tail));
        command.args(simulated.into_iter().skip(1));
    }

    #[cfg(windows)]
    fn finish_record(&self, record: Record, _tail: &str) -> Record {
        record
    }

    #[cfg(not(windows))]
    fn finish_record(&self, record: Record, tail: &str) -> Record {
        Record::new(self.command_line_for(tail), record.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_for_plain_path() {
        let reporter = Reporter::new("/opt/bin/args");
        assert_eq!(reporter.command_line_for(r#""a b" c"#), r#"/opt/bin/args "a b" c"#);
    }

    #[test]
    fn test_command_line_for_path_with_space() {
        let reporter = Reporter::new("/opt/my tools/args");
        assert_eq!(reporter.command_line_for("x"), r#""/opt/my tools/args" x"#);
    }

    #[test]
    fn test_default_reporter_path_is_sibling() {
        let path = default_reporter_path().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, format!("args{}", env::consts::EXE_SUFFIX));
    }

    #[test]
    fn test_missing_reporter_is_spawn_error() {
        let reporter = Reporter::new("/definitely/not/a/reporter");
        assert!(matches!(reporter.run("a"), Err(Error::Spawn { .. })));
    }
}
