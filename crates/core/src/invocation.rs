//! The process invocation as an explicit, immutable context.
//!
//! The raw command line and the parsed argument vector are process-wide state
//! set up by the OS loader. [`Invocation`] captures both once at startup so
//! the reporter can be driven by synthetic invocations in tests.

use std::env;
use std::ffi::{OsStr, OsString};

use log::debug;

use crate::error::{Error, Result};

/// Something that can produce the unparsed command line.
pub trait RawCommandLineSource {
    /// Returns the raw invocation text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvironmentUnavailable`] if the text cannot be obtained.
    fn raw_command_line(&self) -> Result<OsString>;
}

/// Reads the command line the OS kept for this process.
///
/// Only Windows keeps the string the parent passed to `CreateProcess`. Other
/// platforms hand the process a pre-split vector, so this source is always
/// unavailable there.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeCommandLine;

impl RawCommandLineSource for NativeCommandLine {
    #[cfg(windows)]
    fn raw_command_line(&self) -> Result<OsString> {
        native::command_line().ok_or(Error::EnvironmentUnavailable)
    }

    #[cfg(not(windows))]
    fn raw_command_line(&self) -> Result<OsString> {
        Err(Error::EnvironmentUnavailable)
    }
}

/// Approximates the command line by joining the parsed vector with single spaces.
///
/// This is lossy: quoting, escapes and runs of whitespace are gone, so
/// splitting the result will not in general give back the same vector.
#[derive(Debug, Clone, Copy)]
pub struct ReconstructedCommandLine<'a> {
    args: &'a [OsString],
}

impl<'a> ReconstructedCommandLine<'a> {
    pub fn new(args: &'a [OsString]) -> Self {
        Self { args }
    }
}

impl RawCommandLineSource for ReconstructedCommandLine<'_> {
    fn raw_command_line(&self) -> Result<OsString> {
        Ok(join_with_spaces(self.args))
    }
}

fn join_with_spaces(args: &[OsString]) -> OsString {
    let mut line = OsString::new();
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            line.push(" ");
        }
        line.push(arg);
    }
    line
}

/// Where the raw command line of an [`Invocation`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawOrigin {
    /// Read from the operating system exactly as the parent supplied it.
    Native,
    /// Rebuilt from the parsed vector; see [`ReconstructedCommandLine`].
    Reconstructed,
}

/// The raw command line and the parsed argument vector of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    raw: OsString,
    args: Vec<OsString>,
    origin: RawOrigin,
}

impl Invocation {
    pub fn new(raw: impl Into<OsString>, args: Vec<OsString>, origin: RawOrigin) -> Self {
        Self {
            raw: raw.into(),
            args,
            origin,
        }
    }

    /// Captures the current process's invocation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EnvironmentUnavailable`] when `strict` is set and the
    /// platform has no native raw command line.
    pub fn from_env(strict: bool) -> Result<Self> {
        Self::capture(&NativeCommandLine, env::args_os().collect(), strict)
    }

    /// Builds an invocation from `args` and the raw line reported by `source`.
    ///
    /// If `source` is unavailable the raw line is reconstructed from `args`,
    /// unless `strict` is set.
    ///
    /// # Errors
    ///
    /// Returns the source's error when it fails and `strict` is set.
    pub fn capture<S: RawCommandLineSource + ?Sized>(
        source: &S,
        args: Vec<OsString>,
        strict: bool,
    ) -> Result<Self> {
        match source.raw_command_line() {
            Ok(raw) => {
                debug!("Using native command line ({} arguments)", args.len());
                Ok(Self::new(raw, args, RawOrigin::Native))
            }
            Err(Error::EnvironmentUnavailable) if !strict => {
                debug!("No native command line, reconstructing from {} arguments", args.len());
                let raw = ReconstructedCommandLine::new(&args).raw_command_line()?;
                Ok(Self::new(raw, args, RawOrigin::Reconstructed))
            }
            Err(e) => Err(e),
        }
    }

    pub fn raw(&self) -> &OsStr {
        &self.raw
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn origin(&self) -> RawOrigin {
        self.origin
    }
}

#[cfg(windows)]
mod native {
    use std::ffi::OsString;
    use std::os::windows::ffi::OsStringExt;
    use std::slice;

    extern "system" {
        // Never fails. The string is owned by the process and never freed.
        fn GetCommandLineW() -> *const u16;
    }

    pub(super) fn command_line() -> Option<OsString> {
        // SAFETY: `GetCommandLineW` returns a NUL terminated wide string that
        // lives for the rest of the process.
        unsafe {
            let ptr = GetCommandLineW();
            if ptr.is_null() {
                return None;
            }
            let mut len = 0;
            while *ptr.add(len) != 0 {
                len += 1;
            }
            Some(OsString::from_wide(slice::from_raw_parts(ptr, len)))
        }
    }
}
