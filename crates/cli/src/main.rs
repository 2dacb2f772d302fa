use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;

use argdump_core::config::{self, SEPARATOR_ENV_VAR, STRICT_RAW_ENV_VAR};
use argdump_core::error::{Error, Result};
use argdump_core::invocation::Invocation;
use argdump_core::report::write_report;
use log::debug;

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Opens standard output as a plain file.
///
/// The Rust runtime replaces a closed standard descriptor with `/dev/null`
/// opened read-write before `main` runs, so a closed stdout would otherwise
/// swallow the report. Shells and `Command` redirect to `/dev/null`
/// write-only, which keeps `args >/dev/null` working.
#[cfg(unix)]
fn stdout_file() -> io::Result<File> {
    use std::os::fd::{AsFd, AsRawFd};
    use std::os::unix::fs::{FileTypeExt, MetadataExt};

    let file = File::from(io::stdout().as_fd().try_clone_to_owned()?);

    let flags = unsafe { libc::fcntl(file.as_raw_fd(), libc::F_GETFL) };
    if flags == -1 {
        return Err(io::Error::last_os_error());
    }

    let metadata = file.metadata()?;
    let placeholder = flags & libc::O_ACCMODE == libc::O_RDWR
        && metadata.file_type().is_char_device()
        && std::fs::metadata("/dev/null").is_ok_and(|null| null.rdev() == metadata.rdev());
    if placeholder {
        return Err(io::Error::from_raw_os_error(libc::EBADF));
    }

    Ok(file)
}

/// Opens standard output as a plain file.
///
/// A console `Stdout` rejects bytes that are not UTF-8, while the raw handle
/// passes WTF-8 arguments through. Duplicating fails when there is no
/// standard output at all.
#[cfg(windows)]
fn stdout_file() -> io::Result<File> {
    use std::os::windows::io::AsHandle;

    Ok(File::from(io::stdout().as_handle().try_clone_to_owned()?))
}

fn execute() -> Result<()> {
    // Every argument belongs to the caller, so configuration only ever comes
    // from the build and the environment.
    let separator = config::resolve_separator(env_value(SEPARATOR_ENV_VAR).as_deref());
    let strict = config::resolve_strict_raw(env_value(STRICT_RAW_ENV_VAR).as_deref());

    let invocation = Invocation::from_env(strict)?;
    debug!(
        "Reporting {} arguments ({:?} raw line) with {:?} separator",
        invocation.arg_count(),
        invocation.origin(),
        separator
    );

    let mut out = BufWriter::new(stdout_file().map_err(Error::Output)?);
    write_report(&invocation, separator, &mut out)
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{e:?}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
