//! Command-line arguments for the harness.
//!
//! Only `args-harness` parses its arguments. The reporter binary never does,
//! since everything on its command line is the subject of the report.

use argdump_core::config::{DEFAULT_PERMUTATION_ALPHABET, DEFAULT_PERMUTATION_MAX_LEN};
use clap::{Parser, Subcommand};

/// Command-line arguments for the `args-harness` tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use argdump_cli::cli_args::Args;
///
/// let args = Args::parse_from(["args-harness", "verify", "-i", "capture.bin"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
#[command(about = "Record, verify and replay how command lines are split into arguments")]
pub struct Args {
    #[command(subcommand)]
    pub command: HarnessCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum HarnessCommand {
    /// Run every command line of a YAML suite through the reporter and record the results.
    Capture {
        /// Path to the suite YAML.
        #[arg(long, short = 's')]
        suite: String,

        /// File the recorded reports are written to (NUL separated).
        #[arg(long, short = 'o')]
        output: String,

        /// Reporter binary to run.
        ///
        /// If not provided, the `args` binary next to this one is used.
        #[arg(long, short = 'r')]
        reporter: Option<String>,
    },

    /// Run every short command line over an alphabet through the reporter.
    Permute {
        /// Characters the command lines are built from.
        #[arg(long, short = 'a', default_value = DEFAULT_PERMUTATION_ALPHABET)]
        alphabet: String,

        /// Longest command line to generate. The run time grows exponentially with this.
        #[arg(long, short = 'm', default_value_t = DEFAULT_PERMUTATION_MAX_LEN)]
        max_len: usize,

        /// File the recorded reports are written to (NUL separated).
        #[arg(long, short = 'o')]
        output: String,

        /// Reporter binary to run.
        ///
        /// If not provided, the `args` binary next to this one is used.
        #[arg(long, short = 'r')]
        reporter: Option<String>,
    },

    /// Check that every recorded raw command line splits into its recorded arguments.
    Verify {
        /// A file written by `capture` or `permute`.
        #[arg(long, short = 'i')]
        input: String,
    },

    /// Print every recorded report as a `chk(...)` test line.
    EmitChecks {
        /// A file written by `capture` or `permute`.
        #[arg(long, short = 'i')]
        input: String,
    },
}
