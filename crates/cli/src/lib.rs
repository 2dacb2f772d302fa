//! argdump CLI Library
//!
//! This crate provides the two argdump binaries:
//!
//! - `args`: the reporter. It prints its raw command line, the argument count
//!   and every argument, and never interprets any of them.
//! - `args-harness`: runs the reporter with chosen command lines, records the
//!   results, and verifies them against the Windows splitting rules.
//!
//! # Architecture
//!
//! - [`cli_args`]: Harness argument parsing
//! - [`capture`]: Launching the reporter and decoding what it prints
//! - [`permutations`]: Exhaustive command-line generation
//! - [`commands`]: The harness subcommands
//!
//! # Examples
//!
//! ```bash
//! # Line mode (the default build)
//! args "hello world" ""
//!
//! # NUL separated, for arguments containing newlines
//! ARGDUMP_SEPARATOR=null args "$(printf 'a\nb')" | od -c
//!
//! # Record a suite, then check every recording
//! args-harness capture --suite cases.yml --output capture.bin
//! args-harness verify --input capture.bin
//! args-harness emit-checks --input capture.bin
//! ```

pub mod capture;
pub mod cli_args;
pub mod commands;
pub mod permutations;
