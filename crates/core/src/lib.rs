//! argdump Core Library
//!
//! This crate provides the core functionality for argdump, a diagnostic tool
//! that shows how the operating system split a process's command line into
//! arguments. It prints the raw command line, the argument count, then every
//! argument exactly as parsed.
//!
//! # Key Features
//!
//! - **Invocation Context**: The raw command line and parsed vector captured as an explicit value
//! - **Report Format**: Line or NUL separated records, written without re-quoting
//! - **Windows Splitting Rules**: A portable splitter to cross-check raw lines against vectors
//! - **Record Decoding**: Reading reporter output back for verification and test generation
//! - **Error Handling**: One error type for every failure mode
//!
//! # Examples
//!
//! Reporting a synthetic invocation:
//!
//! ```
//! use std::ffi::OsString;
//! use argdump_core::invocation::{Invocation, RawOrigin};
//! use argdump_core::report::{write_report, Separator};
//!
//! let invocation = Invocation::new(
//!     r#"args "hello world""#,
//!     vec![OsString::from("args"), OsString::from("hello world")],
//!     RawOrigin::Native,
//! );
//! let mut out = Vec::new();
//! write_report(&invocation, Separator::Null, &mut out)?;
//! assert_eq!(out, b"args \"hello world\"\x002\x00args\x00hello world\x00");
//! # Ok::<(), argdump_core::error::Error>(())
//! ```

pub mod checks;
pub mod config;
pub mod error;
pub mod invocation;
pub mod records;
pub mod report;
pub mod suite;
pub mod winparse;
