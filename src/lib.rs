#![warn(missing_docs)]
#![allow(clippy::cast_possible_truncation)] // Exit codes are clamped before casting

//! # diffcheck - generate, compare, fail on drift
//!
//! diffcheck wraps a content producer (anything that yields lines of text, such
//! as a list of URL routes or the output of a command) in a fixed workflow:
//!
//! 1. generate the artifact
//! 2. optionally write it to `--outputfile`
//! 3. optionally print it (`--show-contents`)
//! 4. optionally diff it against `--inputfile`
//! 5. with `--check`, exit non-zero when the diff is not empty
//!
//! Committing the artifact and running the same command with `--check` in CI
//! turns any unreviewed change into a failing build.
//!
//! ## Architecture
//!
//! - [`runner`]: the workflow itself and the [`runner::ContentProducer`] trait
//! - [`lines`]: reading and writing artifact files
//! - [`diff`]: line-level differencing and rendering
//! - [`producers`]: concrete producers used by the binary
//! - [`config`]: configuration file loading
//! - [`error`]: the error taxonomy
//! - [`output`]: verbosity-aware diagnostics
//!
//! ## Example Usage
//!
//! ```no_run
//! use diffcheck::runner::{RunOptions, Runner};
//! use diffcheck::producers::CountLines;
//! use std::io;
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = RunOptions {
//!     inputfile: Some("lines.txt".into()),
//!     check: true,
//!     ..RunOptions::default()
//! };
//! let (mut out, mut err) = (io::stdout(), io::stderr());
//! let outcome = Runner::new(options, &mut out, &mut err).run(&mut CountLines::new(3))?;
//! std::process::exit(outcome.exit_code);
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Configuration parsing, validation, and management.
pub mod config;

/// Line diffs between a saved artifact and a fresh one.
pub mod diff;

/// Errors that abort a run.
pub mod error;

/// Artifact file reading and writing.
pub mod lines;

/// Diagnostics and verbosity control.
pub mod output;

/// Content producers shipped with the binary.
pub mod producers;

/// The generate-and-compare workflow.
pub mod runner;

pub use error::{CheckError, Result};
pub use lines::Lines;
pub use runner::{ContentProducer, Outcome, RunOptions, Runner};

/// Current version of the diffcheck binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
