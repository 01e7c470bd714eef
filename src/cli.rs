//! Command-line interface definitions for diffcheck.
//!
//! This module contains all CLI argument parsing structures using clap's derive macros.
//! The CLI definitions are shared between the main binary and build tools (like xtask)
//! for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes (#[arg(help = "...")]),
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use crate::config::{Config, ExitPolicy};
use crate::runner::RunOptions;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for diffcheck.
#[derive(Parser)]
#[command(
    name = "diffcheck",
    version = crate::VERSION,
    about = "Generate an artifact and check it against the saved copy",
    long_about = "Runs a content producer, optionally writes its output to a file, \
                  diffs it against a previously saved copy and, with --check, exits \
                  non-zero when they differ. Intended for CI pipelines."
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults: $DIFFCHECK_CONFIG_PATH, ./diffcheck.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Emit "line 1" .. "line N"
    CountLines {
        /// Number of lines to output
        #[arg(short = 'n', long, default_value_t = 3)]
        lines: usize,

        #[command(flatten)]
        check: CheckArgs,
    },

    /// Check the standard output of a command
    Exec {
        /// Command line to run, parsed with shell quoting rules
        #[arg(long, value_name = "COMMAND", conflicts_with = "argv")]
        shell: Option<String>,

        /// Program and arguments (after `--`)
        #[arg(last = true, value_name = "ARGS")]
        argv: Vec<String>,

        #[command(flatten)]
        check: CheckArgs,
    },

    /// Freeze the URL routes declared in a route manifest
    Routes {
        /// Route manifest (TOML)
        #[arg(short, long, value_name = "PATH")]
        manifest: PathBuf,

        #[command(flatten)]
        check: CheckArgs,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Options shared by every producing command.
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Input source filename (previously saved artifact to diff against)
    #[arg(long, value_name = "PATH")]
    pub inputfile: Option<PathBuf>,

    /// Output destination filename
    #[arg(long, value_name = "PATH")]
    pub outputfile: Option<PathBuf>,

    /// Print out the contents generated to stdout
    #[arg(long)]
    pub show_contents: bool,

    /// Exit with a non-zero status if a diff exists (use for CI)
    #[arg(long, visible_alias = "exit-code")]
    pub check: bool,

    /// Exit status when --check finds a diff [default: from config, else count]
    #[arg(long, value_enum, value_name = "POLICY")]
    pub exit_policy: Option<ExitPolicy>,
}

impl CheckArgs {
    /// Combine these flags with the loaded configuration.
    #[must_use]
    pub fn to_run_options(&self, config: &Config) -> RunOptions {
        let mut options = RunOptions::from_config(config);
        options.inputfile.clone_from(&self.inputfile);
        options.outputfile.clone_from(&self.outputfile);
        options.show_contents = self.show_contents;
        options.check = self.check;
        if let Some(policy) = self.exit_policy {
            options.exit_policy = policy;
        }
        options
    }
}
