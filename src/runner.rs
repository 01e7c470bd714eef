//! The generate-and-compare workflow.
//!
//! A [`Runner`] takes lines from a [`ContentProducer`], optionally loads a
//! reference file, writes the new artifact, prints it, diffs it against the
//! reference and decides the exit status. Every step is optional except
//! generation, and the steps always run in that order.

use crate::config::{Config, ExitPolicy};
use crate::diff::{self, DiffLine};
use crate::error::Result;
use crate::lines::{self, Lines};
use similar::Algorithm;
use std::io::Write;
use std::path::PathBuf;
use tracing::{Level, debug, info, span};

/// Largest value a process exit status can carry.
const MAX_EXIT_CODE: usize = 255;

/// Something that produces the artifact to check.
///
/// Implementations should be deterministic: two runs over the same state must
/// yield the same lines, or the comparison is meaningless.
pub trait ContentProducer {
    /// Generate the artifact.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Generation`](crate::CheckError::Generation) (or
    /// [`CheckError::Configuration`](crate::CheckError::Configuration) for
    /// bad producer input) when the artifact cannot be built.
    fn produce(&mut self) -> Result<Lines>;
}

impl<F> ContentProducer for F
where
    F: FnMut() -> Result<Lines>,
{
    fn produce(&mut self) -> Result<Lines> {
        self()
    }
}

impl ExitPolicy {
    /// Exit status for a diff of `differences` lines in check mode.
    #[must_use]
    pub fn exit_code(self, differences: usize) -> i32 {
        if differences == 0 {
            return 0;
        }
        match self {
            Self::Fixed => 1,
            // bounded by MAX_EXIT_CODE, so the cast is lossless
            Self::Count => differences.min(MAX_EXIT_CODE) as i32,
        }
    }
}

/// Options for a single run. Fixed once the run starts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Previously saved artifact to compare against.
    pub inputfile: Option<PathBuf>,
    /// Where to write the newly generated artifact.
    pub outputfile: Option<PathBuf>,
    /// Print the generated lines to the info stream.
    pub show_contents: bool,
    /// Report a non-zero exit status when a difference is found.
    pub check: bool,
    /// How that non-zero status is chosen.
    pub exit_policy: ExitPolicy,
    /// Line diff algorithm.
    pub algorithm: Algorithm,
    /// Colour diff lines.
    pub colorize: bool,
    /// Replace the output file through a temporary file.
    pub atomic_write: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            inputfile: None,
            outputfile: None,
            show_contents: false,
            check: false,
            exit_policy: ExitPolicy::default(),
            algorithm: Algorithm::Myers,
            colorize: false,
            atomic_write: false,
        }
    }
}

impl RunOptions {
    /// Options seeded from the loaded configuration, with no files or flags set.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            exit_policy: config.check.exit_policy,
            algorithm: diff::config_to_algorithm(&config.diff.algorithm),
            colorize: config.diff.colorize,
            atomic_write: config.output.atomic_write,
            ..Self::default()
        }
    }

    /// Keep colour only when the diff sink is a terminal.
    #[must_use]
    pub fn restrict_color_to_terminal(mut self, is_terminal: bool) -> Self {
        self.colorize = self.colorize && is_terminal;
        self
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// The generated artifact.
    pub lines: Lines,
    /// Added and removed lines, when a reference file was compared.
    pub diff: Option<Vec<DiffLine>>,
    /// Process exit status the run asks for.
    pub exit_code: i32,
}

impl Outcome {
    /// Whether a comparison ran and found a difference.
    #[must_use]
    pub fn differs(&self) -> bool {
        self.diff.as_ref().is_some_and(|diff| !diff.is_empty())
    }
}

/// Drives one generate-and-compare pass, printing to two injected sinks.
pub struct Runner<'a> {
    options: RunOptions,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> Runner<'a> {
    /// `out` receives headers, contents and status messages; `err` receives
    /// the diff lines themselves.
    pub fn new(options: RunOptions, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { options, out, err }
    }

    /// Run the workflow once.
    ///
    /// The reference file is read before the output file is written, so the
    /// same path may be passed as both input and output. A missing reference
    /// aborts the run before anything is written.
    ///
    /// # Errors
    ///
    /// Returns the producer's error, [`CheckError::Configuration`] for a
    /// missing input file, [`CheckError::Io`] for file failures and
    /// [`CheckError::Output`] when a sink cannot be written. A detected
    /// difference is not an error; see [`Outcome::exit_code`].
    ///
    /// [`CheckError::Configuration`]: crate::CheckError::Configuration
    /// [`CheckError::Io`]: crate::CheckError::Io
    /// [`CheckError::Output`]: crate::CheckError::Output
    pub fn run(&mut self, producer: &mut dyn ContentProducer) -> Result<Outcome> {
        let span = span!(
            Level::DEBUG,
            "check_run",
            check = self.options.check,
            policy = ?self.options.exit_policy
        );
        let _guard = span.enter();

        self.print_header()?;

        let new_lines = producer.produce()?;
        debug!(count = new_lines.len(), "Generated content");

        let reference = match &self.options.inputfile {
            Some(path) => Some(lines::read_lines(path)?),
            None => None,
        };

        if let Some(path) = &self.options.outputfile {
            if self.options.atomic_write {
                lines::write_lines_atomic(path, &new_lines)?;
            } else {
                lines::write_lines(path, &new_lines)?;
            }
        }

        if self.options.show_contents {
            self.print_contents(&new_lines)?;
        }

        let diff = reference.map(|old| diff::diff_lines(&old, &new_lines, self.options.algorithm));
        if let Some(diff) = &diff {
            self.print_diff(diff)?;
        }

        let differences = diff.as_ref().map_or(0, Vec::len);
        let exit_code = if self.options.check {
            self.options.exit_policy.exit_code(differences)
        } else {
            0
        };

        info!(
            lines = new_lines.len(),
            differences,
            exit_code,
            "Check run complete"
        );

        Ok(Outcome {
            lines: new_lines,
            diff,
            exit_code,
        })
    }

    fn print_header(&mut self) -> Result<()> {
        let mut printed = false;
        if let Some(path) = &self.options.inputfile {
            writeln!(self.out, "Reading contents from: {}", path.display())?;
            printed = true;
        }
        if let Some(path) = &self.options.outputfile {
            writeln!(self.out, "Writing contents to:   {}", path.display())?;
            printed = true;
        }
        if printed {
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn print_contents(&mut self, contents: &[String]) -> Result<()> {
        if contents.is_empty() {
            writeln!(self.out, "No contents found.")?;
        } else {
            writeln!(self.out, "--- Contents ---")?;
            for line in contents {
                writeln!(self.out, "{line}")?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn print_diff(&mut self, diff: &[DiffLine]) -> Result<()> {
        if diff.is_empty() {
            writeln!(self.out, "Empty diff - content is unchanged.")?;
        } else {
            writeln!(self.out, "--- Diff ---")?;
            self.out.flush()?;
            diff::write_diff(diff, self.options.colorize, self.err)?;
            self.err.flush()?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}
