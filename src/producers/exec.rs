use crate::error::{CheckError, Result};
use crate::lines::Lines;
use crate::runner::ContentProducer;
use std::process::Command;
use tracing::{Level, debug, span};
use which::which;

/// Produces the standard output of an external program, one artifact line
/// per output line, trailing whitespace stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecProducer {
    program: String,
    args: Vec<String>,
}

impl ExecProducer {
    /// Build from an argument vector whose first element is the program.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] if `argv` is empty.
    pub fn new(argv: Vec<String>) -> Result<Self> {
        let mut parts = argv.into_iter();
        let program = parts
            .next()
            .ok_or_else(|| CheckError::Configuration("No command given to exec".into()))?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Build from a command line with shell-like quoting, e.g.
    /// `cargo tree --prefix 'none'`. No shell is involved in running it.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Configuration`] for unbalanced quotes or an empty
    /// command line.
    pub fn from_command_line(cmd: &str) -> Result<Self> {
        let parts = shell_words::split(cmd).map_err(|e| {
            CheckError::Configuration(format!("Invalid command syntax '{cmd}': {e}"))
        })?;
        Self::new(parts)
    }

}

impl ContentProducer for ExecProducer {
    fn produce(&mut self) -> Result<Lines> {
        let span = span!(Level::DEBUG, "exec_producer", program = %self.program);
        let _guard = span.enter();

        let resolved = which(&self.program).map_err(|_| {
            CheckError::Configuration(format!("Program '{}' not found in PATH", self.program))
        })?;
        debug!(path = %resolved.display(), args = ?self.args, "Running producer command");

        let output = Command::new(&resolved)
            .args(&self.args)
            .output()
            .map_err(|e| CheckError::Generation(format!("Failed to run '{}': {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CheckError::Generation(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| {
            CheckError::Generation(format!("'{}' produced non UTF-8 output", self.program))
        })?;

        Ok(stdout
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line_with_quotes() -> Result<()> {
        let producer = ExecProducer::from_command_line("printf '%s\\n' \"a b\" c")?;
        let expected = ExecProducer::new(vec![
            "printf".into(),
            "%s\\n".into(),
            "a b".into(),
            "c".into(),
        ])?;
        assert_eq!(producer, expected);
        Ok(())
    }

    #[test]
    fn test_empty_command_is_configuration_error() {
        assert!(matches!(
            ExecProducer::from_command_line("   "),
            Err(CheckError::Configuration(_))
        ));
        assert!(matches!(
            ExecProducer::new(Vec::new()),
            Err(CheckError::Configuration(_))
        ));
    }

    #[test]
    fn test_unbalanced_quotes() {
        assert!(matches!(
            ExecProducer::from_command_line("echo 'oops"),
            Err(CheckError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_program_is_configuration_error() -> Result<()> {
        let mut producer = ExecProducer::new(vec!["diffcheck-no-such-program-xyz".into()])?;
        let err = producer.produce().unwrap_err();
        assert!(matches!(err, CheckError::Configuration(_)));
        assert!(err.to_string().contains("not found in PATH"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_lines() -> Result<()> {
        let mut producer = ExecProducer::from_command_line("sh -c 'printf \"b  \\na\\n\"'")?;
        assert_eq!(producer.produce()?, vec!["b", "a"]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_generation_error() -> Result<()> {
        let mut producer = ExecProducer::from_command_line("sh -c 'echo broken >&2; exit 3'")?;
        let err = producer.produce().unwrap_err();
        assert!(matches!(err, CheckError::Generation(_)));
        assert!(err.to_string().contains("broken"));
        Ok(())
    }
}
