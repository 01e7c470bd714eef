/// Detection of unrecognised configuration keys.
pub mod validator;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "DIFFCHECK_CONFIG_PATH";

/// Project-local configuration file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "diffcheck.toml";

/// Settings loaded from `diffcheck.toml`; every section is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// `[check]` section
    #[serde(default)]
    pub check: CheckConfig,

    /// `[diff]` section
    #[serde(default)]
    pub diff: DiffConfig,

    /// `[output]` section
    #[serde(default)]
    pub output: OutputConfig,
}

/// Check mode behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CheckConfig {
    /// Exit status reported when check mode finds a difference
    #[serde(default)]
    pub exit_policy: ExitPolicy,
}

/// How a detected difference is turned into a process exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExitPolicy {
    /// Exit with the number of differing lines (clamped to 255)
    #[default]
    Count,
    /// Always exit with 1
    Fixed,
}

/// How diffs are computed and shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffConfig {
    /// Line diff algorithm
    #[serde(default)]
    pub algorithm: DiffAlgorithm,
    /// Color added/removed lines when stderr is a terminal
    #[serde(default = "default_colorize")]
    pub colorize: bool,
}

/// Diff algorithm names accepted in `diff.algorithm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers' O(ND) algorithm
    #[default]
    Myers,
    /// Patience diff, falls back to Myers between unique lines
    Patience,
}

/// Output file handling.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Write through a temporary file and rename it into place
    #[serde(default)]
    pub atomic_write: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: DiffAlgorithm::Myers,
            colorize: default_colorize(),
        }
    }
}

impl Config {
    /// Find the configuration file to use.
    ///
    /// Lookup order: the explicit path, `DIFFCHECK_CONFIG_PATH`,
    /// `./diffcheck.toml`, then `<config dir>/diffcheck/config.toml`.
    /// Returns `None` when nothing exists, in which case defaults apply.
    #[must_use]
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Some(project);
        }

        dirs::config_dir()
            .map(|dir| dir.join("diffcheck").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Load configuration from `explicit` or the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file is missing, or if the
    /// located file cannot be read or is not valid TOML.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit) {
            Some(path) => {
                if explicit.is_none() && !path.exists() {
                    tracing::debug!(path = %path.display(), "Configured path missing, using defaults");
                    return Ok(Self::default());
                }
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - Configuration file contains invalid TOML
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        validator::ConfigValidator::new().warn_unknown_fields(&content);
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML config")
    }
}

const fn default_colorize() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.check.exit_policy, ExitPolicy::Count);
        assert_eq!(config.diff.algorithm, DiffAlgorithm::Myers);
        assert!(config.diff.colorize);
        assert!(!config.output.atomic_write);
    }

    #[test]
    fn test_parse_partial_file_fills_defaults() -> Result<()> {
        let config = Config::parse("[check]\nexit_policy = \"fixed\"\n")?;
        assert_eq!(config.check.exit_policy, ExitPolicy::Fixed);
        assert!(config.diff.colorize);
        Ok(())
    }

    #[test]
    fn test_parse_empty_file() -> Result<()> {
        assert_eq!(Config::parse("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_parse_rejects_unknown_variant() {
        assert!(Config::parse("[diff]\nalgorithm = \"histogram\"\n").is_err());
    }

    #[test]
    fn test_load_from_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[diff]\nalgorithm = \"patience\"\n\n[output]\natomic_write = true\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.diff.algorithm, DiffAlgorithm::Patience);
        assert!(config.output.atomic_write);
        assert_eq!(config.check, CheckConfig::default());
        Ok(())
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Config::load(Path::new("/nonexistent/diffcheck.toml")).is_err());
    }

    #[test]
    #[serial]
    fn test_env_override_wins_over_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("env.toml");
        std::fs::write(&path, "[diff]\ncolorize = false\n")?;

        // SAFETY: serialised with the other env-touching tests
        unsafe { std::env::set_var(CONFIG_PATH_ENV, &path) };
        let located = Config::locate(None);
        let config = Config::resolve(None);
        unsafe { std::env::remove_var(CONFIG_PATH_ENV) };

        assert_eq!(located, Some(path));
        assert!(!config?.diff.colorize);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins_over_env() -> Result<()> {
        let dir = tempdir()?;
        let explicit = dir.path().join("explicit.toml");

        unsafe { std::env::set_var(CONFIG_PATH_ENV, dir.path().join("env.toml")) };
        let located = Config::locate(Some(&explicit));
        unsafe { std::env::remove_var(CONFIG_PATH_ENV) };

        assert_eq!(located, Some(explicit));
        Ok(())
    }

    #[test]
    #[serial]
    fn test_explicit_missing_file_errors() {
        let result = Config::resolve(Some(Path::new("/nonexistent/explicit.toml")));
        assert!(result.is_err());
    }
}
