use crate::output;
use std::collections::HashSet;

/// Detects configuration keys that diffcheck does not understand
pub struct ConfigValidator {
    /// Dotted paths of every recognised leaf field
    known_fields: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "check.exit_policy",
            "diff.algorithm",
            "diff.colorize",
            "output.atomic_write",
        ]
        .into_iter()
        .collect();

        Self { known_fields }
    }

    /// Return the dotted paths of unknown fields in `content`.
    ///
    /// Unparseable content yields no findings; the real parse reports it.
    #[must_use]
    pub fn unknown_fields(&self, content: &str) -> Vec<String> {
        let Ok(parsed) = toml::from_str::<toml::Value>(content) else {
            return Vec::new();
        };

        let mut unknown = Vec::new();
        self.check_table(&parsed, "", &mut unknown);
        unknown
    }

    /// Print a warning for each unknown field in `content`
    pub fn warn_unknown_fields(&self, content: &str) {
        for field in self.unknown_fields(content) {
            output::warning(&format!("Unknown configuration field: {field}"));
        }
    }

    /// Recursively checks a TOML table for unknown fields
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        if let toml::Value::Table(map) = table {
            for (key, value) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                if let toml::Value::Table(_) = value {
                    self.check_table(value, &full_key, unknown);
                } else if !self.known_fields.contains(full_key.as_str()) {
                    unknown.push(full_key);
                }
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
