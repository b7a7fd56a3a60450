//! Runtime configuration for `tint`.
//!
//! Settings come from an optional TOML file; command-line flags override
//! them. A missing `--config` means defaults, but a path that was given and
//! cannot be read is an error.
//!
//! ```toml
//! format = "css"
//! level = "aaa"
//! target_ratio = 7.0
//! output = "theme.css"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tincture::{AA_NORMAL, ExportFormat, WcagLevel};
use tracing::debug;

/// Errors produced while loading the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// File-level defaults for every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export format for theme-producing commands.
    pub format: ExportFormat,

    /// Level used by `tint contrast` for its compliance verdict.
    pub level: WcagLevel,

    /// Target ratio used by `tint ensure`.
    pub target_ratio: f64,

    /// Default output file; stdout when unset.
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            level: WcagLevel::Aa,
            target_ratio: AA_NORMAL,
            output: None,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] for malformed TOML or unknown values.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load the config at `path`, or defaults when no path is given.
    ///
    /// # Errors
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(config.path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.format, ExportFormat::Json);
        assert_eq!(config.level, WcagLevel::Aa);
        assert_eq!(config.target_ratio, 4.5);
        assert!(config.output.is_none());
    }

    #[test]
    fn load_without_path_is_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn parses_full_file() {
        let config = Config::from_toml(
            r#"
            format = "css"
            level = "aaa"
            target_ratio = 7.0
            output = "theme.css"
            "#,
        )
        .unwrap();
        assert_eq!(config.format, ExportFormat::Css);
        assert_eq!(config.level, WcagLevel::Aaa);
        assert_eq!(config.target_ratio, 7.0);
        assert_eq!(config.output, Some(PathBuf::from("theme.css")));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_toml("format = \"toml\"").unwrap();
        assert_eq!(config.format, ExportFormat::Toml);
        assert_eq!(config.target_ratio, AA_NORMAL);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(matches!(
            Config::from_toml("format = \"yaml\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "level = \"aaa\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.level, WcagLevel::Aaa);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
