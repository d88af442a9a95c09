// Configuration file handling
//
// ~/.paperdesk/rc holds `key=value` lines; `#` starts a comment.

use chrono::format::{Item, StrftimeItems};
use std::path::{Path, PathBuf};
use thiserror::Error;
use crate::models::Locale;
use crate::utils::DEFAULT_TIME_FORMAT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid value for '{key}' on line {line}: '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        line: usize,
    },
    #[error("Malformed line {line}: '{text}' (expected key=value)")]
    Malformed { line: usize, text: String },
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Resolve against whether stdout is a terminal
    pub fn enabled(&self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Effective settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub locale: Locale,
    pub time_format: String,
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            color: ColorMode::default(),
        }
    }
}

impl Config {
    /// Get the configuration file path
    ///
    /// `$HOME` wins over the platform home lookup so tests can redirect it.
    pub fn config_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)?;
        Some(home.join(".paperdesk").join("rc"))
    }

    /// Load the configuration file, or defaults when there is none
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Malformed {
                    line: line_no,
                    text: line.to_string(),
                });
            };
            let key = key.trim();
            let value = value.trim();
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                line: line_no,
            };

            match key {
                "locale" => config.locale = Locale::from_str(value).ok_or_else(invalid)?,
                "time.format" => {
                    if value.is_empty() || StrftimeItems::new(value).any(|i| matches!(i, Item::Error)) {
                        return Err(invalid());
                    }
                    config.time_format = value.to_string();
                }
                "color" => config.color = ColorMode::from_str(value).ok_or_else(invalid)?,
                other => log::debug!("ignoring unknown config key '{}'", other),
            }
        }

        Ok(config)
    }
}
