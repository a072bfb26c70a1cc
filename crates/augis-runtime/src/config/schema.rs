//! Configuration schema definitions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use augis_command::{CommandParser, DEFAULT_DELIMITER};
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AugisConfig {
    /// Command link settings.
    #[serde(default)]
    pub link: LinkConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for a serial command link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Character separating prefix from data.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Longest accepted line in bytes, terminator excluded.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Accept lines whose delimiter is followed by nothing.
    #[serde(default = "default_allow_empty_data")]
    pub allow_empty_data: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            max_line_length: default_max_line_length(),
            allow_empty_data: default_allow_empty_data(),
        }
    }
}

impl LinkConfig {
    /// Builds the command parser described by this configuration.
    pub fn parser(&self) -> CommandParser {
        CommandParser::new(self.delimiter).allow_empty_data(self.allow_empty_data)
    }
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_max_line_length() -> usize {
    256
}

fn default_allow_empty_data() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Output destination.
    #[serde(default)]
    pub output: LogOutput,

    /// Log file path, required when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Per-module level overrides, e.g. `augis_runtime = "debug"`.
    #[serde(default)]
    pub filters: BTreeMap<String, LogLevel>,

    /// Include thread IDs.
    #[serde(default)]
    pub thread_ids: bool,

    /// Include source file and line number.
    #[serde(default)]
    pub file_location: bool,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-line codec events.
    Trace,
    /// Every command sent and received.
    Debug,
    /// Link start and stop.
    #[default]
    Info,
    /// Rejected lines and dropped replies.
    Warn,
    /// Link failures only.
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One short line per event.
    #[default]
    Compact,
    /// The default `tracing-subscriber` format.
    Full,
    /// Multi-line, human-oriented output.
    Pretty,
    /// Needs the `json-log` feature; falls back to `full` without it.
    Json,
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// The file at `logging.file_path`.
    File,
}
