//! Error types for command line parsing.

use std::fmt;

use thiserror::Error;

/// Errors produced when a line cannot be split into a prefix and data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line was empty.
    #[error("command line is empty")]
    EmptyInput,

    /// The line held nothing but delimiters.
    #[error("command line has no prefix")]
    MissingPrefix,

    /// No delimiter follows the prefix.
    #[error("no '{delimiter}' delimiter after the command prefix")]
    MissingDelimiter {
        /// The delimiter that was expected.
        delimiter: char,
    },

    /// The delimiter is followed by nothing but spaces.
    ///
    /// Only reported by parsers that reject empty payloads.
    #[error("command '{prefix}' carries no data")]
    EmptyData {
        /// The prefix that was parsed before the empty payload.
        prefix: String,
    },
}

impl CommandError {
    /// Returns the fieldless kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput => ErrorKind::EmptyInput,
            Self::MissingPrefix => ErrorKind::MissingPrefix,
            Self::MissingDelimiter { .. } => ErrorKind::MissingDelimiter,
            Self::EmptyData { .. } => ErrorKind::EmptyData,
        }
    }
}

/// Kinds of [`CommandError`], for logging and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`CommandError::EmptyInput`].
    EmptyInput,
    /// See [`CommandError::MissingPrefix`].
    MissingPrefix,
    /// See [`CommandError::MissingDelimiter`].
    MissingDelimiter,
    /// See [`CommandError::EmptyData`].
    EmptyData,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::MissingPrefix => "missing_prefix",
            Self::MissingDelimiter => "missing_delimiter",
            Self::EmptyData => "empty_data",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result type for command parsing.
pub type CommandResult<T> = Result<T, CommandError>;
