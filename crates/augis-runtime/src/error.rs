//! Runtime error types.

use augis_command::CommandError;
use thiserror::Error;

use crate::config::ConfigError;

/// A single inbound line that was dropped.
///
/// These never end a link; the line is logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineRejected {
    /// The line grew past the configured maximum before a newline arrived.
    #[error("line exceeds {max} bytes")]
    TooLong {
        /// The configured maximum line length.
        max: usize,
    },

    /// The line could not be split into prefix and data.
    #[error("malformed command line {line:?}: {source}")]
    Malformed {
        /// The offending line, without terminator.
        line: String,
        /// Why parsing failed.
        #[source]
        source: CommandError,
    },
}

/// Errors that end a command link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Reading from or writing to the underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An outbound command cannot be written as one line.
    #[error("command cannot be encoded: {reason}")]
    Unencodable {
        /// Why the command was refused.
        reason: String,
    },
}

impl LinkError {
    pub(crate) fn unencodable(reason: impl Into<String>) -> Self {
        Self::Unencodable {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during runtime operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The command link failed.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// Logging was already initialized.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
