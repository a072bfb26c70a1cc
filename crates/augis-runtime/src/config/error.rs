//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating [`AugisConfig`](super::AugisConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("config file {0} does not exist")]
    FileNotFound(PathBuf),

    /// A file or environment value could not be read into the schema.
    #[error("cannot parse config: {0}")]
    ParseError(String),

    /// A value was read but is not usable.
    #[error("invalid config: {message}")]
    ValidationError {
        /// What is wrong with the value.
        message: String,
    },

    /// A setting required by another setting is absent.
    #[error("config field `{field}` is required")]
    MissingField {
        /// Dotted path of the missing setting.
        field: String,
    },
}

impl ConfigError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
