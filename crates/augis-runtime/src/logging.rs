//! Logging setup on `tracing` and `tracing-subscriber`.
//!
//! ```rust,ignore
//! use augis_runtime::config::load_config;
//! use augis_runtime::logging;
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging)?;
//! ```
//!
//! Or by hand:
//!
//! ```rust,ignore
//! use augis_runtime::logging::LoggingBuilder;
//! use tracing::Level;
//!
//! LoggingBuilder::new()
//!     .with_level(Level::DEBUG)
//!     .directive("augis_command=trace")
//!     .init();
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig};
use crate::error::{RuntimeError, RuntimeResult};

/// Initializes the global subscriber from a [`LoggingConfig`].
///
/// Fails if a global subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) -> RuntimeResult<()> {
    LoggingBuilder::from_config(config)
        .try_init()
        .map_err(|e| RuntimeError::Logging(e.to_string()))
}

/// A builder for the global tracing subscriber.
#[derive(Debug)]
pub struct LoggingBuilder {
    /// Extra `EnvFilter` directives.
    directives: Vec<String>,
    /// Base level when `RUST_LOG` is unset.
    level: tracing::Level,
    /// Line format.
    format: LogFormat,
    /// Destination.
    output: LogOutput,
    /// Include the event target.
    with_target: bool,
    /// Include thread IDs.
    with_thread_ids: bool,
    /// Include source file and line.
    source_location: bool,
    /// Log file for [`LogOutput::File`].
    file_path: Option<PathBuf>,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    pub fn new() -> Self {
        Self {
            directives: Vec::new(),
            level: tracing::Level::INFO,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            with_target: true,
            with_thread_ids: false,
            source_location: false,
            file_path: None,
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut builder = Self::new()
            .with_level(config.level.to_tracing_level())
            .format(config.format)
            .output(config.output)
            .with_thread_ids(config.thread_ids)
            .with_source_location(config.file_location);

        builder.file_path.clone_from(&config.file_path);

        for (module, level) in &config.filters {
            builder = builder.directive(&format!("{module}={level}"));
        }

        builder
    }

    /// Sets the base level, used when `RUST_LOG` is not set.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Adds a filter directive such as `augis_runtime=debug`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }

    /// Includes the source file and line of each event.
    pub fn with_source_location(mut self, enabled: bool) -> Self {
        self.source_location = enabled;
        self
    }

    /// Sets the log file used with [`LogOutput::File`].
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base = self.level.to_string().to_lowercase();
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base));

        for directive in &self.directives {
            match directive.parse() {
                Ok(d) => filter = filter.add_directive(d),
                Err(e) => eprintln!("Ignoring invalid log directive '{directive}': {e}"),
            }
        }

        filter
    }

    /// Installs the subscriber, ignoring an already-installed one.
    pub fn init(self) {
        let _ = self.try_init();
    }

    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();
        let (target, thread_ids, location) =
            (self.with_target, self.with_thread_ids, self.source_location);

        macro_rules! styled {
            ($layer:expr) => {
                $layer
                    .with_target(target)
                    .with_thread_ids(thread_ids)
                    .with_file(location)
                    .with_line_number(location)
            };
        }

        macro_rules! install {
            ($writer:expr) => {{
                let registry = tracing_subscriber::registry().with(filter);
                match self.format {
                    LogFormat::Compact => registry
                        .with(styled!(fmt::layer().compact()).with_writer($writer))
                        .try_init(),
                    LogFormat::Pretty => registry
                        .with(styled!(fmt::layer().pretty()).with_writer($writer))
                        .try_init(),
                    #[cfg(feature = "json-log")]
                    LogFormat::Json => registry
                        .with(fmt::layer().json().with_writer($writer))
                        .try_init(),
                    #[cfg(not(feature = "json-log"))]
                    LogFormat::Json | LogFormat::Full => registry
                        .with(styled!(fmt::layer()).with_writer($writer))
                        .try_init(),
                    #[cfg(feature = "json-log")]
                    LogFormat::Full => registry
                        .with(styled!(fmt::layer()).with_writer($writer))
                        .try_init(),
                }
            }};
        }

        match self.output {
            LogOutput::Stdout => install!(std::io::stdout),
            LogOutput::Stderr => install!(std::io::stderr),
            LogOutput::File => match self.file_path.as_deref() {
                Some(path) => {
                    let dir = path.parent().unwrap_or_else(|| Path::new("."));
                    let name = path.file_name().unwrap_or_else(|| OsStr::new("augis.log"));
                    install!(tracing_appender::rolling::never(dir, name))
                }
                None => {
                    let result = install!(std::io::stderr);
                    warn!("File output requested without a file path, logging to stderr");
                    result
                }
            },
        }
    }
}
