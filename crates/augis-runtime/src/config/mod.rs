//! Configuration for the command link and logging.
//!
//! ```toml
//! [link]
//! delimiter = ":"
//! max_line_length = 256
//! allow_empty_data = true
//!
//! [logging]
//! level = "info"
//! output = "stderr"
//! filters = { augis_runtime = "debug" }
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{AugisConfig, LinkConfig, LogFormat, LogLevel, LogOutput, LoggingConfig};
pub use validation::validate_config;
