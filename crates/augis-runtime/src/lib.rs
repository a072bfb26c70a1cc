//! AUGIS Runtime - the serial command link of the engine controller.
//!
//! This crate provides:
//! - A line codec turning a byte stream into [`ParsedCommand`]s ([`CommandCodec`])
//! - A framed link with counters ([`CommandLink`], [`LinkStats`])
//! - A serve loop feeding commands into a [`CommandSink`]
//! - Layered configuration ([`ConfigLoader`]) and logging setup
//!
//! ```ignore
//! use augis_runtime::{CommandLink, ConfigLoader, logging, serve};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging)?;
//!
//! let link = CommandLink::from_config(serial_port, &config.link);
//! serve(link, &mut my_sink, CancellationToken::new()).await?;
//! ```
//!
//! [`ParsedCommand`]: augis_command::ParsedCommand

pub mod codec;
pub mod config;
pub mod error;
pub mod link;
pub mod logging;
pub mod serve;

pub use codec::CommandCodec;
pub use config::{AugisConfig, ConfigError, ConfigLoader, ConfigResult, LinkConfig, LoggingConfig};
pub use error::{LineRejected, LinkError, LinkResult, RuntimeError, RuntimeResult};
pub use link::{CommandLink, LinkStats, StatsHandle};
pub use logging::LoggingBuilder;
pub use serve::{CommandSink, StopReason, serve};

// Re-exported so sinks and binaries share one version
pub use async_trait::async_trait;
pub use tokio_util::sync::CancellationToken;
pub use tracing;
