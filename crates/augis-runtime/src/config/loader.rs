//! Layered configuration loading with figment.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Programmatic base values ([`ConfigLoader::merge`])
//! 3. Profile-specific config file (`augis.{profile}.toml`)
//! 4. Main config file (`augis.toml`, or `config.toml`)
//! 5. Environment variables (`AUGIS_*`)
//!
//! # Environment Variable Mapping
//!
//! Environment variables use the `AUGIS_` prefix with `__` as separator:
//!
//! - `AUGIS_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `AUGIS_LINK__MAX_LINE_LENGTH=64` → `link.max_line_length = 64`
//!
//! # Example
//!
//! ```rust,ignore
//! use augis_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("/etc/augis/augis.toml")
//!     .profile("production")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::AugisConfig;
use super::validation::validate_config;

/// Configuration profile for environment-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    /// `development` or `dev`.
    #[default]
    Development,
    /// `production` or `prod`.
    Production,
    /// Any other name, lowercased.
    Custom(String),
}

impl Profile {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Reads `AUGIS_PROFILE`, defaulting to development.
    pub fn from_env() -> Self {
        std::env::var("AUGIS_PROFILE")
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layered configuration loader.
pub struct ConfigLoader {
    /// Programmatic values merged over the defaults.
    figment: Figment,
    /// Selects the `augis.{profile}.toml` file.
    profile: Profile,
    /// Directories searched for config files.
    search_paths: Vec<PathBuf>,
    /// Whether `AUGIS_*` variables are merged last.
    load_env: bool,
    /// Explicit file that replaces the search.
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skips `AUGIS_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges programmatic values over the built-in defaults.
    ///
    /// Files and environment variables still override them.
    pub fn merge(mut self, config: AugisConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads, validates and returns the configuration.
    pub fn load(self) -> ConfigResult<AugisConfig> {
        let profile = self.profile.clone();
        let figment = self.build_figment()?;

        let config: AugisConfig = figment.extract()?;
        validate_config(&config)?;

        debug!(
            profile = %profile,
            delimiter = ?config.link.delimiter,
            logging_level = %config.logging.level,
            "Configuration loaded"
        );

        Ok(config)
    }

    fn build_figment(mut self) -> ConfigResult<Figment> {
        let user_figment = std::mem::take(&mut self.figment);
        let mut figment =
            Figment::from(Serialized::defaults(AugisConfig::default())).merge(user_figment);

        if let Some(path) = self.config_file.take() {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            info!(path = %path.display(), "Loading configuration file");
            figment = Self::merge_config_file(figment, &path)?;
        } else {
            figment = self.load_config_files(figment);
        }

        if self.load_env {
            trace!("Loading environment variables with AUGIS_ prefix");
            figment = figment.merge(Env::prefixed("AUGIS_").ignore(&["PROFILE"]).split("__"));
        }

        Ok(figment)
    }

    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            _ => Err(ConfigError::ParseError(format!(
                "Unsupported or disabled configuration file format: .{ext}"
            ))),
        }
    }

    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }

        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("augis"));
        }
        paths
    }

    /// Merges the first `augis.toml` / `config.toml` found, preceded by its
    /// profile-specific sibling if present.
    #[cfg(feature = "toml-config")]
    fn load_config_files(&self, mut figment: Figment) -> Figment {
        for search_path in self.resolve_search_paths() {
            for stem in ["augis", "config"] {
                let profile_path =
                    search_path.join(format!("{stem}.{}.toml", self.profile.as_str()));
                if profile_path.exists() {
                    debug!(path = %profile_path.display(), "Loading profile-specific config");
                    figment = figment.merge(Toml::file(&profile_path));
                }

                let base_path = search_path.join(format!("{stem}.toml"));
                if base_path.exists() {
                    info!(path = %base_path.display(), "Loading configuration file");
                    return figment.merge(Toml::file(&base_path));
                }
            }
        }

        warn!("No configuration file found, using defaults");
        figment
    }

    #[cfg(not(feature = "toml-config"))]
    fn load_config_files(&self, figment: Figment) -> Figment {
        trace!(paths = ?self.resolve_search_paths(), "No file formats enabled, skipping search");
        figment
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<AugisConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from one file plus environment overrides.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<AugisConfig> {
    ConfigLoader::new().file(path).load()
}
