//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{AugisConfig, LinkConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &AugisConfig) -> ConfigResult<()> {
    validate_link_config(&config.link)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates link settings.
fn validate_link_config(link: &LinkConfig) -> ConfigResult<()> {
    // Line terminators would split every command in two
    if matches!(link.delimiter, '\n' | '\r') {
        return Err(ConfigError::validation(
            "Delimiter cannot be a line terminator",
        ));
    }

    if link.max_line_length == 0 {
        return Err(ConfigError::validation(
            "Max line length must be greater than 0",
        ));
    }

    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&AugisConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_newline_delimiter() {
        let mut config = AugisConfig::default();
        config.link.delimiter = '\n';
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_validate_space_delimiter_is_allowed() {
        let mut config = AugisConfig::default();
        config.link.delimiter = ' ';
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_line_length() {
        let mut config = AugisConfig::default();
        config.link.max_line_length = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_file_output_without_path() {
        let mut config = AugisConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { .. })
        ));

        config.logging.file_path = Some("augis.log".into());
        assert!(validate_config(&config).is_ok());
    }
}
