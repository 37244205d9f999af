//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the filter directive parses before the engine sees it
//! - Validate value ranges (body limit > 0, non-empty paths)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::{LoggerConfig, OutputConfig};
use crate::logger::Severity;

/// A single semantic problem found in a [`LoggerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("timestamp_format must not be empty")]
    EmptyTimestampFormat,

    #[error("output.path must not be empty for file output")]
    EmptyOutputPath,

    #[error("http.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("http.level must not be {0}: request logging would end the process")]
    TerminatingHttpLevel(Severity),

    #[error("invalid filter directive {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timestamp_format.trim().is_empty() {
        errors.push(ValidationError::EmptyTimestampFormat);
    }

    if let OutputConfig::File { path } = &config.output {
        if path.trim().is_empty() {
            errors.push(ValidationError::EmptyOutputPath);
        }
    }

    if config.http.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if matches!(config.http.level, Severity::Fatal | Severity::Panic) {
        errors.push(ValidationError::TerminatingHttpLevel(config.http.level));
    }

    if let Some(directive) = &config.filter {
        if let Err(e) = EnvFilter::try_new(directive) {
            errors.push(ValidationError::InvalidFilter {
                directive: directive.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LoggerConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = LoggerConfig::default();
        config.timestamp_format = "  ".into();
        config.output = OutputConfig::File { path: String::new() };
        config.http.max_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyTimestampFormat,
                ValidationError::EmptyOutputPath,
                ValidationError::ZeroBodyLimit,
            ]
        );
    }

    #[test]
    fn test_rejects_terminating_http_level() {
        let mut config = LoggerConfig::default();
        config.http.level = Severity::Panic;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::TerminatingHttpLevel(Severity::Panic)]);
    }

    #[test]
    fn test_rejects_bad_filter() {
        let config = LoggerConfig {
            filter: Some("arglog=loud".into()),
            ..LoggerConfig::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::InvalidFilter { .. }));
    }
}
