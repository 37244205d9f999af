//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the logger.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::logger::Severity;

/// Default timestamp layout, e.g. `2024-05-01 13:37:00`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Root configuration for a [`Logger`](crate::Logger).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity that reaches the sink.
    pub level: Severity,

    /// Optional `EnvFilter` directive (e.g. `"my_app=debug,hyper=warn"`).
    /// Takes precedence over `level` when set.
    pub filter: Option<String>,

    /// Let `RUST_LOG` override both `level` and `filter`.
    pub env_override: bool,

    /// strftime-style layout used for the timestamp column.
    pub timestamp_format: String,

    /// ANSI color policy.
    pub color: ColorMode,

    /// Include the event target (module path) in each line.
    pub with_target: bool,

    /// Where log lines are written.
    pub output: OutputConfig,

    /// Request logging middleware settings.
    pub http: HttpLogConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            filter: None,
            env_override: true,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            color: ColorMode::Always,
            with_target: false,
            output: OutputConfig::Stderr,
            http: HttpLogConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// The directive handed to the engine's filter when `RUST_LOG` is not used.
    pub fn filter_directive(&self) -> String {
        match &self.filter {
            Some(directive) => directive.clone(),
            None => self.level.as_filter().to_string(),
        }
    }
}

/// ANSI color policy for the text formatter.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Always emit color codes, whatever the sink.
    #[default]
    Always,
    /// Never emit color codes.
    Never,
    /// Emit color codes only when stderr is a terminal.
    Auto,
}

/// Output sink target.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputConfig {
    #[default]
    Stderr,
    Stdout,
    /// Append to a file, creating it if needed.
    File { path: String },
}

/// Settings for [`log_requests`](crate::http::log_requests).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpLogConfig {
    /// Largest request body buffered for logging, in bytes.
    pub max_body_bytes: usize,

    /// Severity used for request lines.
    pub level: Severity,
}

impl Default for HttpLogConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
            level: Severity::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: LoggerConfig = toml::from_str("").unwrap();
        assert_eq!(config, LoggerConfig::default());
        assert_eq!(config.timestamp_format, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.output, OutputConfig::Stderr);
    }

    #[test]
    fn test_parse_full_config() {
        let config: LoggerConfig = toml::from_str(
            r#"
            level = "print"
            filter = "arglog=trace"
            env_override = false
            color = "never"
            with_target = true

            [output]
            kind = "file"
            path = "/tmp/app.log"

            [http]
            max_body_bytes = 1024
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.level, Severity::Print);
        assert_eq!(config.color, ColorMode::Never);
        assert_eq!(
            config.output,
            OutputConfig::File {
                path: "/tmp/app.log".into()
            }
        );
        assert_eq!(config.http.max_body_bytes, 1024);
        assert_eq!(config.http.level, Severity::Debug);
        assert_eq!(config.filter_directive(), "arglog=trace");
    }

    #[test]
    fn test_filter_directive_falls_back_to_level() {
        let config = LoggerConfig {
            level: Severity::Fatal,
            ..LoggerConfig::default()
        };
        assert_eq!(config.filter_directive(), "error");
    }
}
