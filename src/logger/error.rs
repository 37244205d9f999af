//! Errors raised while building or reconfiguring a logger.
//!
//! Logging calls themselves never return errors.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("failed to open log output: {0}")]
    Sink(#[from] std::io::Error),

    #[error("a global logger is already installed")]
    GlobalAlreadySet(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

pub type LoggerResult<T> = Result<T, LoggerError>;
