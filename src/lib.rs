//! Argument-aware logging over `tracing`.
//!
//! `Logger` exposes one plain and one formatted entry point per severity.
//! Formatted calls take [`LogArg`]s and turn each into a string before the
//! line reaches the engine: values become JSON, HTTP requests become a
//! snapshot of method, URL, headers and body (with the body put back), and
//! functions become their signature.
//!
//! ```no_run
//! use arglog::{LogArg, Logger, LoggerConfig};
//! use arglog::http::ReadBody;
//!
//! let logger = Logger::from_config(LoggerConfig::default())?;
//!
//! let mut request = axum::http::Request::post("http://google.com")
//!     .header("content-type", "application/json")
//!     .body(ReadBody::from("request body data"))?;
//!
//! logger.infof("request: {}", [LogArg::request(&mut request)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod format;
pub mod http;
pub mod logger;

pub use config::LoggerConfig;
pub use format::LogArg;
pub use logger::{Logger, LoggerError, Severity};
