//! Logger handle and its delegation onto `tracing`.
//!
//! # Data Flow
//! ```text
//! Logger::<level>(message)                 → handle.rs emits as-is
//! Logger::<level>f(format, args)           → format module → handle.rs
//!     → tracing event on the logger's own Dispatch
//!     → tracing-subscriber fmt layer (filter, timestamp, colors)
//!     → sink.rs SharedSink → current writer
//! ```

pub mod error;
pub mod handle;
pub mod severity;
pub mod sink;

pub use error::{LoggerError, LoggerResult};
pub use handle::{ExitHook, Logger, LoggerBuilder};
pub use severity::{ParseSeverityError, Severity};
pub use sink::SharedSink;
