//! The logger handle.
//!
//! # Responsibilities
//! - Build the engine (fmt subscriber, filter, timer, colors) from a config
//! - Expose one plain and one formatted entry point per severity
//! - Redirect output at runtime
//!
//! # Design Decisions
//! - The handle owns its own `Dispatch` instead of relying on a global
//!   subscriber; installing it globally is opt-in
//! - Formatted calls always transform their arguments, even when filtered out,
//!   so request bodies are handled the same way at every level

use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::config::{
    validate_config, ColorMode, ConfigError, HttpLogConfig, LoggerConfig, OutputConfig,
};
use crate::format::{format_message, LogArg};
use crate::logger::error::LoggerResult;
use crate::logger::severity::Severity;
use crate::logger::sink::SharedSink;

/// Called with exit code 1 after a fatal line is written.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

fn exit_process(code: i32) {
    std::process::exit(code)
}

/// Configures and builds a [`Logger`].
pub struct LoggerBuilder {
    config: LoggerConfig,
    output: Option<Box<dyn Write + Send>>,
    exit: Option<ExitHook>,
}

impl LoggerBuilder {
    fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            output: None,
            exit: None,
        }
    }

    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Write to `writer` instead of the configured output target.
    pub fn output(mut self, writer: impl Write + Send + 'static) -> Self {
        self.output = Some(Box::new(writer));
        self
    }

    /// Replace `std::process::exit` for fatal calls.
    pub fn exit_hook(mut self, hook: impl Fn(i32) + Send + Sync + 'static) -> Self {
        self.exit = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> LoggerResult<Logger> {
        validate_config(&self.config).map_err(ConfigError::Validation)?;

        let filter = build_filter(&self.config)?;
        let (sink, terminal) = match self.output {
            Some(writer) => (SharedSink::new(writer), false),
            None => (
                SharedSink::from_target(&self.config.output)?,
                is_terminal(&self.config.output),
            ),
        };
        let ansi = match self.config.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => terminal,
        };

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(ChronoLocal::new(self.config.timestamp_format.clone()))
            .with_ansi(ansi)
            .with_target(self.config.with_target)
            .with_writer(sink.clone())
            .finish();

        Ok(Logger {
            dispatch: Dispatch::new(subscriber),
            sink,
            exit: self.exit.unwrap_or_else(|| Arc::new(exit_process)),
            http: self.config.http,
        })
    }
}

/// Injected writers and files are never terminals.
fn is_terminal(target: &OutputConfig) -> bool {
    match target {
        OutputConfig::Stderr => io::stderr().is_terminal(),
        OutputConfig::Stdout => io::stdout().is_terminal(),
        OutputConfig::File { .. } => false,
    }
}

fn build_filter(config: &LoggerConfig) -> LoggerResult<EnvFilter> {
    if config.env_override {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
    }
    Ok(EnvFilter::try_new(config.filter_directive())?)
}

/// Cloneable handle to a configured logging engine and its output sink.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    sink: SharedSink,
    exit: ExitHook,
    http: HttpLogConfig,
}

macro_rules! severity_methods {
    ($($severity:ident => $plain:ident, $formatted:ident;)*) => {
        $(
            #[doc = concat!("Log `message` at ", stringify!($plain), " severity, unmodified.")]
            pub fn $plain(&self, message: impl fmt::Display) {
                self.log(Severity::$severity, message)
            }

            #[doc = concat!("Log at ", stringify!($plain), " severity with transformed arguments.")]
            pub fn $formatted<'a>(&self, format: &str, args: impl IntoIterator<Item = LogArg<'a>>) {
                self.logf(Severity::$severity, format, args)
            }
        )*
    };
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Build a logger writing to the target named in `config`.
    pub fn from_config(config: LoggerConfig) -> LoggerResult<Self> {
        Self::builder().config(config).build()
    }

    severity_methods! {
        Trace => trace, tracef;
        Debug => debug, debugf;
        Info => info, infof;
        Print => print, printf;
        Warn => warn, warnf;
        Error => error, errorf;
        Fatal => fatal, fatalf;
    }

    /// Log `message` at panic severity, then panic with it.
    pub fn panic(&self, message: impl fmt::Display) -> ! {
        self.emit(Severity::Panic, &message);
        panic!("{message}")
    }

    /// Formatted form of [`Logger::panic`].
    pub fn panicf<'a>(&self, format: &str, args: impl IntoIterator<Item = LogArg<'a>>) -> ! {
        self.panic(format_message(format, args))
    }

    /// Log `message` at `severity`. Fatal runs the exit hook afterwards and
    /// panic unwinds.
    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        self.emit(severity, &message);
        match severity {
            Severity::Fatal => (self.exit)(1),
            Severity::Panic => panic!("{message}"),
            _ => {}
        }
    }

    /// Transform `args`, render them into `format` and log at `severity`.
    pub fn logf<'a>(
        &self,
        severity: Severity,
        format: &str,
        args: impl IntoIterator<Item = LogArg<'a>>,
    ) {
        self.log(severity, format_message(format, args))
    }

    /// Redirect subsequent output to `writer`.
    pub fn set_output(&self, writer: impl Write + Send + 'static) {
        self.sink.replace(writer);
    }

    /// Redirect subsequent output to a configured target.
    pub fn set_output_target(&self, target: &OutputConfig) -> LoggerResult<()> {
        self.sink.replace_with_target(target)?;
        Ok(())
    }

    /// Make this logger the process-wide `tracing` default.
    pub fn try_init_global(&self) -> LoggerResult<()> {
        dispatcher::set_global_default(self.dispatch.clone())?;
        Ok(())
    }

    /// Run `f` with this logger as the thread's default, so plain `tracing`
    /// macros inside it reach this logger's sink.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    pub fn http_config(&self) -> &HttpLogConfig {
        &self.http
    }

    fn emit(&self, severity: Severity, message: &dyn fmt::Display) {
        self.in_scope(|| match severity {
            Severity::Trace => tracing::trace!("{}", message),
            Severity::Debug => tracing::debug!("{}", message),
            Severity::Info | Severity::Print => tracing::info!("{}", message),
            Severity::Warn => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
            Severity::Fatal | Severity::Panic => {
                tracing::error!(severity = severity.as_str(), "{}", message)
            }
        })
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.sink)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}
