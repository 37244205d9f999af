//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use arglog::config::ColorMode;
use arglog::{Logger, LoggerConfig, Severity};

/// In-memory sink that can be read back after logging.
#[derive(Clone, Default)]
pub struct CaptureSink(Arc<Mutex<Vec<u8>>>);

impl CaptureSink {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    #[allow(dead_code)]
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Plain-text config that ignores `RUST_LOG`.
pub fn test_config(level: Severity) -> LoggerConfig {
    LoggerConfig {
        level,
        env_override: false,
        color: ColorMode::Never,
        ..LoggerConfig::default()
    }
}

/// A logger at `level` writing into a fresh capture sink.
pub fn capture_logger(level: Severity) -> (Logger, CaptureSink) {
    let sink = CaptureSink::default();
    let logger = Logger::builder()
        .config(test_config(level))
        .output(sink.clone())
        .build()
        .expect("test logger");
    (logger, sink)
}

/// The JSON payload following `marker` in a log line.
#[allow(dead_code)]
pub fn payload_after<'a>(line: &'a str, marker: &str) -> &'a str {
    let start = line.find(marker).expect("marker in line") + marker.len();
    line[start..].trim_end()
}
