//! Replaceable output sink.
//!
//! # Responsibilities
//! - Hand the engine a writer per log line
//! - Allow the destination to be swapped while other threads are logging
//!
//! # Design Decisions
//! - The current writer lives behind an `ArcSwap`; a line in flight keeps the
//!   writer it started with
//! - A poisoned writer mutex is recovered; logging never fails on it

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::OutputConfig;

type BoxedWriter = Box<dyn Write + Send>;
type Slot = Arc<Mutex<BoxedWriter>>;

/// Shared handle to the current output destination.
#[derive(Clone)]
pub struct SharedSink {
    current: Arc<ArcSwap<Mutex<BoxedWriter>>>,
}

impl SharedSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            current: Arc::new(ArcSwap::new(slot(writer))),
        }
    }

    /// Redirect subsequent lines to `writer`. The previous writer is flushed.
    pub fn replace(&self, writer: impl Write + Send + 'static) {
        let previous = self.current.swap(slot(writer));
        // A failed flush is dropped: redirecting output never fails.
        let _ = lock(&previous).flush();
    }

    /// Redirect subsequent lines to a configured target.
    pub fn replace_with_target(&self, target: &OutputConfig) -> io::Result<()> {
        match target {
            OutputConfig::Stderr => self.replace(io::stderr()),
            OutputConfig::Stdout => self.replace(io::stdout()),
            OutputConfig::File { path } => self.replace(open_append(path)?),
        }
        Ok(())
    }

    /// Build a sink for a configured target.
    pub fn from_target(target: &OutputConfig) -> io::Result<Self> {
        Ok(match target {
            OutputConfig::Stderr => Self::new(io::stderr()),
            OutputConfig::Stdout => Self::new(io::stdout()),
            OutputConfig::File { path } => Self::new(open_append(path)?),
        })
    }
}

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSink").finish_non_exhaustive()
    }
}

fn open_append(path: &str) -> io::Result<std::fs::File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn slot(writer: impl Write + Send + 'static) -> Slot {
    let writer: BoxedWriter = Box::new(writer);
    Arc::new(Mutex::new(writer))
}

fn lock(slot: &Mutex<BoxedWriter>) -> MutexGuard<'_, BoxedWriter> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer handed to the engine for a single line.
pub struct SinkWriter {
    slot: Slot,
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.slot).write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        lock(&self.slot).write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.slot).flush()
    }
}

impl<'a> MakeWriter<'a> for SharedSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter {
            slot: self.current.load_full(),
        }
    }
}
