//! Request bodies that can be drained for logging and put back.
//!
//! # Responsibilities
//! - Read a body to the end without losing it for the real consumer
//! - Restore exactly the bytes that were read, exactly once
//!
//! # Design Decisions
//! - Restoration is tied to a guard's `Drop`, so every exit path restores
//! - Bytes read before a failure are still restored

use std::fmt;
use std::io::{self, Cursor, Read};

use axum::body::Bytes;

/// A request body the formatter can consume and re-materialize.
pub trait RestorableBody {
    /// Read the whole body into `buf`. Bytes read before an error stay in `buf`.
    fn drain_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()>;

    /// Replace the body with a fresh one yielding `bytes`.
    fn restore(&mut self, bytes: Bytes);
}

impl RestorableBody for Bytes {
    fn drain_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        buf.extend_from_slice(&std::mem::take(self));
        Ok(())
    }

    fn restore(&mut self, bytes: Bytes) {
        *self = bytes;
    }
}

impl RestorableBody for Vec<u8> {
    fn drain_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        buf.append(self);
        Ok(())
    }

    fn restore(&mut self, bytes: Bytes) {
        *self = bytes.to_vec();
    }
}

impl RestorableBody for String {
    fn drain_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        buf.extend_from_slice(std::mem::take(self).as_bytes());
        Ok(())
    }

    fn restore(&mut self, bytes: Bytes) {
        *self = String::from_utf8_lossy(&bytes).into_owned();
    }
}

/// No body at all.
impl RestorableBody for () {
    fn drain_into(&mut self, _buf: &mut Vec<u8>) -> io::Result<()> {
        Ok(())
    }

    fn restore(&mut self, _bytes: Bytes) {}
}

/// `None` is an absent body: nothing is read and nothing is restored.
impl<B: RestorableBody> RestorableBody for Option<B> {
    fn drain_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        match self {
            Some(body) => body.drain_into(buf),
            None => Ok(()),
        }
    }

    fn restore(&mut self, bytes: Bytes) {
        if let Some(body) = self {
            body.restore(bytes);
        }
    }
}

/// A streaming body backed by any reader. Reading it is destructive.
pub struct ReadBody {
    inner: Box<dyn Read + Send>,
}

impl ReadBody {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            inner: Box::new(reader),
        }
    }

    /// Read the rest of the stream into a string.
    pub fn read_to_string_lossy(&mut self) -> io::Result<String> {
        let mut buf = Vec::new();
        self.inner.read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl From<Bytes> for ReadBody {
    fn from(bytes: Bytes) -> Self {
        Self::new(Cursor::new(bytes))
    }
}

impl From<&'static str> for ReadBody {
    fn from(text: &'static str) -> Self {
        Self::from(Bytes::from_static(text.as_bytes()))
    }
}

impl Read for ReadBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl RestorableBody for ReadBody {
    fn drain_into(&mut self, buf: &mut Vec<u8>) -> io::Result<()> {
        self.inner.read_to_end(buf).map(|_| ())
    }

    fn restore(&mut self, bytes: Bytes) {
        self.inner = Box::new(Cursor::new(bytes));
    }
}

impl fmt::Debug for ReadBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadBody").finish_non_exhaustive()
    }
}

/// Drains a body and restores the captured bytes when dropped.
///
/// A guard that never drained leaves the body alone.
pub(crate) struct BodyGuard<'a, B: RestorableBody> {
    body: &'a mut B,
    captured: Option<Vec<u8>>,
}

impl<'a, B: RestorableBody> BodyGuard<'a, B> {
    pub(crate) fn new(body: &'a mut B) -> Self {
        Self {
            body,
            captured: None,
        }
    }

    /// Read the body to the end and return it as text.
    pub(crate) fn drain(&mut self) -> io::Result<String> {
        let captured = self.captured.get_or_insert_with(Vec::new);
        self.body.drain_into(captured)?;
        Ok(String::from_utf8_lossy(captured).into_owned())
    }
}

impl<B: RestorableBody> Drop for BodyGuard<'_, B> {
    fn drop(&mut self) {
        if let Some(captured) = self.captured.take() {
            self.body.restore(Bytes::from(captured));
        }
    }
}
