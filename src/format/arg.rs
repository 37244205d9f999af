//! Log arguments and their display strings.

use serde::Serialize;
use thiserror::Error;

use crate::format::signature::{FnSignature, Signature};
use crate::http::CaptureRequest;

/// Rendered for a [`LogArg::Reference`] that points at nothing.
pub const NIL_POINTER: &str = "nil pointer";

/// Why an argument fell back to a diagnostic string.
#[derive(Debug, Error)]
pub enum FormatFailure {
    #[error("error marshaling http request: {0}")]
    Request(#[source] serde_json::Error),

    #[error("error marshaling arg: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("error reading body: {0}")]
    BodyRead(#[from] std::io::Error),
}

/// Object-safe JSON encoding, implemented for every `Serialize` type.
pub trait JsonArg {
    fn to_json(&self) -> serde_json::Result<String>;
}

impl<T: Serialize + ?Sized> JsonArg for T {
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One argument of a formatted log call.
pub enum LogArg<'a> {
    /// An HTTP request. Its body is drained and restored during formatting.
    Request(&'a mut dyn CaptureRequest),
    /// A function value, rendered as its signature.
    Callable(Signature),
    /// An optional reference; `None` renders [`NIL_POINTER`].
    Reference(Option<&'a dyn JsonArg>),
    /// Any serializable value.
    Value(&'a dyn JsonArg),
}

impl<'a> LogArg<'a> {
    pub fn request<R: CaptureRequest>(request: &'a mut R) -> Self {
        LogArg::Request(request)
    }

    pub fn callable<F, Args, Ret>(f: &F) -> Self
    where
        F: FnSignature<Args, Ret>,
    {
        LogArg::Callable(Signature::of(f))
    }

    pub fn reference<T: Serialize>(value: Option<&'a T>) -> Self {
        LogArg::Reference(value.map(|v| v as &dyn JsonArg))
    }

    pub fn value<T: Serialize>(value: &'a T) -> Self {
        LogArg::Value(value)
    }

    /// The display string for this argument. Never fails.
    pub fn transform(self) -> String {
        match self {
            LogArg::Request(request) => {
                let snapshot = request.capture();
                serde_json::to_string(&snapshot)
                    .unwrap_or_else(|e| FormatFailure::Request(e).to_string())
            }
            LogArg::Callable(signature) => signature.to_string(),
            LogArg::Reference(None) => NIL_POINTER.to_string(),
            LogArg::Reference(Some(value)) | LogArg::Value(value) => value
                .to_json()
                .unwrap_or_else(|e| FormatFailure::Serialization(e).to_string()),
        }
    }
}

impl std::fmt::Debug for LogArg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogArg::Request(_) => f.write_str("Request(..)"),
            LogArg::Callable(signature) => f.debug_tuple("Callable").field(signature).finish(),
            LogArg::Reference(None) => f.write_str("Reference(None)"),
            LogArg::Reference(Some(_)) => f.write_str("Reference(Some(..))"),
            LogArg::Value(_) => f.write_str("Value(..)"),
        }
    }
}
