//! HTTP request support for the formatter.
//!
//! # Data Flow
//! ```text
//! http::Request<B: RestorableBody>
//!     → snapshot.rs (method, url, canonical headers)
//!     → body.rs BodyGuard (drain body, restore same bytes on drop)
//!     → RequestSnapshot → JSON in the log line
//!
//! axum::body::Body (streaming)
//!     → middleware.rs (buffer within limit → log → rebuild Body)
//!     → downstream handler
//! ```

pub mod body;
pub mod middleware;
pub mod snapshot;

pub use body::{ReadBody, RestorableBody};
pub use middleware::log_requests;
pub use snapshot::{canonical_header_key, CaptureRequest, RequestSnapshot};
