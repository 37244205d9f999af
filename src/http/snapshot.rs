//! Request snapshots for log output.

use std::collections::BTreeMap;

use axum::http::{HeaderMap, Request, Uri};
use serde::{Deserialize, Serialize};

use crate::format::FormatFailure;
use crate::http::body::{BodyGuard, RestorableBody};

/// Read-only view of a request: `{method, url, headers, body}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub method: String,
    pub url: String,
    /// Canonical header name to every value, in insertion order.
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

impl RequestSnapshot {
    /// Capture `request`, draining its body and putting the same bytes back.
    pub fn capture<B: RestorableBody>(request: &mut Request<B>) -> Self {
        let method = request.method().as_str().to_string();
        let url = render_uri(request.uri());
        let headers = collect_headers(request.headers());

        let mut guard = BodyGuard::new(request.body_mut());
        let body = match guard.drain() {
            Ok(text) => text,
            Err(e) => FormatFailure::BodyRead(e).to_string(),
        };
        drop(guard);

        Self {
            method,
            url,
            headers,
            body,
        }
    }
}

/// Anything the formatter can take a [`RequestSnapshot`] from.
pub trait CaptureRequest {
    fn capture(&mut self) -> RequestSnapshot;
}

impl<B: RestorableBody> CaptureRequest for Request<B> {
    fn capture(&mut self) -> RequestSnapshot {
        RequestSnapshot::capture(self)
    }
}

/// `scheme://authority` followed by the path and query. A bare root path on
/// an absolute URI is dropped, so `http://google.com` renders unchanged.
fn render_uri(uri: &Uri) -> String {
    let mut out = String::new();
    if let Some(scheme) = uri.scheme_str() {
        out.push_str(scheme);
        out.push_str("://");
    }
    if let Some(authority) = uri.authority() {
        out.push_str(authority.as_str());
    }

    let bare_root = uri.authority().is_some() && uri.path() == "/" && uri.query().is_none();
    if !bare_root {
        out.push_str(uri.path());
        if let Some(query) = uri.query() {
            out.push('?');
            out.push_str(query);
        }
    }
    out
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        out.entry(canonical_header_key(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    out
}

/// `content-type` → `Content-Type`.
pub fn canonical_header_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}
