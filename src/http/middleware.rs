//! Request logging middleware for axum routers.
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/", post(handler))
//!     .layer(axum::middleware::from_fn_with_state(logger.clone(), log_requests));
//! ```

use std::error::Error;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;

use crate::format::LogArg;
use crate::logger::Logger;

/// Log each request as `request: <snapshot>` and pass it on with its body intact.
///
/// Bodies are buffered up to `http.max_body_bytes`. A body above the limit,
/// declared or streamed, is answered with `413`; any other read failure with `400`.
pub async fn log_requests(
    State(logger): State<Logger>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = logger.http_config().max_body_bytes;
    let severity = logger.http_config().level;

    if declared_length(&request).is_some_and(|len| len > limit) {
        logger.warnf(
            "request body over {} bytes rejected: {}",
            [LogArg::value(&limit), LogArg::value(&request.uri().to_string())],
        );
        return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
    }

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) if exceeded_limit(&e) => {
            logger.warnf(
                "request body over {} bytes rejected: {}",
                [LogArg::value(&limit), LogArg::value(&parts.uri.to_string())],
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
        }
        Err(e) => {
            logger.warnf("request body unreadable: {}", [LogArg::value(&e.to_string())]);
            return (StatusCode::BAD_REQUEST, "failed to read request body").into_response();
        }
    };

    let mut buffered = Request::from_parts(parts, bytes);
    logger.logf(severity, "request: {}", [LogArg::request(&mut buffered)]);

    let (parts, bytes) = buffered.into_parts();
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn declared_length<B>(request: &Request<B>) -> Option<usize> {
    request
        .headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn exceeded_limit(error: &(dyn Error + 'static)) -> bool {
    std::iter::successors(Some(error), |e| (*e).source()).any(|e| e.is::<LengthLimitError>())
}
