//! End-to-end formatted logging of requests and other arguments.

use std::collections::BTreeMap;
use std::io::{self, Read};

use arglog::http::{ReadBody, RequestSnapshot};
use arglog::{LogArg, Severity};
use axum::http::Request;
use serde_json::{json, Value};

mod common;

fn google_post() -> Request<ReadBody> {
    Request::post("http://google.com")
        .header("Content-Type", "application/json")
        .header("User-Agent", "Rust-Client")
        .header("Referer", "http://localhost")
        .header("Host", "example.com")
        .body(ReadBody::from("request body data"))
        .unwrap()
}

#[test]
fn test_request_is_logged_and_body_survives() {
    let (logger, sink) = common::capture_logger(Severity::Info);
    let mut request = google_post();

    logger.infof("request: {}", [LogArg::request(&mut request)]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let payload: Value = serde_json::from_str(common::payload_after(&lines[0], "request: ")).unwrap();

    assert_eq!(payload["method"], "POST");
    assert_eq!(payload["url"], "http://google.com");
    assert_eq!(payload["body"], "request body data");
    assert_eq!(payload["headers"]["Content-Type"], json!(["application/json"]));
    assert_eq!(payload["headers"]["User-Agent"], json!(["Rust-Client"]));

    // The real consumer can still read the body.
    assert_eq!(
        request.body_mut().read_to_string_lossy().unwrap(),
        "request body data"
    );
}

/// Yields `data` once, then the connection drops.
struct DropsAfter(Option<&'static [u8]>);

impl Read for DropsAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.take() {
            Some(data) => {
                buf[..data.len()].copy_from_slice(data);
                Ok(data.len())
            }
            None => Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away")),
        }
    }
}

#[test]
fn test_body_read_failure_is_logged_inline() {
    let (logger, sink) = common::capture_logger(Severity::Info);
    let mut request = Request::post("http://x")
        .body(ReadBody::new(DropsAfter(Some(b"partial"))))
        .unwrap();

    logger.infof("r: {}", [LogArg::request(&mut request)]);

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let payload: Value = serde_json::from_str(common::payload_after(&lines[0], "r: ")).unwrap();
    assert_eq!(payload["method"], "POST");
    assert_eq!(payload["url"], "http://x");
    assert_eq!(payload["body"], "error reading body: peer went away");

    // Bytes read before the failure go back to the consumer.
    assert_eq!(request.body_mut().read_to_string_lossy().unwrap(), "partial");
}

#[test]
fn test_repeated_capture_is_identical() {
    let (logger, sink) = common::capture_logger(Severity::Info);
    let mut request = google_post();

    logger.infof("first: {}", [LogArg::request(&mut request)]);
    logger.infof("second: {}", [LogArg::request(&mut request)]);

    let lines = sink.lines();
    let first: RequestSnapshot =
        serde_json::from_str(common::payload_after(&lines[0], "first: ")).unwrap();
    let second: RequestSnapshot =
        serde_json::from_str(common::payload_after(&lines[1], "second: ")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.body, "request body data");
}

#[test]
fn test_filtered_level_still_restores_body() {
    let (logger, sink) = common::capture_logger(Severity::Error);
    let mut request = google_post();

    logger.debugf("request: {}", [LogArg::request(&mut request)]);

    assert!(sink.text().is_empty());
    assert_eq!(
        request.body_mut().read_to_string_lossy().unwrap(),
        "request body data"
    );
}

#[test]
fn test_mixed_arguments() {
    fn register(_id: i32, _name: String) -> Result<(), std::io::Error> {
        Ok(())
    }

    let (logger, sink) = common::capture_logger(Severity::Info);
    let mut tags = BTreeMap::new();
    tags.insert("region", "eu");
    let missing: Option<&u64> = None;

    logger.warnf(
        "handler={} tags={} parent={} retries={}",
        [
            LogArg::callable(&register),
            LogArg::value(&tags),
            LogArg::reference(missing),
            LogArg::reference(Some(&3)),
        ],
    );

    let text = sink.text();
    assert!(text.contains("WARN"));
    assert!(text.contains(
        r#"handler=func(i32, String) (Result<(), Error>) tags={"region":"eu"} parent=nil pointer retries=3"#
    ));
}

#[test]
fn test_plain_form_does_not_transform() {
    let (logger, sink) = common::capture_logger(Severity::Info);
    let name = "bob";

    logger.info(format_args!("user {name}"));
    logger.infof("user {}", [LogArg::value(&name)]);

    let lines = sink.lines();
    assert!(lines[0].ends_with("user bob"));
    assert!(lines[1].ends_with("user \"bob\""));
}
