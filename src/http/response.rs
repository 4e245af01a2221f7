//! Response assembly.
//!
//! # Responsibilities
//! - Synthesize the HTTP status line and the fixed header block
//! - Render relay status, version, and error bodies as compact JSON
//!
//! # Design Decisions
//! - Hand-assembled text; no HTTP library on the serving path
//! - Only 200 and 500 are ever produced
//! - Error bodies carry the bare signal code and nothing else

use crate::http::error::RequestError;

/// Outcome framing for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
}

/// Build identifier reported by `GET /about`.
const BUILD_ID: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Status line plus the fixed headers, terminated by the blank line.
pub fn render_header(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Ok => {
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n"
        }
        Outcome::Error => {
            "HTTP/1.1 500 Internal Server Error\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n"
        }
    }
}

/// `{"r":["ON","OFF",...]}` in relay index order.
pub fn render_status(states: &[bool]) -> String {
    let mut body = String::with_capacity(8 + states.len() * 6);
    body.push_str("{\"r\":[");
    for (i, &on) in states.iter().enumerate() {
        if i > 0 {
            body.push(',');
        }
        body.push_str(if on { "\"ON\"" } else { "\"OFF\"" });
    }
    body.push_str("]}");
    body
}

/// `{"e":<code>}` with the bare decimal signal code.
pub fn render_error(err: RequestError) -> String {
    format!("{{\"e\":{}}}", err.code())
}

/// Fixed literal naming the running build.
pub fn render_version() -> String {
    format!("{{\"version\":\"{BUILD_ID}\"}}")
}

/// Full response bytes for one request outcome.
pub fn respond(outcome: Outcome, body: &str) -> Vec<u8> {
    let header = render_header(outcome);
    let mut out = Vec::with_capacity(header.len() + body.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(body.as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_all_off() {
        assert_eq!(
            render_status(&[false; 8]),
            r#"{"r":["OFF","OFF","OFF","OFF","OFF","OFF","OFF","OFF"]}"#
        );
    }

    #[test]
    fn status_body_mixed() {
        assert_eq!(
            render_status(&[true, false, true]),
            r#"{"r":["ON","OFF","ON"]}"#
        );
    }

    #[test]
    fn error_body_is_bare_code() {
        assert_eq!(render_error(RequestError::BadRelayIndex), r#"{"e":4}"#);
    }

    #[test]
    fn headers_are_fixed() {
        let ok = render_header(Outcome::Ok);
        assert!(ok.starts_with("HTTP/1.1 200 OK\r\n"));
        let err = render_header(Outcome::Error);
        assert!(err.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        for header in [ok, err] {
            assert!(header.contains("Content-Type: application/json\r\n"));
            assert!(header.contains("Connection: close\r\n"));
            assert!(header.ends_with("\r\n\r\n"));
        }
    }

    #[test]
    fn bodies_are_valid_json() {
        let status: serde_json::Value =
            serde_json::from_str(&render_status(&[true, false])).unwrap();
        assert_eq!(status["r"][0], "ON");
        assert_eq!(status["r"][1], "OFF");

        let error: serde_json::Value =
            serde_json::from_str(&render_error(RequestError::CommandTooShort)).unwrap();
        assert_eq!(error["e"], 3);

        let version: serde_json::Value =
            serde_json::from_str(&render_version()).unwrap();
        assert!(version["version"].as_str().unwrap().starts_with("relayd "));
    }
}
