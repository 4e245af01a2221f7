//! Request classification and payload extraction.
//!
//! # Responsibilities
//! - Classify the raw buffer as GET or POST by exact prefix match
//! - Slice out the GET path or the POST command payload
//! - Distinguish the query-string and body command forms
//!
//! # Design Decisions
//! - Fixed offsets and forward-only scans over the raw bytes; no header
//!   parsing, no Content-Length, no allocation
//! - Query form wins when byte 6 is `?`; any message body is then ignored
//!   (the primary client sends the command in the URL)
//! - Body form takes the last line-feed-separated line: headers precede
//!   the body, so the last line reaches it without parsing anything

use crate::http::error::RequestError;

/// How far past the `GET ` prefix the path scan may look.
const PATH_WINDOW: usize = 16;

/// Reserved path answered with the version payload.
const ABOUT_PATH: &[u8] = b"/about";

/// Offset of the query-string marker in `POST /?... HTTP/1.1`.
const QUERY_MARKER_AT: usize = 6;

/// What a classified request asks the server to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Report the relay bank status.
    Status,
    /// Report the build version.
    About,
    /// Apply the given command payload, then report status.
    Apply(&'a [u8]),
}

/// Classify one raw request buffer.
pub fn route(buf: &[u8]) -> Result<Action<'_>, RequestError> {
    if buf.starts_with(b"GET ") {
        return Ok(route_get(buf));
    }
    if buf.starts_with(b"POST") {
        return route_post(buf);
    }
    Err(RequestError::UnsupportedMethod)
}

/// Path token: the run after the 4-byte prefix up to the next space,
/// bounded to the lookahead window. Anything but `/about` reports status.
fn route_get(buf: &[u8]) -> Action<'_> {
    let start = 4;
    let window_end = (start + PATH_WINDOW).min(buf.len());
    let path_end = buf[start..window_end]
        .iter()
        .position(|&b| b == b' ')
        .map_or(window_end, |i| start + i);

    if &buf[start..path_end] == ABOUT_PATH {
        Action::About
    } else {
        Action::Status
    }
}

fn route_post(buf: &[u8]) -> Result<Action<'_>, RequestError> {
    if buf.get(QUERY_MARKER_AT) == Some(&b'?') {
        // Query-string form: the payload runs to the end of the request
        // line. Without the terminating space the line never ended.
        let start = QUERY_MARKER_AT + 1;
        let end = buf[start..]
            .iter()
            .position(|&b| b == b' ')
            .ok_or(RequestError::MalformedRequest)?;
        return Ok(Action::Apply(&buf[start..start + end]));
    }

    // Body form: the payload is the last line of the buffer. A stray
    // carriage return at the end is dropped so CR-terminated lines parse.
    let start = buf
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let mut line = &buf[start..];
    if line.last() == Some(&b'\r') {
        line = &line[..line.len() - 1];
    }
    Ok(Action::Apply(line))
}
