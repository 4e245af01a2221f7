//! Request failure taxonomy.
//!
//! Every rejected request maps to exactly one numeric signal code, chosen
//! by the first rule it violates. The code is the only detail that crosses
//! the wire, inside a `{"e":<code>}` body; the variants exist so callers
//! and logs can stay typed.

use thiserror::Error;

/// Terminal failure for one request cycle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Request exceeded the configured size cap before parsing began.
    #[error("request larger than the configured maximum")]
    RequestTooLarge,

    /// First bytes matched neither `GET ` nor `POST`.
    #[error("method is not GET or POST")]
    UnsupportedMethod,

    /// Command payload shorter than the shortest valid form (`0=1`).
    #[error("command payload too short")]
    CommandTooShort,

    /// Relay index missing, non-numeric, too wide, or out of range.
    #[error("relay index out of range or malformed")]
    BadRelayIndex,

    /// Operation value is not a single byte in `0`..=`2`.
    #[error("operation value invalid")]
    BadOperation,

    /// Payload does not match the `index=op[&index=op...]` grammar.
    #[error("command does not match the expected grammar")]
    MalformedRequest,
}

impl RequestError {
    /// Numeric signal code reported to the client.
    pub fn code(&self) -> u8 {
        match self {
            RequestError::RequestTooLarge => 1,
            RequestError::UnsupportedMethod => 2,
            RequestError::CommandTooShort => 3,
            RequestError::BadRelayIndex => 4,
            RequestError::BadOperation => 5,
            RequestError::MalformedRequest => 6,
        }
    }
}
