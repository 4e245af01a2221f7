//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (sequential read loop, size cap, deadlines)
//!     → request.rs (method classification, payload extraction)
//!     → [relay::command applies mutations]
//!     → response.rs (status line, JSON body)
//!     → Send to client, close
//! ```
//!
//! The wire surface is a deliberately tiny HTTP/1.1 subset: two methods,
//! two JSON body shapes, fixed headers, one request per connection.

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::RequestError;
pub use server::HttpServer;
