//! HTTP Relay Bank Controller Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
