//! Shared utilities for integration testing.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use relayd::config::RelayConfig;
use relayd::http::HttpServer;
use relayd::lifecycle::Shutdown;
use relayd::net::Listener;
use relayd::relay::{LoggingDriver, RelayBank};

/// Config bound to an ephemeral loopback port with test-friendly deadlines.
pub fn test_config() -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.timeouts.drain_ms = 50;
    config
}

/// Start a server on an ephemeral port.
///
/// Returns the bound address and the shutdown coordinator; dropping the
/// coordinator leaves the task to die with the test runtime.
pub async fn start_server(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let bank = RelayBank::new(config.relays.lines.clone(), LoggingDriver);
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config, bank);

    tokio::spawn(async move {
        server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Send raw request bytes, half-close the write side, and read the full
/// response. The server speaks `Connection: close`, so EOF ends it.
pub async fn send_raw(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

/// Slice the body off a response.
pub fn body_of(response: &str) -> &str {
    response.split("\r\n\r\n").nth(1).unwrap_or("")
}
