//! HTTP serving loop.
//!
//! # Responsibilities
//! - Accept connections and process them strictly one at a time
//! - Read each request under the size cap and the configured deadlines
//! - Dispatch to the router and command parser against the relay bank
//! - Write the single response and close the connection
//!
//! # Design Decisions
//! - No per-connection tasks: one request is fully read, acted upon, and
//!   answered before the next accept, so the bank needs no locking
//! - The size cap is enforced before any parsing; an oversized request is
//!   answered with signal code 1 and the bank stays untouched
//! - A connection that never sends a byte is dropped without a response

use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::config::RelayConfig;
use crate::http::error::RequestError;
use crate::http::request::{self, Action};
use crate::http::response::{self, Outcome};
use crate::net::connection::ConnectionId;
use crate::net::listener::Listener;
use crate::relay::bank::RelayBank;
use crate::relay::command;
use crate::relay::driver::OutputDriver;

/// HTTP server over one relay bank.
pub struct HttpServer<D> {
    config: RelayConfig,
    bank: RelayBank<D>,
}

impl<D: OutputDriver> HttpServer<D> {
    /// Create a server for the given configuration and bank.
    pub fn new(config: RelayConfig, bank: RelayBank<D>) -> Self {
        Self { config, bank }
    }

    /// Run the sequential accept loop until the shutdown signal fires.
    pub async fn run(mut self, listener: Listener, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(relays = self.bank.len(), "HTTP server starting");

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, addr) = match accepted {
                        Ok(pair) => pair,
                        Err(e) => {
                            tracing::warn!(error = %e, "Accept failed");
                            continue;
                        }
                    };
                    let id = ConnectionId::new();
                    if let Err(e) = self.handle_connection(id, stream).await {
                        tracing::warn!(
                            connection_id = %id,
                            peer_addr = %addr,
                            error = %e,
                            "Connection aborted"
                        );
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, stopping accept loop");
                    return;
                }
            }
        }
    }

    async fn handle_connection(
        &mut self,
        id: ConnectionId,
        mut stream: TcpStream,
    ) -> std::io::Result<()> {
        let started = Instant::now();

        let buf = match self.read_request(&mut stream).await? {
            Some(buf) => buf,
            None => {
                tracing::debug!(connection_id = %id, "Client sent nothing, dropping");
                return Ok(());
            }
        };

        let (outcome, body) = self.dispatch(&buf);
        let reply = response::respond(outcome, &body);

        let write_deadline = Duration::from_millis(self.config.timeouts.write_ms);
        timeout(write_deadline, stream.write_all(&reply))
            .await
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "response write"))??;
        let _ = stream.shutdown().await;

        tracing::debug!(
            connection_id = %id,
            request_bytes = buf.len(),
            response_bytes = reply.len(),
            elapsed = ?started.elapsed(),
            "Request answered"
        );
        Ok(())
    }

    /// Read one request under the bounded-read discipline.
    ///
    /// The first bytes must arrive within the read deadline; afterwards the
    /// client gets a short drain window per chunk until EOF, silence, or
    /// the buffer passing the size cap. Returns `None` for a silent client.
    async fn read_request(&self, stream: &mut TcpStream) -> std::io::Result<Option<Vec<u8>>> {
        let max = self.config.limits.max_request_bytes;
        let read_deadline = Duration::from_millis(self.config.timeouts.read_ms);
        let drain_deadline = Duration::from_millis(self.config.timeouts.drain_ms);

        let mut buf = Vec::with_capacity(max.min(4096) + 1);
        let mut chunk = [0u8; 512];

        match timeout(read_deadline, stream.read(&mut chunk)).await {
            Ok(Ok(0)) | Err(_) => return Ok(None),
            Ok(Ok(n)) => buf.extend_from_slice(&chunk[..n]),
            Ok(Err(e)) => return Err(e),
        }

        while buf.len() <= max {
            match timeout(drain_deadline, stream.read(&mut chunk)).await {
                Ok(Ok(0)) | Err(_) => break,
                Ok(Ok(n)) => buf.extend_from_slice(&chunk[..n]),
                Ok(Err(e)) => return Err(e),
            }
        }

        Ok(Some(buf))
    }

    /// Turn one raw request buffer into the response outcome and body.
    fn dispatch(&mut self, buf: &[u8]) -> (Outcome, String) {
        if buf.len() > self.config.limits.max_request_bytes {
            return self.reject(RequestError::RequestTooLarge);
        }

        let action = match request::route(buf) {
            Ok(action) => action,
            Err(e) => return self.reject(e),
        };

        match action {
            Action::About => (Outcome::Ok, response::render_version()),
            Action::Status => (Outcome::Ok, response::render_status(self.bank.snapshot())),
            Action::Apply(payload) => match command::apply_commands(payload, &mut self.bank) {
                Ok(()) => (Outcome::Ok, response::render_status(self.bank.snapshot())),
                Err(e) => self.reject(e),
            },
        }
    }

    fn reject(&self, err: RequestError) -> (Outcome, String) {
        tracing::debug!(code = err.code(), error = %err, "Request rejected");
        (Outcome::Error, response::render_error(err))
    }
}
