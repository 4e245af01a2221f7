//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse args → Load config → Validate → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c → broadcast signal → accept loop stops → Exit
//! ```
//!
//! A request in flight when the signal arrives is answered before the
//! loop observes the signal; there is nothing else to drain.

pub mod shutdown;

pub use shutdown::Shutdown;
