//! Relay domain subsystem.
//!
//! # Data Flow
//! ```text
//! command payload (raw bytes)
//!     → command.rs (segment scan, validation, signal codes)
//!     → bank.rs (state mirror, idempotent level changes)
//!     → driver.rs (physical line writes)
//! ```
//!
//! # Design Decisions
//! - The bank is the only mutable domain state and is threaded through
//!   call sites explicitly; no process-wide singleton
//! - Validation and mutation interleave per segment, so earlier segments
//!   take effect even when a later one is rejected

pub mod bank;
pub mod command;
pub mod driver;

pub use bank::RelayBank;
pub use command::RelayOp;
pub use driver::{Level, LoggingDriver, OutputDriver};
