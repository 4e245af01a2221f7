//! Physical output line abstraction.
//!
//! # Responsibilities
//! - Decouple relay bookkeeping from how lines are actually driven
//! - Provide a logging driver for deployments without attached hardware
//!
//! # Design Decisions
//! - Single infallible write operation; retry/latch behavior belongs to
//!   the hardware backend, not the serving path
//! - Line numbers come from the configured mapping, not the relay index

/// Electrical level of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Relay released.
    Inactive,
    /// Relay energized.
    Active,
}

impl Level {
    /// Map a stored relay state to its line level.
    pub fn from_on(on: bool) -> Self {
        if on {
            Level::Active
        } else {
            Level::Inactive
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Inactive => write!(f, "inactive"),
            Level::Active => write!(f, "active"),
        }
    }
}

/// Sink for physical line writes.
pub trait OutputDriver: Send {
    /// Drive `line` to `level`.
    fn write(&mut self, line: u8, level: Level);
}

/// Driver that records every write through structured logging.
///
/// Stands in for a hardware backend when none is attached; a GPIO
/// character-device driver can be substituted at the same seam.
#[derive(Debug, Default)]
pub struct LoggingDriver;

impl OutputDriver for LoggingDriver {
    fn write(&mut self, line: u8, level: Level) {
        tracing::debug!(line, level = %level, "Output line written");
    }
}

/// Driver that captures writes so tests can observe hardware traffic.
///
/// Cloning shares the underlying log, letting a test keep a handle while
/// the bank owns the driver.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingDriver {
    writes: std::sync::Arc<std::sync::Mutex<Vec<(u8, Level)>>>,
}

#[cfg(test)]
impl RecordingDriver {
    pub fn writes(&self) -> Vec<(u8, Level)> {
        self.writes.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl OutputDriver for RecordingDriver {
    fn write(&mut self, line: u8, level: Level) {
        self.writes.lock().unwrap().push((line, level));
    }
}
