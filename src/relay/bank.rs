//! Relay state bookkeeping.
//!
//! # Responsibilities
//! - Mirror the physical line states in memory
//! - Apply validated operations and push the resulting level to the driver
//! - Expose a snapshot for status rendering
//!
//! # Design Decisions
//! - Fixed size after construction; starts all-off
//! - OFF and ON skip the hardware write when the relay is already in state;
//!   INVERT always writes
//! - No locking: requests are processed strictly one at a time

use crate::relay::command::RelayOp;
use crate::relay::driver::{Level, OutputDriver};

/// The bank of relays behind the server.
///
/// Index order matches the status rendering order. The hardware line for
/// relay `i` is `lines[i]` from the configured mapping.
pub struct RelayBank<D> {
    states: Vec<bool>,
    lines: Vec<u8>,
    driver: D,
}

impl<D: OutputDriver> RelayBank<D> {
    /// Create an all-off bank over the given hardware line mapping.
    ///
    /// Lines are not driven here; bringing the hardware to a known level at
    /// power-up is the pin initialization collaborator's job.
    pub fn new(lines: Vec<u8>, driver: D) -> Self {
        Self {
            states: vec![false; lines.len()],
            lines,
            driver,
        }
    }

    /// Number of relays in the bank.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Set relay `index` to `on` and drive its line.
    ///
    /// Total for `0 <= index < len()`; callers validate the index first.
    pub fn set(&mut self, index: usize, on: bool) {
        self.states[index] = on;
        self.driver.write(self.lines[index], Level::from_on(on));
    }

    /// Apply one validated operation to relay `index`.
    pub fn apply(&mut self, index: usize, op: RelayOp) {
        match op {
            RelayOp::Off => {
                if self.states[index] {
                    self.set(index, false);
                }
            }
            RelayOp::On => {
                if !self.states[index] {
                    self.set(index, true);
                }
            }
            RelayOp::Invert => {
                let next = !self.states[index];
                self.set(index, next);
            }
        }
    }

    /// Current state of every relay, in index order.
    pub fn snapshot(&self) -> &[bool] {
        &self.states
    }
}
