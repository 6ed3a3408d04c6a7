//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};

/// Mock Timer implementation
///
/// Keeps a virtual clock that advances by the requested amount on every
/// delay or pause, so tests can verify how long an operation would have
/// blocked without actually sleeping.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
}

impl MockTimer {
    /// Create a new mock timer at t = 0
    pub fn new() -> Self {
        Self { now_us: 0 }
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.now_us = self.now_us.wrapping_add(us as u64);
        Ok(())
    }

    async fn pause_ms(&mut self, ms: u32) {
        self.now_us = self.now_us.wrapping_add(ms as u64 * 1000);
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}
