//! RP2350 Timer implementation
//!
//! Backed by the `embassy-time` global time driver: `block_for` for
//! microsecond-precise busy-waits, `Timer::after` for cooperative pauses.

use embassy_time::{block_for, Duration, Instant, Timer};

use crate::platform::{traits::TimerInterface, Result};

/// RP2350 Timer implementation
#[derive(Debug, Default)]
pub struct Rp2350Timer;

impl Rp2350Timer {
    /// Create a new timer handle
    pub const fn new() -> Self {
        Self
    }
}

impl TimerInterface for Rp2350Timer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        block_for(Duration::from_micros(us as u64));
        Ok(())
    }

    async fn pause_ms(&mut self, ms: u32) {
        Timer::after(Duration::from_millis(ms as u64)).await;
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
