//! Timer interface trait
//!
//! This module defines the timing interface that platform implementations
//! must provide. Two kinds of waiting are deliberately separate: `delay_us`
//! is a busy-wait with microsecond precision for sensor excitation timing,
//! while `pause_ms` suspends only the calling task and lets the rest of the
//! executor run, which is what inter-sample spacing wants.

use crate::platform::Result;

/// Timer interface trait
///
/// # Safety Invariants
///
/// - Microsecond-level precision required for `delay_us`
/// - Monotonic time source (never goes backwards)
#[allow(async_fn_in_trait)]
pub trait TimerInterface {
    /// Busy-wait for the specified number of microseconds
    ///
    /// Blocks execution for at least `us` microseconds. Intended for short,
    /// precise waits (trigger pulse shaping); not for long pauses.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay operation fails.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Cooperatively pause the calling task for `ms` milliseconds
    ///
    /// Suspends only the calling task; unrelated tasks keep running.
    async fn pause_ms(&mut self, ms: u32);

    /// Get current time in microseconds
    ///
    /// Returns a monotonic timestamp in microseconds since platform
    /// initialization.
    fn now_us(&self) -> u64;

    /// Get current time in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
