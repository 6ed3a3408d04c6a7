//! Bounded pulse-width measurement trait
//!
//! Both subsystems in this crate are built on the same primitive: measure how
//! long a digital input holds a given logic level, bounded by a timeout. The
//! HC-SR04 echo line encodes distance as a high-pulse width; an NEC infrared
//! stream encodes bits as alternating low/high pulse widths.
//!
//! ## Usage
//!
//! ```ignore
//! use pico_sense::platform::traits::{PinLevel, PulseInput};
//!
//! async fn echo_width<P: PulseInput>(echo: &mut P) -> Option<u32> {
//!     // High-level duration, bounded at 400 cm round trip
//!     echo.pulse_in(PinLevel::High, 400 * 58).await
//! }
//! ```

use super::GpioInterface;

/// Logic level targeted by a pulse measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    /// Logic level 0
    Low,
    /// Logic level 1
    High,
}

/// Pulse-capturing digital input
///
/// Implementations suspend only the calling task while waiting; other tasks
/// on the executor keep running. The measurement is level-triggered: if the
/// pin already holds the requested level when called, timing starts
/// immediately, otherwise it starts when the level is first reached.
#[allow(async_fn_in_trait)]
pub trait PulseInput: GpioInterface {
    /// Measure how long the pin holds `level`, in microseconds
    ///
    /// Blocks the calling task until the pin transitions away from `level`
    /// after first reaching it, or until `timeout_us` elapses.
    ///
    /// Returns `None` if no complete pulse was observed within the timeout.
    /// A timeout is an expected outcome (nothing in range, no transmission),
    /// not a fault.
    async fn pulse_in(&mut self, level: PinLevel, timeout_us: u32) -> Option<u32>;
}
