//! Mock pulse-capturing input for testing
//!
//! Replays a scripted sequence of pulse widths: each `pulse_in` call consumes
//! the next entry. Scripts let tests simulate an echo return, a sensor
//! timeout, or an entire NEC frame edge by edge.

use std::collections::VecDeque;

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode, PinLevel, PulseInput},
    Result,
};

/// Mock pulse-capturing input
///
/// Script entries are consumed in order, one per `pulse_in` call:
///
/// - `push_pulse(d)`: the next measurement observes a `d` µs pulse. If `d`
///   exceeds the caller's timeout the pulse does not complete within the
///   bound, so the measurement reports a timeout (the entry is still
///   consumed).
/// - `push_timeout()`: the next measurement observes no edge at all.
///
/// An exhausted script behaves like an idle line: every further measurement
/// times out.
#[derive(Debug)]
pub struct MockPulse {
    mode: GpioMode,
    idle_high: bool,
    script: VecDeque<Option<u32>>,
}

impl MockPulse {
    /// Create a new mock input (no pull) with an empty script
    pub fn new() -> Self {
        Self {
            mode: GpioMode::Input,
            idle_high: false,
            script: VecDeque::new(),
        }
    }

    /// Append a pulse of `duration_us` to the script
    pub fn push_pulse(&mut self, duration_us: u32) {
        self.script.push_back(Some(duration_us));
    }

    /// Append a missing edge (measurement timeout) to the script
    pub fn push_timeout(&mut self) {
        self.script.push_back(None);
    }

    /// Set the idle level reported by `read`
    pub fn set_idle_high(&mut self, high: bool) {
        self.idle_high = high;
    }

    /// Number of unconsumed script entries
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Default for MockPulse {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioInterface for MockPulse {
    fn set_high(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn set_low(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn toggle(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidMode))
    }

    fn read(&self) -> bool {
        self.idle_high
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        match mode {
            GpioMode::Input | GpioMode::InputPullUp | GpioMode::InputPullDown => {
                self.mode = mode;
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

impl PulseInput for MockPulse {
    async fn pulse_in(&mut self, _level: PinLevel, timeout_us: u32) -> Option<u32> {
        match self.script.pop_front() {
            Some(Some(duration)) if duration <= timeout_us => Some(duration),
            // Scripted timeout, or a pulse that outlasts the bound
            Some(_) => None,
            // Script exhausted: idle line
            None => None,
        }
    }
}
