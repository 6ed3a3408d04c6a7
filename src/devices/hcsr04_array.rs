//! HC-SR04 array driver: several echo pins sharing one trigger pin
//!
//! Wiring multiple HC-SR04 modules to a single trigger line saves pins on
//! dense robot builds. Every module fires on the shared trigger; the driver
//! measures whichever echo line is selected by index. Measurements are one
//! sensor at a time; firing all modules and reading overlapping echoes is not
//! supported by the hardware.

use super::hcsr04::{NO_ECHO, US_PER_CM};
use crate::platform::{
    traits::{GpioInterface, GpioMode, PinLevel, PulseInput, TimerInterface},
    Result,
};

/// Shared-trigger HC-SR04 array
///
/// `N` is the number of echo lines. Readings are centimeters only.
pub struct Hcsr04Array<TRIG, ECHO, D, const N: usize> {
    trigger: TRIG,
    echoes: [ECHO; N],
    timer: D,
}

impl<TRIG, ECHO, D, const N: usize> Hcsr04Array<TRIG, ECHO, D, N>
where
    TRIG: GpioInterface,
    ECHO: PulseInput,
    D: TimerInterface,
{
    /// Create a new array driver
    ///
    /// Drives the shared trigger low and forces every echo line to a no-pull
    /// input, so an unselected floating line cannot couple into a
    /// measurement.
    ///
    /// # Errors
    ///
    /// Propagates platform faults from pin configuration.
    pub fn new(mut trigger: TRIG, mut echoes: [ECHO; N], timer: D) -> Result<Self> {
        trigger.set_low()?;
        for echo in &mut echoes {
            echo.set_mode(GpioMode::Input)?;
        }
        Ok(Self {
            trigger,
            echoes,
            timer,
        })
    }

    /// Measure distance in centimeters from the sensor at `index`
    ///
    /// An out-of-range index reads as `NO_ECHO`, like a sensor with nothing
    /// in range.
    ///
    /// # Errors
    ///
    /// Propagates platform faults. Timeouts are not faults.
    pub async fn measure(&mut self, index: usize, max_distance_cm: u32) -> Result<i32> {
        if index >= N {
            return Ok(NO_ECHO);
        }

        self.trigger.set_low()?;
        self.timer.delay_us(2)?;
        self.trigger.set_high()?;
        self.timer.delay_us(10)?;
        self.trigger.set_low()?;

        let timeout_us = max_distance_cm.saturating_mul(US_PER_CM);
        match self.echoes[index].pulse_in(PinLevel::High, timeout_us).await {
            Some(width) if width > 0 => {
                Ok(i32::try_from(width / US_PER_CM).unwrap_or(i32::MAX))
            }
            _ => Ok(NO_ECHO),
        }
    }

    /// Number of echo lines in the array
    pub const fn len(&self) -> usize {
        N
    }

    /// True when the array has no echo lines
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}
