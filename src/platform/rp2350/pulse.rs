//! RP2350 pulse-capturing input implementation
//!
//! Uses an `embassy-rp` `Flex` pin so the pull state can be reconfigured at
//! runtime, and `embassy-time` level waits for the edge timing. Waiting
//! suspends only the calling task.

use embassy_rp::gpio::{Flex, Pull};
use embassy_time::{with_deadline, Duration, Instant};

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode, PinLevel, PulseInput},
    Result,
};

/// RP2350 pulse-capturing input pin
pub struct Rp2350PulseInput {
    pin: Flex<'static>,
    mode: GpioMode,
}

impl Rp2350PulseInput {
    /// Wrap a HAL pin as a no-pull input
    ///
    /// ```ignore
    /// use embassy_rp::gpio::Flex;
    /// use pico_sense::platform::rp2350::Rp2350PulseInput;
    ///
    /// let p = embassy_rp::init(Default::default());
    /// let echo = Rp2350PulseInput::new(Flex::new(p.PIN_3));
    /// ```
    pub fn new(mut pin: Flex<'static>) -> Self {
        pin.set_as_input();
        pin.set_pull(Pull::None);
        Self {
            pin,
            mode: GpioMode::Input,
        }
    }
}

impl GpioInterface for Rp2350PulseInput {
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
        self.pin.is_high()
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        let pull = match mode {
            GpioMode::Input => Pull::None,
            GpioMode::InputPullUp => Pull::Up,
            GpioMode::InputPullDown => Pull::Down,
            _ => return Err(PlatformError::Gpio(GpioError::InvalidMode)),
        };
        self.pin.set_pull(pull);
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

impl PulseInput for Rp2350PulseInput {
    async fn pulse_in(&mut self, level: PinLevel, timeout_us: u32) -> Option<u32> {
        // One deadline bounds both phases: reaching the level and leaving it
        let deadline = Instant::now() + Duration::from_micros(timeout_us as u64);

        match level {
            PinLevel::High => {
                with_deadline(deadline, self.pin.wait_for_high()).await.ok()?;
                let start = Instant::now();
                with_deadline(deadline, self.pin.wait_for_low()).await.ok()?;
                Some(start.elapsed().as_micros() as u32)
            }
            PinLevel::Low => {
                with_deadline(deadline, self.pin.wait_for_low()).await.ok()?;
                let start = Instant::now();
                with_deadline(deadline, self.pin.wait_for_high()).await.ok()?;
                Some(start.elapsed().as_micros() as u32)
            }
        }
    }
}
