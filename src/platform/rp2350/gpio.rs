//! RP2350 GPIO output implementation
//!
//! Wraps an `embassy-rp` push-pull output to implement the `GpioInterface`
//! trait. Used for sensor trigger lines.

use embassy_rp::gpio::Output;

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};

/// RP2350 push-pull output pin
pub struct Rp2350Output {
    pin: Output<'static>,
}

impl Rp2350Output {
    /// Wrap an already-configured HAL output pin
    ///
    /// ```ignore
    /// use embassy_rp::gpio::{Level, Output};
    /// use pico_sense::platform::rp2350::Rp2350Output;
    ///
    /// let p = embassy_rp::init(Default::default());
    /// let trigger = Rp2350Output::new(Output::new(p.PIN_2, Level::Low));
    /// ```
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl GpioInterface for Rp2350Output {
    fn set_high(&mut self) -> Result<()> {
        self.pin.set_high();
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.pin.set_low();
        Ok(())
    }

    fn toggle(&mut self) -> Result<()> {
        self.pin.toggle();
        Ok(())
    }

    fn read(&self) -> bool {
        self.pin.is_set_high()
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        // An Output pin cannot be turned back into an input at this layer
        match mode {
            GpioMode::OutputPushPull => Ok(()),
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn mode(&self) -> GpioMode {
        GpioMode::OutputPushPull
    }
}
