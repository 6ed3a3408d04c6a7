//! RP2350 ADC implementation
//!
//! Blocking single-channel conversions over the `embassy-rp` ADC peripheral.

use embassy_rp::adc::{Adc, Blocking, Channel};

use crate::platform::{
    error::{AdcError, PlatformError},
    traits::AdcInterface,
    Result,
};

/// RP2350 ADC channel
pub struct Rp2350Adc {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
}

impl Rp2350Adc {
    /// Wrap an ADC peripheral and one of its channels
    ///
    /// ```ignore
    /// use embassy_rp::adc::{Adc, Channel, Config};
    /// use embassy_rp::gpio::Pull;
    /// use pico_sense::platform::rp2350::Rp2350Adc;
    ///
    /// let p = embassy_rp::init(Default::default());
    /// let adc = Adc::new_blocking(p.ADC, Config::default());
    /// let channel = Channel::new_pin(p.PIN_26, Pull::None);
    /// let light_in = Rp2350Adc::new(adc, channel);
    /// ```
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AdcInterface for Rp2350Adc {
    fn read(&mut self) -> Result<u16> {
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| PlatformError::Adc(AdcError::ReadFailed))
    }
}
