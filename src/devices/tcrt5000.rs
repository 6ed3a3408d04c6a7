//! TCRT5000 reflectance sensor driver
//!
//! An infrared emitter/phototransistor pair: strong reflection (light
//! surface, close object) raises the analog output. Modules with an LM393
//! comparator also expose a digital output that goes high past a trimmer-set
//! threshold; bare modules only have the analog line.

use crate::platform::{
    traits::{AdcInterface, GpioInterface, GpioMode},
    Result,
};

/// Default detection threshold in raw counts (10-bit scale)
pub const DEFAULT_THRESHOLD: u16 = 500;

/// TCRT5000 on an analog input
pub struct Tcrt5000Analog<A> {
    adc: A,
}

impl<A: AdcInterface> Tcrt5000Analog<A> {
    /// Create a new driver over an ADC channel
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Raw reflectance in ADC counts
    pub fn read(&mut self) -> Result<u16> {
        self.adc.read()
    }

    /// True when reflectance exceeds `threshold`
    ///
    /// Thresholds are raw counts; `DEFAULT_THRESHOLD` assumes a 10-bit
    /// conversion range.
    pub fn is_detected(&mut self, threshold: u16) -> Result<bool> {
        Ok(self.read()? > threshold)
    }
}

/// TCRT5000 module with comparator, on a digital input
pub struct Tcrt5000Digital<P> {
    pin: P,
}

impl<P: GpioInterface> Tcrt5000Digital<P> {
    /// Create a new driver, forcing the pin to a no-pull input
    ///
    /// # Errors
    ///
    /// Propagates platform faults from pin configuration.
    pub fn new(mut pin: P) -> Result<Self> {
        pin.set_mode(GpioMode::Input)?;
        Ok(Self { pin })
    }

    /// True when the comparator reports strong reflection
    pub fn is_reflective(&self) -> bool {
        self.pin.read()
    }
}
