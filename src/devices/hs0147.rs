//! HS0147 ambient-light sensor driver
//!
//! A photoresistor divider on an analog input; brighter light reads higher.

use crate::platform::{traits::AdcInterface, Result};

/// Default brightness threshold in raw counts (10-bit scale)
pub const DEFAULT_THRESHOLD: u16 = 512;

/// HS0147 on an analog input
pub struct Hs0147Driver<A> {
    adc: A,
}

impl<A: AdcInterface> Hs0147Driver<A> {
    /// Create a new driver over an ADC channel
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Raw light level in ADC counts
    pub fn read(&mut self) -> Result<u16> {
        self.adc.read()
    }

    /// True when the light level exceeds `threshold`
    pub fn is_bright(&mut self, threshold: u16) -> Result<bool> {
        Ok(self.read()? > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockAdc;

    #[test]
    fn threshold_is_exclusive() {
        let mut sensor = Hs0147Driver::new(MockAdc::new(DEFAULT_THRESHOLD));
        assert!(!sensor.is_bright(DEFAULT_THRESHOLD).unwrap());

        let mut sensor = Hs0147Driver::new(MockAdc::new(DEFAULT_THRESHOLD + 1));
        assert!(sensor.is_bright(DEFAULT_THRESHOLD).unwrap());
    }

    #[test]
    fn fault_propagates() {
        let mut adc = MockAdc::new(0);
        adc.set_failing();

        let mut sensor = Hs0147Driver::new(adc);
        assert!(sensor.read().is_err());
        assert!(sensor.is_bright(DEFAULT_THRESHOLD).is_err());
    }
}
