//! Mock ADC implementation for testing

use crate::platform::{
    error::{AdcError, PlatformError},
    traits::AdcInterface,
    Result,
};

/// Mock ADC channel
///
/// Returns a settable raw count; can be switched into a failing state to
/// exercise fault propagation.
#[derive(Debug)]
pub struct MockAdc {
    value: u16,
    failing: bool,
}

impl MockAdc {
    /// Create a new mock channel reading `value`
    pub fn new(value: u16) -> Self {
        Self {
            value,
            failing: false,
        }
    }

    /// Change the raw count returned by subsequent reads
    pub fn set_value(&mut self, value: u16) {
        self.value = value;
    }

    /// Make subsequent reads fail
    pub fn set_failing(&mut self) {
        self.failing = true;
    }
}

impl AdcInterface for MockAdc {
    fn read(&mut self) -> Result<u16> {
        if self.failing {
            Err(PlatformError::Adc(AdcError::ReadFailed))
        } else {
            Ok(self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_configured_value() {
        let mut adc = MockAdc::new(700);
        assert_eq!(adc.read().unwrap(), 700);

        adc.set_value(12);
        assert_eq!(adc.read().unwrap(), 12);
    }

    #[test]
    fn failing_channel_reports_error() {
        let mut adc = MockAdc::new(0);
        adc.set_failing();
        assert_eq!(adc.read(), Err(PlatformError::Adc(AdcError::ReadFailed)));
    }
}
