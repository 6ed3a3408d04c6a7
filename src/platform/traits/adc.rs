//! ADC interface trait
//!
//! Raw analog conversion for the threshold sensors. Values are raw counts;
//! no scaling or voltage translation happens at this layer.

use crate::platform::Result;

/// ADC channel interface trait
pub trait AdcInterface {
    /// Perform one conversion and return the raw count
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Adc(AdcError::ReadFailed)` if the conversion
    /// fails.
    fn read(&mut self) -> Result<u16>;
}
