//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod adc;
pub mod gpio;
pub mod pulse;
pub mod timer;

// Re-export trait interfaces
pub use adc::AdcInterface;
pub use gpio::{GpioInterface, GpioMode};
pub use pulse::{PinLevel, PulseInput};
pub use timer::TimerInterface;
