//! Device drivers
//!
//! This module contains device drivers that use platform abstraction traits,
//! so the same driver runs on the Pico 2 W and against host-test mocks.
//!
//! ## Modules
//!
//! - `hcsr04`: HC-SR04 ultrasonic ranging (single sensor)
//! - `hcsr04_array`: HC-SR04 array sharing one trigger pin
//! - `irm3636`: IRM-3636 infrared receiver with NEC decoding
//! - `tcrt5000`: TCRT5000 reflectance sensor
//! - `hs0147`: HS0147 ambient-light sensor

pub mod hcsr04;
pub mod hcsr04_array;
pub mod hs0147;
pub mod irm3636;
pub mod tcrt5000;
