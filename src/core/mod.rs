//! Core infrastructure
//!
//! This module contains the pieces shared by every driver: the logging
//! macros and the synchronized-state abstraction used for the infrared
//! receiver's observer slot.

pub mod logging;
pub mod traits;
