#![cfg_attr(not(test), no_std)]

//! pico_sense - pulse-timing sensor drivers for Raspberry Pi Pico
//!
//! This library provides platform abstraction and drivers for sensors that
//! communicate through timed digital-pin pulses: HC-SR04 ultrasonic ranging
//! (single sensor and shared-trigger arrays), an NEC infrared remote receiver
//! with a continuous background decode loop, and simple analog threshold
//! sensors (TCRT5000 reflectance, HS0147 ambient light).
//!
//! Drivers are written against the traits in `platform::traits` and run
//! unmodified on the Pico 2 W (`pico2_w` feature) or against the host-test
//! mocks in `platform::mock`.

// Platform abstraction layer
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core infrastructure (logging, shared-state traits)
pub mod core;
