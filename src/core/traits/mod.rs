//! Shared-state traits for platform-agnostic synchronized access.
//!
//! The infrared receiver's observer slot is written by the application and
//! read by the background decode loop; `SharedState` abstracts the guard so
//! the same driver code runs under Embassy's critical-section mutex on the
//! target and under a `RefCell` in host tests.

pub mod sync;

// Re-export traits and mock implementation (always available)
pub use sync::{MockState, SharedState};

// Re-export Embassy implementation when the embassy feature is enabled
#[cfg(feature = "embassy")]
pub use sync::EmbassyState;
