//! Hardware drivers for seven-segment displays
//!
//! Implementations are generic over [`embedded_hal::digital::OutputPin`]
//! so the same engine runs on any chip HAL and against mock pins in host
//! tests:
//!
//! - [`PinArray`] - ordered collection of output pins, driven as one bulk
//!   operation from a segment bitmask
//! - [`SevenSegment`] - one display instance: pin array plus the last
//!   accepted digit

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod pin_array;

// Re-export key types at crate root for convenience
pub use display::SevenSegment;
pub use pin_array::{DriveError, PinArray};
