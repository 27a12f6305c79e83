//! Lifecycle and control surface for seven-segment displays
//!
//! This crate ties the display engine to a host platform through two
//! narrow collaborator traits:
//!
//! - [`PinProvider`] - claims and releases the digital output lines
//! - [`ControlHost`] - publishes the per-display `digit` endpoint
//!
//! [`DisplayClass`] is the registry in between: it attaches instances
//! from validated hardware descriptions (all-or-nothing), routes
//! control-surface reads and writes by label, and detaches with the
//! endpoint unregistered before any pin is released.

#![no_std]
#![deny(unsafe_code)]

pub mod class;
pub mod host;
pub mod provider;

// Re-export key types at crate root for convenience
pub use class::{AccessError, AttachError, DetachError, DisplayClass};
pub use host::{ControlHost, RegisterError};
pub use provider::{ClaimError, PinProvider};
