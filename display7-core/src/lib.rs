//! Board-agnostic core logic for the seven-segment display stack
//!
//! This crate contains everything that does not depend on hardware:
//!
//! - Segment bitmask encoding for hex digits ([`segments`])
//! - Control-surface character translation ([`translate`])
//! - Display instance configuration and validation ([`config`])

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod segments;
pub mod translate;

// Re-export key items at crate root for convenience
pub use config::{ClassConfig, ConfigError, DisplayConfig, MAX_DISPLAYS, MAX_LABEL_LEN};
pub use segments::{lookup, SegmentError, Segments, SEGMENT_COUNT, SEGMENT_TABLE};
pub use translate::{digit_ascii, digit_value, BLANK, FALLBACK_DIGIT};
