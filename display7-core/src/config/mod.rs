//! Display instance configuration
//!
//! A display instance is described declaratively: a unique label plus an
//! ordered list of output pin ids, one per wired segment in the order
//! A, B, C, D, E, F, G, DP. Validation runs before any pin is claimed;
//! a configuration that fails validation never creates an instance.

mod toml;

pub use toml::{parse_config, ParseError};

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::segments::SEGMENT_COUNT;

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum display instances per class
pub const MAX_DISPLAYS: usize = 4;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Label is empty
    MissingLabel,
    /// Label exceeds [`MAX_LABEL_LEN`]
    LabelTooLong,
    /// Pin list is empty
    NoSegmentPins,
    /// Pin list exceeds [`SEGMENT_COUNT`] entries
    TooManySegmentPins,
    /// The pin id appears in more than one binding
    PinConflict(u8),
    /// Label already used by another instance
    DuplicateLabel,
    /// Exceeded [`MAX_DISPLAYS`] instances
    TooManyDisplays,
}

/// Hardware description of one display instance
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Unique instance name, also the control-surface endpoint name
    pub label: String<MAX_LABEL_LEN>,
    /// Output pin ids in segment order; position *i* drives segment *i*.
    /// Shorter lists are valid (e.g. no decimal point wired).
    pub segment_pins: Vec<u8, SEGMENT_COUNT>,
}

impl DisplayConfig {
    /// Create a validated display description
    pub fn new(label: &str, pins: &[u8]) -> Result<Self, ConfigError> {
        if label.is_empty() {
            return Err(ConfigError::MissingLabel);
        }

        let label = String::try_from(label).map_err(|_| ConfigError::LabelTooLong)?;

        if pins.is_empty() {
            return Err(ConfigError::NoSegmentPins);
        }

        let segment_pins =
            Vec::from_slice(pins).map_err(|_| ConfigError::TooManySegmentPins)?;

        let config = Self {
            label,
            segment_pins,
        };
        config.check_own_pins()?;
        Ok(config)
    }

    /// Number of wired segments
    pub fn segment_count(&self) -> usize {
        self.segment_pins.len()
    }

    /// Check whether this instance binds the given pin
    pub fn uses_pin(&self, pin: u8) -> bool {
        self.segment_pins.iter().any(|p| *p == pin)
    }

    /// Reject a pin id bound to two segments of the same instance
    fn check_own_pins(&self) -> Result<(), ConfigError> {
        for (index, pin) in self.segment_pins.iter().enumerate() {
            if self.segment_pins[..index].contains(pin) {
                return Err(ConfigError::PinConflict(*pin));
            }
        }
        Ok(())
    }
}

/// Complete class configuration: every display instance to attach
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassConfig {
    /// Display instance descriptions
    pub displays: Vec<DisplayConfig, MAX_DISPLAYS>,
}

impl ClassConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instance, enforcing the cross-instance invariants
    ///
    /// Labels must be unique and no two instances may bind the same pin.
    pub fn push(&mut self, display: DisplayConfig) -> Result<(), ConfigError> {
        if self.find(&display.label).is_some() {
            return Err(ConfigError::DuplicateLabel);
        }

        for pin in &display.segment_pins {
            if self.displays.iter().any(|d| d.uses_pin(*pin)) {
                return Err(ConfigError::PinConflict(*pin));
            }
        }

        self.displays
            .push(display)
            .map_err(|_| ConfigError::TooManyDisplays)
    }

    /// Find an instance description by label
    pub fn find(&self, label: &str) -> Option<&DisplayConfig> {
        self.displays.iter().find(|d| d.label.as_str() == label)
    }

    /// Re-run full validation
    ///
    /// [`push`](Self::push) keeps the invariants incrementally; this is
    /// for configurations built elsewhere (e.g. deserialized).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut checked = Self::new();
        for display in &self.displays {
            DisplayConfig::new(display.label.as_str(), &display.segment_pins)?;
            checked.push(display.clone())?;
        }
        Ok(())
    }
}
