//! Minimal TOML-subset parser for class configuration
//!
//! Handles only the subset needed to describe display instances. It does
//! NOT support the full TOML spec.
//!
//! Supported features:
//! - `[display.<label>]` section headers, one per instance
//! - `segments = [pin, pin, ...]` integer arrays
//! - Comments (# ...)
//!
//! Example of a valid configuration:
//!
//! ```text
//! [display.user:1]
//! segments = [15, 14, 8, 25, 24, 18, 23, 7]
//! ```
//!
//! The array lists output pin ids in segment order A, B, C, D, E, F, G,
//! DP; shorter arrays leave trailing segments unwired.

use heapless::{String, Vec};

use super::{ClassConfig, ConfigError, DisplayConfig, MAX_LABEL_LEN};
use crate::segments::SEGMENT_COUNT;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section header is not `[display.<label>]`
    InvalidSection,
    /// Malformed line or value
    InvalidValue,
    /// Pin entry is not an integer in 0..=255
    InvalidPin,
    /// Too many pins in one `segments` array
    TooManyItems,
    /// Parsed description failed validation
    Config(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Config(e)
    }
}

/// Display section currently being collected
struct Current {
    label: String<MAX_LABEL_LEN>,
    pins: Vec<u8, SEGMENT_COUNT>,
}

/// Parse a class configuration document
pub fn parse_config(input: &str) -> Result<ClassConfig, ParseError> {
    let mut config = ClassConfig::new();
    let mut current: Option<Current> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Section header starts the next instance
        if line.starts_with('[') && line.ends_with(']') {
            save_section(&mut config, current.take())?;
            current = Some(parse_section_header(&line[1..line.len() - 1])?);
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ParseError::InvalidValue);
        };

        let Some(section) = current.as_mut() else {
            // Key-value pair outside any section
            return Err(ParseError::InvalidValue);
        };

        match key.trim() {
            "segments" => section.pins = parse_pin_array(value.trim())?,
            // Unknown keys are ignored for forward compatibility
            _ => {}
        }
    }

    save_section(&mut config, current.take())?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Current, ParseError> {
    let label = header
        .strip_prefix("display.")
        .ok_or(ParseError::InvalidSection)?;

    if label.is_empty() {
        return Err(ParseError::InvalidSection);
    }

    let label =
        String::try_from(label).map_err(|_| ParseError::Config(ConfigError::LabelTooLong))?;

    Ok(Current {
        label,
        pins: Vec::new(),
    })
}

fn parse_pin_array(value: &str) -> Result<Vec<u8, SEGMENT_COUNT>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut pins = Vec::new();
    for entry in inner.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            // Tolerate a trailing comma
            continue;
        }

        let pin: u8 = entry.parse().map_err(|_| ParseError::InvalidPin)?;
        pins.push(pin).map_err(|_| ParseError::TooManyItems)?;
    }

    Ok(pins)
}

fn save_section(config: &mut ClassConfig, section: Option<Current>) -> Result<(), ParseError> {
    let Some(section) = section else {
        return Ok(());
    };

    let display = DisplayConfig::new(section.label.as_str(), &section.pins)?;
    config.push(display)?;
    Ok(())
}
