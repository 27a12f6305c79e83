//! Display engine for one seven-segment instance
//!
//! A [`SevenSegment`] owns the pin array of one display plus the last
//! accepted digit. Showing a digit resolves the segment pattern and
//! drives the pins as one bulk operation; the digit is recorded only
//! after the pins were driven successfully, so a fault never leaves the
//! recorded value ahead of the glass.

use embedded_hal::digital::OutputPin;
use heapless::Vec;

use display7_core::segments::{lookup, SEGMENT_COUNT};
use display7_core::translate::{digit_ascii, digit_value, BLANK, FALLBACK_DIGIT};

use crate::pin_array::{DriveError, PinArray};

/// One seven-segment display instance
pub struct SevenSegment<P> {
    pins: PinArray<P>,
    /// ASCII of the last successfully shown digit; `None` until the
    /// first write
    digit: Option<u8>,
}

impl<P: OutputPin> SevenSegment<P> {
    /// Create an instance over its bound pins
    ///
    /// The display starts blank: nothing is driven until the first
    /// [`show`](Self::show) or [`write`](Self::write).
    pub fn new(pins: PinArray<P>) -> Self {
        Self { pins, digit: None }
    }

    /// Number of bound segment pins
    pub fn segment_count(&self) -> usize {
        self.pins.len()
    }

    /// Show a digit value 0..=15
    ///
    /// Resolves the segment pattern and drives the pins. On
    /// [`DriveError::OutOfRange`] nothing is driven; on
    /// [`DriveError::HardwareFault`] the recorded digit keeps its
    /// previous value and the instance stays usable for further
    /// attempts.
    pub fn show(&mut self, digit: u8) -> Result<(), DriveError> {
        let pattern = lookup(digit)?;
        self.pins.apply(pattern)?;
        self.digit = digit_ascii(digit);
        Ok(())
    }

    /// Control-surface write: act on the first payload byte
    ///
    /// The leading byte is translated through the accepted alphabet,
    /// with bytes outside it coerced to digit 8 (every segment lit).
    /// Remaining bytes are ignored, but the reported consumed length is
    /// the full payload length. An empty payload consumes nothing and
    /// drives nothing.
    pub fn write(&mut self, payload: &[u8]) -> Result<usize, DriveError> {
        let Some(first) = payload.first() else {
            return Ok(0);
        };

        let digit = digit_value(*first).unwrap_or(FALLBACK_DIGIT);
        self.show(digit)?;
        Ok(payload.len())
    }

    /// Control-surface read: the last accepted character
    ///
    /// Returns `b' '` before the first successful write. Never touches
    /// hardware.
    pub fn read(&self) -> u8 {
        self.digit.unwrap_or(BLANK)
    }

    /// Consume the instance and hand the pins back, in binding order
    pub fn into_pins(self) -> Vec<P, SEGMENT_COUNT> {
        self.pins.into_pins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug, PartialEq)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Mock pin with a limited number of successful writes
    struct FlakyPin {
        high: bool,
        writes_left: u8,
    }

    impl ErrorType for FlakyPin {
        type Error = PinFault;
    }

    impl OutputPin for FlakyPin {
        fn set_low(&mut self) -> Result<(), PinFault> {
            self.write(false)
        }

        fn set_high(&mut self) -> Result<(), PinFault> {
            self.write(true)
        }
    }

    impl FlakyPin {
        fn write(&mut self, high: bool) -> Result<(), PinFault> {
            if self.writes_left == 0 {
                return Err(PinFault);
            }
            self.writes_left -= 1;
            self.high = high;
            Ok(())
        }
    }

    fn display(writes_per_pin: u8) -> SevenSegment<FlakyPin> {
        let mut pins = Vec::new();
        for _ in 0..8 {
            let _ = pins.push(FlakyPin {
                high: false,
                writes_left: writes_per_pin,
            });
        }
        SevenSegment::new(PinArray::new(pins))
    }

    #[test]
    fn test_blank_until_first_write() {
        let display = display(u8::MAX);
        assert_eq!(display.read(), b' ');
    }

    #[test]
    fn test_show_records_on_success() {
        let mut display = display(u8::MAX);
        display.show(2).unwrap();
        assert_eq!(display.read(), b'2');

        display.show(0xB).unwrap();
        assert_eq!(display.read(), b'b');
    }

    #[test]
    fn test_out_of_range_leaves_state_unchanged() {
        let mut display = display(u8::MAX);
        display.show(4).unwrap();

        assert_eq!(display.show(16), Err(DriveError::OutOfRange));
        assert_eq!(display.read(), b'4');

        let pins = display.into_pins();
        let expected = [false, true, true, false, false, true, true, false]; // 0x66
        for (position, pin) in pins.iter().enumerate() {
            assert_eq!(pin.high, expected[position]);
        }
    }

    #[test]
    fn test_fault_does_not_update_recorded_digit() {
        // One successful bulk write per pin, the second show faults
        let mut display = display(1);
        display.show(4).unwrap();
        assert_eq!(display.read(), b'4');

        assert_eq!(display.show(5), Err(DriveError::HardwareFault));
        assert_eq!(display.read(), b'4');
    }

    #[test]
    fn test_write_acts_on_first_byte_and_consumes_all() {
        let mut display = display(u8::MAX);

        assert_eq!(display.write(b"3"), Ok(1));
        assert_eq!(display.read(), b'3');

        assert_eq!(display.write(b"4:2"), Ok(3));
        assert_eq!(display.read(), b'4');
    }

    #[test]
    fn test_empty_write_consumes_nothing() {
        let mut display = display(u8::MAX);
        assert_eq!(display.write(b""), Ok(0));
        assert_eq!(display.read(), b' ');
    }

    #[test]
    fn test_write_round_trips_the_alphabet() {
        let mut display = display(u8::MAX);
        for byte in b"0123456789abcdef" {
            display.write(core::slice::from_ref(byte)).unwrap();
            assert_eq!(display.read(), *byte);
        }
    }

    #[test]
    fn test_unrecognized_byte_lights_every_segment() {
        let mut display = display(u8::MAX);
        assert_eq!(display.write(b"z"), Ok(1));
        assert_eq!(display.read(), b'8');

        let pins = display.into_pins();
        for (position, pin) in pins.iter().enumerate() {
            // 0x7F: all segments lit, decimal point dark
            assert_eq!(pin.high, position < 7);
        }
    }

    #[test]
    fn test_uppercase_hex_takes_the_fallback_path() {
        let mut display = display(u8::MAX);
        assert_eq!(display.write(b"A"), Ok(1));
        assert_eq!(display.read(), b'8');
    }
}
