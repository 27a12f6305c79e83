//! Ordered output pin collections
//!
//! A [`PinArray`] owns the output lines of one display in segment order:
//! position *i* drives segment *i*. The binding length is fixed when the
//! array is built and arrays shorter than the full segment count are
//! valid (a display without a wired decimal point binds seven pins).

use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;

use display7_core::segments::{SegmentError, Segments, SEGMENT_COUNT};

/// Errors from driving a display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveError {
    /// Digit value outside 0..=15; nothing was driven
    OutOfRange,
    /// An underlying pin write failed; earlier positions of the same
    /// bulk operation may already carry the new level
    HardwareFault,
}

impl From<SegmentError> for DriveError {
    fn from(e: SegmentError) -> Self {
        match e {
            SegmentError::OutOfRange => DriveError::OutOfRange,
        }
    }
}

/// Output pins of one display, in segment order
pub struct PinArray<P> {
    pins: Vec<P, SEGMENT_COUNT>,
}

impl<P: OutputPin> PinArray<P> {
    /// Create an array from pins in segment order A, B, C, D, E, F, G, DP
    pub fn new(pins: Vec<P, SEGMENT_COUNT>) -> Self {
        Self { pins }
    }

    /// Number of bound pins
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Check whether no pins are bound
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Drive every bound pin to its level in the mask, as one bulk write
    ///
    /// Pin at position *i* is set to bit *i* of the mask. Positions
    /// beyond the bound pin count are not driven. Writes are applied
    /// sequentially; a failing pin stops the operation with
    /// [`DriveError::HardwareFault`], leaving earlier positions at their
    /// new level. No rollback is attempted.
    pub fn apply(&mut self, segments: Segments) -> Result<(), DriveError> {
        for (position, pin) in self.pins.iter_mut().enumerate() {
            let state = PinState::from(segments.level(position));
            pin.set_state(state).map_err(|_| DriveError::HardwareFault)?;
        }
        Ok(())
    }

    /// Consume the array and hand the pins back, in binding order
    pub fn into_pins(self) -> Vec<P, SEGMENT_COUNT> {
        self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use display7_core::segments::SEGMENT_TABLE;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug, PartialEq)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Mock output pin recording its level
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl ErrorType for MockPin {
        type Error = PinFault;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), PinFault> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), PinFault> {
            self.high = true;
            Ok(())
        }
    }

    /// Mock pin with a limited number of successful writes
    struct FlakyPin {
        high: bool,
        writes_left: u8,
    }

    impl FlakyPin {
        fn new(writes_left: u8) -> Self {
            Self {
                high: false,
                writes_left,
            }
        }

        fn write(&mut self, high: bool) -> Result<(), PinFault> {
            if self.writes_left == 0 {
                return Err(PinFault);
            }
            self.writes_left -= 1;
            self.high = high;
            Ok(())
        }
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

    fn mock_pins(count: usize) -> Vec<MockPin, SEGMENT_COUNT> {
        let mut pins = Vec::new();
        for _ in 0..count {
            let _ = pins.push(MockPin::new());
        }
        pins
    }

    #[test]
    fn test_apply_drives_each_position_to_its_bit() {
        let mut array = PinArray::new(mock_pins(8));
        array.apply(SEGMENT_TABLE[2]).unwrap(); // 0x5B

        let pins = array.into_pins();
        let expected = [true, true, false, true, true, false, true, false];
        for (position, pin) in pins.iter().enumerate() {
            assert_eq!(pin.high, expected[position], "position {position}");
        }
    }

    #[test]
    fn test_apply_clears_previously_lit_segments() {
        let mut array = PinArray::new(mock_pins(8));
        array.apply(SEGMENT_TABLE[8]).unwrap(); // everything lit
        array.apply(SEGMENT_TABLE[1]).unwrap(); // b and c only

        let pins = array.into_pins();
        for (position, pin) in pins.iter().enumerate() {
            assert_eq!(pin.high, position == 1 || position == 2);
        }
    }

    #[test]
    fn test_short_binding_drives_only_bound_pins() {
        // Seven pins: decimal point not wired
        let mut array = PinArray::new(mock_pins(7));
        array.apply(SEGMENT_TABLE[8]).unwrap();

        assert_eq!(array.len(), 7);
        let pins = array.into_pins();
        assert!(pins.iter().all(|p| p.high));
    }

    #[test]
    fn test_fault_stops_mid_write_without_rollback() {
        let mut pins: Vec<FlakyPin, SEGMENT_COUNT> = Vec::new();
        for position in 0..8 {
            // Pin at position 3 fails immediately
            let _ = pins.push(FlakyPin::new(if position == 3 { 0 } else { u8::MAX }));
        }

        let mut array = PinArray::new(pins);
        assert_eq!(
            array.apply(SEGMENT_TABLE[8]),
            Err(DriveError::HardwareFault)
        );

        // Positions before the fault carry the new level, the rest were
        // never touched
        let pins = array.into_pins();
        assert!(pins[0].high && pins[1].high && pins[2].high);
        assert!(!pins[3].high && !pins[4].high && !pins[7].high);
    }

    #[test]
    fn test_out_of_range_converts_from_segment_error() {
        assert_eq!(DriveError::from(SegmentError::OutOfRange), DriveError::OutOfRange);
    }
}
