//! Pin claim collaborator
//!
//! The host platform owns the pool of digital output lines. The
//! lifecycle manager claims lines from it one binding at a time and
//! returns them on detach or on a failed attach.

use embedded_hal::digital::OutputPin;

/// Errors from claiming a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClaimError {
    /// No line with this id exists
    UnknownPin,
    /// The line is held by someone else
    AlreadyClaimed,
}

/// Trait for the host's pin-claim service
///
/// Implementations hand out owned pin handles. A claimed pin is
/// configured as an output and driven low before it is returned, so a
/// freshly attached display starts with every segment dark.
pub trait PinProvider {
    /// Owned handle for one claimed output line
    type Pin: OutputPin;

    /// Claim the line with the given id, in output mode, driven low
    fn claim(&mut self, pin: u8) -> Result<Self::Pin, ClaimError>;

    /// Return a claimed line to the pool
    fn release(&mut self, pin: u8, handle: Self::Pin);
}
