//! Display class registry
//!
//! A [`DisplayClass`] holds every attached display instance and is the
//! single place where hardware descriptions, pin claims, and endpoint
//! registrations meet. Attach is all-or-nothing: validation runs before
//! any resource is touched, claimed pins are released in reverse order
//! when a later step fails, and an instance only becomes reachable once
//! its endpoint registration succeeded. Detach unwinds in the opposite
//! order: endpoint first, pins last.
//!
//! Each instance's engine sits behind a blocking mutex, so reads and
//! writes arriving from concurrent host callers are serialized per
//! instance and a bulk pin write can never interleave with another.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::{String, Vec};

use display7_core::config::{ClassConfig, ConfigError, DisplayConfig, MAX_DISPLAYS, MAX_LABEL_LEN};
use display7_core::segments::SEGMENT_COUNT;
use display7_drivers::{DriveError, PinArray, SevenSegment};

use crate::host::{ControlHost, RegisterError};
use crate::provider::{ClaimError, PinProvider};

/// Errors from attaching an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError {
    /// Description failed validation; nothing was claimed
    Config(ConfigError),
    /// A pin claim failed; earlier claims were rolled back
    Claim(ClaimError),
    /// Endpoint registration failed; all pin claims were rolled back
    Register(RegisterError),
}

impl From<ConfigError> for AttachError {
    fn from(e: ConfigError) -> Self {
        AttachError::Config(e)
    }
}

/// Errors from detaching an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetachError {
    /// No attached instance carries this label
    UnknownLabel,
}

/// Errors from control-surface access by label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccessError {
    /// No attached instance carries this label
    UnknownLabel,
    /// The instance rejected the request
    Drive(DriveError),
}

impl From<DriveError> for AccessError {
    fn from(e: DriveError) -> Self {
        AccessError::Drive(e)
    }
}

/// Instance engine behind its per-instance lock
type InstanceLock<P> = Mutex<CriticalSectionRawMutex, RefCell<SevenSegment<P>>>;

/// One attached display
struct Entry<P, E> {
    label: String<MAX_LABEL_LEN>,
    pin_ids: Vec<u8, SEGMENT_COUNT>,
    endpoint: E,
    instance: InstanceLock<P>,
}

/// Registry of attached display instances
pub struct DisplayClass<P: PinProvider, H: ControlHost> {
    entries: Vec<Entry<P::Pin, H::Endpoint>, MAX_DISPLAYS>,
}

impl<P: PinProvider, H: ControlHost> Default for DisplayClass<P, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PinProvider, H: ControlHost> DisplayClass<P, H> {
    /// Create an empty class
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of attached instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no instances are attached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether an instance with this label is attached
    pub fn is_attached(&self, label: &str) -> bool {
        self.find(label).is_some()
    }

    /// Labels of the attached instances
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Attach one instance from its hardware description
    ///
    /// Validation (shape, duplicate label, pin overlap with attached
    /// instances) runs before any pin is claimed. Pin acquisition is
    /// all-or-nothing; if a claim or the endpoint registration fails,
    /// already claimed pins are released in reverse order and no
    /// instance is created. The freshly attached display is blank.
    pub fn attach(
        &mut self,
        provider: &mut P,
        host: &mut H,
        config: &DisplayConfig,
    ) -> Result<(), AttachError> {
        DisplayConfig::new(config.label.as_str(), &config.segment_pins)?;

        if self.entries.is_full() {
            return Err(AttachError::Config(ConfigError::TooManyDisplays));
        }
        if self.is_attached(config.label.as_str()) {
            return Err(AttachError::Config(ConfigError::DuplicateLabel));
        }
        for pin in &config.segment_pins {
            if self.entries.iter().any(|e| e.pin_ids.contains(pin)) {
                return Err(AttachError::Config(ConfigError::PinConflict(*pin)));
            }
        }

        let mut pins: Vec<P::Pin, SEGMENT_COUNT> = Vec::new();
        for id in &config.segment_pins {
            match provider.claim(*id) {
                // Cannot overflow, the pin list was validated above
                Ok(pin) => {
                    let _ = pins.push(pin);
                }
                Err(e) => {
                    unwind_claims(provider, &config.segment_pins, pins);
                    return Err(AttachError::Claim(e));
                }
            }
        }

        let endpoint = match host.register(config.label.as_str()) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                unwind_claims(provider, &config.segment_pins, pins);
                return Err(AttachError::Register(e));
            }
        };

        let instance = SevenSegment::new(PinArray::new(pins));
        // Capacity was checked up front
        let _ = self.entries.push(Entry {
            label: config.label.clone(),
            pin_ids: config.segment_pins.clone(),
            endpoint,
            instance: Mutex::new(RefCell::new(instance)),
        });

        #[cfg(feature = "defmt")]
        defmt::info!("display {=str} attached", config.label.as_str());

        Ok(())
    }

    /// Attach every instance of a class configuration
    ///
    /// All-or-nothing across the whole configuration: the full set is
    /// validated before any pin is claimed, and if one attach fails,
    /// instances attached by this call are detached again, most recent
    /// first, before the error is returned.
    pub fn attach_all(
        &mut self,
        provider: &mut P,
        host: &mut H,
        config: &ClassConfig,
    ) -> Result<(), AttachError> {
        config.validate()?;

        for (index, display) in config.displays.iter().enumerate() {
            if let Err(e) = self.attach(provider, host, display) {
                for attached in config.displays[..index].iter().rev() {
                    let _ = self.detach(provider, host, attached.label.as_str());
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// Detach an instance by label
    ///
    /// The endpoint is unregistered before any pin is released, so no
    /// external caller can reach the instance while its lines are being
    /// handed back. Callable exactly once per successful attach; a
    /// second detach fails with [`DetachError::UnknownLabel`].
    pub fn detach(
        &mut self,
        provider: &mut P,
        host: &mut H,
        label: &str,
    ) -> Result<(), DetachError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.label.as_str() == label)
            .ok_or(DetachError::UnknownLabel)?;
        let entry = self.entries.swap_remove(index);

        host.unregister(entry.endpoint);

        let pins = entry.instance.into_inner().into_inner().into_pins();
        for (id, pin) in entry.pin_ids.iter().zip(pins) {
            provider.release(*id, pin);
        }

        #[cfg(feature = "defmt")]
        defmt::info!("display {=str} detached", label);

        Ok(())
    }

    /// Show a digit value 0..=15 on the labeled instance
    pub fn show(&self, label: &str, digit: u8) -> Result<(), AccessError> {
        let entry = self.find(label).ok_or(AccessError::UnknownLabel)?;
        entry.instance.lock(|cell| cell.borrow_mut().show(digit))?;
        Ok(())
    }

    /// Control-surface write to the labeled instance
    ///
    /// Acts on the first payload byte and reports the full payload
    /// length as consumed; see the engine for the alphabet and the
    /// fallback policy.
    pub fn write(&self, label: &str, payload: &[u8]) -> Result<usize, AccessError> {
        let entry = self.find(label).ok_or(AccessError::UnknownLabel)?;
        let consumed = entry.instance.lock(|cell| cell.borrow_mut().write(payload))?;
        Ok(consumed)
    }

    /// Control-surface read from the labeled instance
    ///
    /// Returns the last accepted character, `b' '` before the first
    /// write. Never touches hardware.
    pub fn read(&self, label: &str) -> Result<u8, AccessError> {
        let entry = self.find(label).ok_or(AccessError::UnknownLabel)?;
        Ok(entry.instance.lock(|cell| cell.borrow().read()))
    }

    fn find(&self, label: &str) -> Option<&Entry<P::Pin, H::Endpoint>> {
        self.entries.iter().find(|e| e.label.as_str() == label)
    }
}

/// Release claimed pins in reverse acquisition order
fn unwind_claims<P: PinProvider>(
    provider: &mut P,
    ids: &[u8],
    mut pins: Vec<P::Pin, SEGMENT_COUNT>,
) {
    while let Some(pin) = pins.pop() {
        provider.release(ids[pins.len()], pin);
    }
}
