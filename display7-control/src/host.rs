//! Control-surface host collaborator
//!
//! The host platform dispatches external reads and writes. The
//! lifecycle manager only registers one `digit` endpoint per display,
//! named by the instance label, and unregisters it on detach.

/// Errors from registering an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// The host refused the registration
    Rejected,
}

/// Trait for the host's endpoint registration mechanism
pub trait ControlHost {
    /// Handle identifying one live registration
    type Endpoint;

    /// Publish the `digit` endpoint under the label's namespace
    fn register(&mut self, label: &str) -> Result<Self::Endpoint, RegisterError>;

    /// Withdraw a previously published endpoint
    ///
    /// Called exactly once per successful [`register`](Self::register),
    /// before the instance's pins are released.
    fn unregister(&mut self, endpoint: Self::Endpoint);
}
