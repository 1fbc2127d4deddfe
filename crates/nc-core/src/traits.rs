//! Core traits for NuComp
//!
//! The input-handler trait is the seam between event ingestion and the
//! measurement modules: measurements never see a generator format, only
//! [`FitEvent`]s and the resolved normalization.

use crate::error::Result;
use crate::event::FitEvent;
use crate::hist::Hist1D;

/// Source of reconstructed events and normalization metadata.
///
/// Implementations own a mutable event buffer that is refilled on every
/// call; they are not safe for concurrent use and must be externally
/// serialized if multiple consumers exist.
pub trait InputHandler {
    /// Serve the event at `entry`.
    ///
    /// Returns `Ok(None)` when `entry` is at or beyond the known event
    /// count; running past the end is the caller's loop condition, not an
    /// error.
    fn event(&mut self, entry: u64) -> Result<Option<&FitEvent>>;

    /// Number of events available through [`Self::event`].
    fn n_events(&self) -> u64;

    /// Event-rate placeholder histogram; its integral over the full axis is
    /// the flux-averaged total cross section in 10⁻³⁸ cm².
    fn event_rate(&self) -> &Hist1D;

    /// Resolved normalization scalar.
    fn normalization(&self) -> f64 {
        self.event_rate().integral()
    }

    /// Handler name, for diagnostics.
    fn name(&self) -> &str;
}
