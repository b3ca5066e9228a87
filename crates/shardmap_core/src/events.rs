//! Collaborator interfaces the core exposes to the rendering/UI layer.
//!
//! The core never reaches into rendering internals; the rendering layer
//! subscribes by implementing these traits. A sink that no longer has an
//! on-screen element for a settlement simply ignores the call - settlements
//! routinely appear and disappear between polls, so a stale target is
//! expected churn, not an error.

use crate::settlement::Settlement;

/// Receiver for phase-scheduler output.
pub trait PhaseSink {
    /// A settlement's phase was re-evaluated and its icon state may have
    /// changed. Fired on every due tick and when a settlement is first
    /// scheduled.
    fn icon_changed(&mut self, settlement: &Settlement);

    /// The selected settlement's countdown strings were recomputed. Fired
    /// every tick while a selection exists, regardless of due-ness, so the
    /// UI can show a live countdown.
    fn selection_updated(&mut self, settlement: &Settlement, war: &str, combat: &str);
}

/// Receiver for command-suggestion updates from the console.
pub trait SuggestionSink {
    /// The suggestion list changed after a command-buffer edit.
    fn suggestions_changed(&mut self, suggestions: &[String]);
}
