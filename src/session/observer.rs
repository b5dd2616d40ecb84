//! Diagnostics hooks for session events.

use crate::Route;

use super::state::{GuidanceUpdate, SessionState};

/// Observer for session lifecycle and guidance events.
///
/// All methods default to no-ops, so implementors pick the events they
/// care about. Observers are informational and never influence session
/// behavior.
pub trait NavigationObserver {
    /// Called after every state transition.
    fn on_state_change(&mut self, _from: &SessionState, _to: &SessionState) {}

    /// Called when a route has been computed, before guidance begins.
    fn on_route(&mut self, _route: &Route) {}

    /// Called for each guidance update while navigating.
    fn on_guidance(&mut self, _update: &GuidanceUpdate) {}

    /// Called once when the arrival threshold is crossed.
    fn on_arrival(&mut self, _destination_id: &str) {}
}
