//! Session lifecycle states and per-tick guidance output.

use serde::{Deserialize, Serialize};

use crate::config::DistanceThresholds;
use crate::core::WorldPoint;

/// Lifecycle of a guidance session.
///
/// Forward flow is Uncalibrated, Calibrated, DestinationSelected,
/// Navigating, Arrived. Arrived is terminal for that destination; a new
/// destination selection re-enters DestinationSelected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No position calibration has been performed.
    Uncalibrated,

    /// Calibrated; no destination chosen.
    Calibrated,

    /// Destination chosen; route not yet computed.
    DestinationSelected {
        /// Chosen destination vertex id.
        destination: String,
    },

    /// Actively guiding toward the destination.
    Navigating {
        /// Destination vertex id.
        destination: String,
    },

    /// The arrival threshold was crossed.
    Arrived {
        /// Destination vertex id that was reached.
        destination: String,
    },
}

impl SessionState {
    /// State name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Uncalibrated => "Uncalibrated",
            SessionState::Calibrated => "Calibrated",
            SessionState::DestinationSelected { .. } => "DestinationSelected",
            SessionState::Navigating { .. } => "Navigating",
            SessionState::Arrived { .. } => "Arrived",
        }
    }

    /// Whether guidance updates are being produced.
    pub fn is_navigating(&self) -> bool {
        matches!(self, SessionState::Navigating { .. })
    }

    /// The destination id carried by the current state, if any.
    pub fn destination(&self) -> Option<&str> {
        match self {
            SessionState::DestinationSelected { destination }
            | SessionState::Navigating { destination }
            | SessionState::Arrived { destination } => Some(destination),
            _ => None,
        }
    }
}

/// Proximity bucket relative to the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    /// At or below the close threshold.
    Near,
    /// Between the close and medium thresholds.
    Medium,
    /// Beyond the medium threshold.
    Far,
}

impl Proximity {
    /// Classify a distance against the configured thresholds.
    pub fn classify(distance_m: f32, thresholds: &DistanceThresholds) -> Self {
        if distance_m <= thresholds.close {
            Proximity::Near
        } else if distance_m <= thresholds.medium {
            Proximity::Medium
        } else {
            Proximity::Far
        }
    }

    /// Lowercase bucket name, matching the host UI's style hooks.
    pub fn name(&self) -> &'static str {
        match self {
            Proximity::Near => "near",
            Proximity::Medium => "medium",
            Proximity::Far => "far",
        }
    }
}

/// One guidance update handed to the renderer each tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GuidanceUpdate {
    /// Current world position of the walker.
    pub position: WorldPoint,
    /// Planar distance to the destination, meters.
    pub distance_m: f32,
    /// Bearing to the destination, degrees clockwise in [0, 360).
    pub bearing_deg: f32,
    /// Proximity bucket for `distance_m`.
    pub proximity: Proximity,
    /// True on the update that crossed the arrival threshold.
    pub arrived: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(SessionState::Uncalibrated.name(), "Uncalibrated");
        let s = SessionState::Navigating {
            destination: "n2".into(),
        };
        assert_eq!(s.name(), "Navigating");
        assert!(s.is_navigating());
        assert_eq!(s.destination(), Some("n2"));
        assert_eq!(SessionState::Calibrated.destination(), None);
    }

    #[test]
    fn test_proximity_classification() {
        let thresholds = DistanceThresholds {
            close: 2.0,
            medium: 5.0,
        };
        assert_eq!(Proximity::classify(0.0, &thresholds), Proximity::Near);
        assert_eq!(Proximity::classify(2.0, &thresholds), Proximity::Near);
        assert_eq!(Proximity::classify(2.1, &thresholds), Proximity::Medium);
        assert_eq!(Proximity::classify(5.0, &thresholds), Proximity::Medium);
        assert_eq!(Proximity::classify(5.1, &thresholds), Proximity::Far);
        assert_eq!(Proximity::classify(100.0, &thresholds), Proximity::Far);
    }

    #[test]
    fn test_proximity_names() {
        assert_eq!(Proximity::Near.name(), "near");
        assert_eq!(Proximity::Medium.name(), "medium");
        assert_eq!(Proximity::Far.name(), "far");
    }

    #[test]
    fn test_proximity_serializes_lowercase() {
        let json = serde_json::to_string(&Proximity::Near).unwrap();
        assert_eq!(json, "\"near\"");
    }
}
