//! Error types for the guidance engine.

use thiserror::Error;

/// Engine error type.
///
/// Every fallible operation is all-or-nothing: when one of these is
/// returned, the session, mapper, and graph are left exactly as they
/// were before the call. Recovery is always caller-initiated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    /// The floor plan failed integrity validation; nothing was loaded.
    #[error("floor plan rejected: {0}")]
    GraphIntegrity(String),

    /// Vertex id lookup miss.
    #[error("vertex '{0}' not found in floor plan")]
    VertexNotFound(String),

    /// A transform was requested before any position calibration.
    #[error("coordinate mapper is not calibrated")]
    NotCalibrated,

    /// A scale update would not produce a strictly positive factor.
    /// The previous scale is retained.
    #[error("invalid scale: {meters} m over {grid_units} grid units")]
    InvalidScale {
        /// Metric span supplied by the caller.
        meters: f32,
        /// Grid span supplied by the caller.
        grid_units: f32,
    },

    /// The host refused orientation-sensor consent. Rotation is unchanged.
    #[error("orientation permission denied")]
    PermissionDenied,

    /// The orientation stream ended without a usable heading fix.
    /// Rotation is unchanged.
    #[error("orientation stream ended without a heading fix")]
    HeadingUnavailable,

    /// The chosen destination is the current-location vertex.
    #[error("destination '{0}' is the current location")]
    SameLocation(String),

    /// Navigation could not start because an endpoint id did not resolve.
    #[error("no route available: {0}")]
    NoRoute(String),

    /// The operation is not legal in the session's current state.
    #[error("{operation} is not allowed while {state}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// Session state at the time of the call.
        state: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, NavError>;
