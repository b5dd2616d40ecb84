//! # Marga-Nav: Indoor Navigation Graph & Guidance Library
//!
//! A routing and guidance library for AR indoor navigation, built around
//! a named waypoint graph drawn over a floor plan.
//!
//! ## Features
//!
//! - **Graph Routing**: Fewest-hop BFS search over named floor-plan
//!   vertices, with a straight-line fallback when areas are disconnected
//! - **AR Calibration**: Single-anchor grid-to-world mapping with
//!   heading and scale calibration
//! - **Simulated Walking**: Time-driven movement along densely sampled
//!   routes for demos and testing without live tracking
//! - **Session State Machine**: Calibrate, select, navigate, arrive,
//!   with per-tick distance, bearing and proximity guidance
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marga_nav::graph::{Edge, Vertex};
//! use marga_nav::{GridPoint, NavConfig, NavigationGraph, NavigationSession, WorldPoint};
//!
//! // Two rooms joined by a corridor edge
//! let vertices = vec![
//!     Vertex::new("entrance", "Main Entrance", GridPoint::new(0, 0)),
//!     Vertex::new("lab", "Research Lab", GridPoint::new(12, 8)),
//! ];
//! let edges = vec![Edge::new("e1", "entrance", "lab")];
//! let graph = NavigationGraph::load(vertices, edges)?;
//!
//! // Calibrate where the user is standing, pick a destination, walk
//! let mut session = NavigationSession::new(graph, NavConfig::default());
//! session.calibrate("entrance", WorldPoint::ZERO)?;
//! session.set_destination("lab")?;
//! session.start()?;
//!
//! for tick in 0..600 {
//!     if let Some(update) = session.update(tick as f64 * 0.1, None) {
//!         println!(
//!             "{:.1} m to go, bearing {:.0}°",
//!             update.distance_m, update.bearing_deg
//!         );
//!         if update.arrived {
//!             break;
//!         }
//!     }
//! }
//! # Ok::<(), marga_nav::NavError>(())
//! ```
//!
//! ## Coordinate Frames
//!
//! Two frames are in play, bridged by [`CoordinateMapper`]:
//!
//! - **Grid**: Integer floor-plan units ([`GridPoint`]), straight off
//!   the plan drawing
//! - **World**: Rendering-frame meters ([`WorldPoint`]); X right,
//!   Y up (height), Z toward the viewer, so "forward" is -Z
//! - **Rotation**: Degrees clockwise when seen from above
//! - **Bearing**: Degrees clockwise in [0, 360), 0° facing -Z
//!
//! ## Architecture
//!
//! The library is organized into modules:
//!
//! - [`core`]: Fundamental types (GridPoint, WorldPoint, bearing math)
//! - [`config`]: Configuration loading and defaults
//! - [`graph`]: Floor-plan documents, the vertex graph, route search
//! - [`mapper`]: Grid-to-world calibration and transforms
//! - [`simulate`]: Route sampling and the simulated walker
//! - [`session`]: The guidance state machine tying it all together
//! - [`error`]: Crate-wide error type
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌──────────────┐
//! │ FloorPlanDoc │────►│ NavigationGraph │────►│    Route     │
//! │    (JSON)    │     │  (BFS search)   │     │  (vertices)  │
//! └──────────────┘     └─────────────────┘     └──────┬───────┘
//!                                                     │ sampled via
//!                                                     │ CoordinateMapper
//!                                                     ▼
//! ┌────────────────┐   ┌───────────────────┐   ┌──────────────┐
//! │ GuidanceUpdate │◄──│ NavigationSession │◄──│PathSimulator │
//! │ (per tick)     │   │  (state machine)  │   │ (walker)     │
//! └────────────────┘   └───────────────────┘   └──────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod mapper;
pub mod session;
pub mod simulate;

// Re-export main types at crate root
pub use config::{ConfigLoadError, DistanceThresholds, NavConfig};
pub use core::{GridPoint, WorldPoint};
pub use error::{NavError, Result};
pub use graph::{DocumentError, Edge, FloorPlanDoc, NavigationGraph, Vertex};
pub use mapper::{CalibrationFrame, CoordinateMapper};
pub use session::{
    GuidanceUpdate, NavigationObserver, NavigationSession, Proximity, SessionState,
};
pub use simulate::PathSimulator;

// Re-export orientation plumbing for heading calibration
pub use mapper::{ChannelOrientationSource, HeadingSample, OrientationSource, ScriptedOrientationSource};

use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Route
// ─────────────────────────────────────────────────────────────────────────────

/// An ordered walk through the graph from start to destination.
///
/// Produced by [`NavigationGraph::shortest_path`]; always contains at
/// least one vertex (start and destination coincide in that case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    vertices: Vec<Vertex>,
}

impl Route {
    pub(crate) fn new(vertices: Vec<Vertex>) -> Self {
        debug_assert!(!vertices.is_empty(), "a route has at least one vertex");
        Self { vertices }
    }

    /// Vertices in walking order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The starting vertex.
    pub fn first(&self) -> Option<&Vertex> {
        self.vertices.first()
    }

    /// The destination vertex.
    pub fn last(&self) -> Option<&Vertex> {
        self.vertices.last()
    }

    /// Number of vertices on the route.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the route has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of edges walked (zero when already at the destination).
    pub fn hop_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Vertex ids in walking order.
    pub fn ids(&self) -> Vec<&str> {
        self.vertices.iter().map(|v| v.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> Route {
        Route::new(vec![
            Vertex::new("a", "A", GridPoint::new(0, 0)),
            Vertex::new("b", "B", GridPoint::new(5, 0)),
            Vertex::new("c", "C", GridPoint::new(5, 5)),
        ])
    }

    #[test]
    fn test_route_accessors() {
        let route = sample_route();
        assert_eq!(route.len(), 3);
        assert!(!route.is_empty());
        assert_eq!(route.hop_count(), 2);
        assert_eq!(route.ids(), ["a", "b", "c"]);
        assert_eq!(route.first().unwrap().id, "a");
        assert_eq!(route.last().unwrap().id, "c");
    }

    #[test]
    fn test_single_vertex_route() {
        let route = Route::new(vec![Vertex::new("a", "A", GridPoint::new(0, 0))]);
        assert_eq!(route.len(), 1);
        assert_eq!(route.hop_count(), 0);
        assert_eq!(route.first(), route.last());
    }

    #[test]
    fn test_route_serializes() {
        let json = serde_json::to_string(&sample_route()).unwrap();
        assert!(json.contains("\"vertices\""));
        assert!(json.contains("\"a\""));
    }
}
