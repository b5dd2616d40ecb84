//! Guidance session orchestration.
//!
//! [`NavigationSession`] ties the graph, the coordinate mapper and the
//! path walker together behind a single state machine. The host drives
//! it in two phases: setup calls ([`calibrate`], [`set_destination`],
//! [`start`]) and then one [`update`] per render tick while navigating.
//!
//! [`calibrate`]: NavigationSession::calibrate
//! [`set_destination`]: NavigationSession::set_destination
//! [`start`]: NavigationSession::start
//! [`update`]: NavigationSession::update

mod observer;
mod state;

pub use observer::NavigationObserver;
pub use state::{GuidanceUpdate, Proximity, SessionState};

use log::{debug, info};

use crate::config::NavConfig;
use crate::core::WorldPoint;
use crate::error::{NavError, Result};
use crate::graph::NavigationGraph;
use crate::mapper::{CoordinateMapper, OrientationSource};
use crate::simulate::PathSimulator;
use crate::Route;

/// A guidance session over one floor plan.
///
/// Owns the graph, mapper and walker for the lifetime of the session.
/// All methods are synchronous; the host supplies the clock through
/// [`update`](NavigationSession::update).
pub struct NavigationSession {
    graph: NavigationGraph,
    mapper: CoordinateMapper,
    simulator: PathSimulator,
    config: NavConfig,
    state: SessionState,
    current_location: Option<String>,
    route: Option<Route>,
    destination_world: Option<WorldPoint>,
    observer: Option<Box<dyn NavigationObserver>>,
}

impl NavigationSession {
    /// Create a session over `graph` with the given configuration.
    pub fn new(graph: NavigationGraph, config: NavConfig) -> Self {
        let simulator = PathSimulator::new(config.default_simulation_speed);
        Self {
            graph,
            mapper: CoordinateMapper::new(),
            simulator,
            config,
            state: SessionState::Uncalibrated,
            current_location: None,
            route: None,
            destination_world: None,
            observer: None,
        }
    }

    /// Attach an observer at construction time.
    pub fn with_observer(mut self, observer: Box<dyn NavigationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Attach or replace the observer.
    pub fn set_observer(&mut self, observer: Box<dyn NavigationObserver>) {
        self.observer = Some(observer);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The navigation graph this session runs over.
    pub fn graph(&self) -> &NavigationGraph {
        &self.graph
    }

    /// The coordinate mapper, for read access to the calibration frame.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// The path walker, for read access to samples and progress.
    pub fn simulator(&self) -> &PathSimulator {
        &self.simulator
    }

    /// Session configuration.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// The active route, if navigation has started.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// The vertex id the user was last calibrated at.
    pub fn current_location(&self) -> Option<&str> {
        self.current_location.as_deref()
    }

    /// Current world position of the walker.
    pub fn position(&self) -> WorldPoint {
        self.simulator.position()
    }

    /// Calibrate the user's position: they are standing at the vertex
    /// `location_id`, observed at `world` in the rendering frame.
    ///
    /// Allowed in every state except `Navigating`. Re-calibrating
    /// discards any previously selected destination and route. The
    /// session moves to `Calibrated`.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidState`] while navigating,
    /// [`NavError::VertexNotFound`] if `location_id` is not in the
    /// graph. On error the session is unchanged.
    pub fn calibrate(&mut self, location_id: &str, world: WorldPoint) -> Result<()> {
        if self.state.is_navigating() {
            return Err(NavError::InvalidState {
                operation: "calibrate",
                state: self.state.name(),
            });
        }
        let vertex = self.graph.find_vertex(location_id)?;
        let grid = vertex.grid;

        self.mapper.calibrate(grid, world);
        self.current_location = Some(location_id.to_string());
        self.route = None;
        self.destination_world = None;
        // Old samples refer to the previous frame; start the walker over.
        self.simulator = PathSimulator::new(self.simulator.speed());
        self.transition(SessionState::Calibrated);
        info!("session calibrated at '{}'", location_id);
        Ok(())
    }

    /// Calibrate the heading offset from a device orientation stream.
    ///
    /// Delegates to [`CoordinateMapper::calibrate_rotation`]; the new
    /// rotation applies to routes computed afterwards.
    pub fn calibrate_rotation(&mut self, source: &mut dyn OrientationSource) -> Result<f32> {
        self.mapper.calibrate_rotation(source)
    }

    /// Set the mapper scale from a measured reference distance.
    pub fn set_scale(&mut self, meters: f32, grid_units: f32) -> Result<f32> {
        self.mapper.set_scale(meters, grid_units)
    }

    /// Override the mapper rotation directly, in degrees clockwise.
    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.mapper.set_rotation_degrees(degrees);
    }

    /// Change the walking speed in meters per second.
    pub fn set_speed(&mut self, meters_per_second: f32) {
        self.simulator.set_speed(meters_per_second);
    }

    /// Select a destination vertex by id.
    ///
    /// Allowed from `Calibrated`, `DestinationSelected` and `Arrived`.
    /// The id is not resolved against the graph here; an unknown id
    /// surfaces as [`NavError::NoRoute`] from [`start`].
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidState`] when uncalibrated or navigating,
    /// [`NavError::SameLocation`] if `destination_id` is the calibrated
    /// location. On error the session is unchanged.
    ///
    /// [`start`]: NavigationSession::start
    pub fn set_destination(&mut self, destination_id: &str) -> Result<()> {
        match self.state {
            SessionState::Calibrated
            | SessionState::DestinationSelected { .. }
            | SessionState::Arrived { .. } => {}
            _ => {
                return Err(NavError::InvalidState {
                    operation: "set_destination",
                    state: self.state.name(),
                })
            }
        }
        if self.current_location.as_deref() == Some(destination_id) {
            return Err(NavError::SameLocation(destination_id.to_string()));
        }
        self.route = None;
        self.destination_world = None;
        self.transition(SessionState::DestinationSelected {
            destination: destination_id.to_string(),
        });
        Ok(())
    }

    /// Compute the route and begin navigation.
    ///
    /// Resolves both endpoints, runs the shortest-path search, samples
    /// the route into world space and starts the walker. All fallible
    /// steps run before any session state changes, so a failed start
    /// leaves the session exactly as it was, still in
    /// `DestinationSelected` and retryable.
    ///
    /// # Errors
    ///
    /// [`NavError::InvalidState`] unless a destination is selected,
    /// [`NavError::NoRoute`] if either endpoint id is not in the graph,
    /// [`NavError::NotCalibrated`] if the mapper lost its frame.
    pub fn start(&mut self) -> Result<()> {
        let destination = match &self.state {
            SessionState::DestinationSelected { destination } => destination.clone(),
            _ => {
                return Err(NavError::InvalidState {
                    operation: "start",
                    state: self.state.name(),
                })
            }
        };
        let current = self
            .current_location
            .clone()
            .ok_or(NavError::NotCalibrated)?;

        let dest_grid = self
            .graph
            .find_vertex(&destination)
            .map_err(|_| NavError::NoRoute(format!("unknown vertex '{destination}'")))?
            .grid;
        self.graph
            .find_vertex(&current)
            .map_err(|_| NavError::NoRoute(format!("unknown vertex '{current}'")))?;

        let route = self.graph.shortest_path(&current, &destination)?;
        let destination_world = self.mapper.grid_to_world(dest_grid)?;
        self.simulator
            .generate_samples(&route, &self.mapper, self.config.path_resolution)?;

        self.simulator.start();
        self.destination_world = Some(destination_world);
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_route(&route);
        }
        info!(
            "navigation started: '{}' -> '{}', {} hops, {:.1} m",
            current,
            destination,
            route.hop_count(),
            self.simulator.path_length()
        );
        self.route = Some(route);
        self.transition(SessionState::Navigating { destination });
        Ok(())
    }

    /// Advance one guidance tick.
    ///
    /// `now_secs` is the host clock in seconds. When `tracked` is
    /// `None` the walker advances by elapsed time; a `Some` position
    /// (from live device tracking) is used as-is and leaves the walker
    /// untouched.
    ///
    /// Returns `None` in every state but `Navigating`. When the
    /// distance to the destination drops to the arrival threshold or
    /// below, the session parks the walker on the destination, reports
    /// it with `arrived` set and distance zero, and transitions to
    /// `Arrived`.
    pub fn update(&mut self, now_secs: f64, tracked: Option<WorldPoint>) -> Option<GuidanceUpdate> {
        let destination = match &self.state {
            SessionState::Navigating { destination } => destination.clone(),
            _ => return None,
        };
        let measured = match tracked {
            Some(position) => position,
            None => self.simulator.tick(now_secs),
        };
        let target = self.destination_world?;

        let distance = measured.planar_distance(&target);
        let bearing = measured.bearing_to(&target);
        let arrived = distance <= self.config.waypoint_reached_distance;
        let (position, distance_m) = if arrived {
            (target, 0.0)
        } else {
            (measured, distance)
        };
        let proximity = Proximity::classify(distance_m, &self.config.distance_thresholds);

        if arrived {
            // Park exactly on the final sample, which is the destination.
            self.simulator.advance(f32::MAX);
            self.simulator.stop();
            info!("arrived at '{}'", destination);
            self.transition(SessionState::Arrived {
                destination: destination.clone(),
            });
            if let Some(obs) = self.observer.as_deref_mut() {
                obs.on_arrival(&destination);
            }
        }

        let update = GuidanceUpdate {
            position,
            distance_m,
            bearing_deg: bearing,
            proximity,
            arrived,
        };
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_guidance(&update);
        }
        Some(update)
    }

    /// Abandon the current destination and route.
    ///
    /// The walker rewinds and stops; calibration is kept, so the
    /// session returns to `Calibrated` (or `Uncalibrated` if no
    /// calibration was ever performed).
    pub fn reset(&mut self) {
        self.simulator.reset();
        self.route = None;
        self.destination_world = None;
        let next = if self.mapper.is_calibrated() {
            SessionState::Calibrated
        } else {
            SessionState::Uncalibrated
        };
        self.transition(next);
        debug!("session reset");
    }

    fn transition(&mut self, next: SessionState) {
        if next == self.state {
            return;
        }
        let previous = std::mem::replace(&mut self.state, next);
        debug!("session state: {} -> {}", previous.name(), self.state.name());
        if let Some(obs) = self.observer.as_deref_mut() {
            obs.on_state_change(&previous, &self.state);
        }
    }
}
