//! Engine configuration loaded from YAML.
//!
//! Every field has a sensible default, so an empty file (or no file at
//! all) yields a working configuration. Unknown fields are ignored.
//!
//! ```yaml
//! grid_size: 50.0
//! waypoint_reached_distance: 2.0
//! update_interval_ms: 100
//! default_simulation_speed: 0.5
//! path_resolution: 0.1
//! distance_thresholds:
//!   close: 2.0
//!   medium: 5.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(String),
    /// The file is not valid YAML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Distance thresholds for proximity classification, in meters.
///
/// Distances at or below `close` classify as near; above `close` and at
/// or below `medium` as medium; everything else as far.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceThresholds {
    /// Upper bound of the near bucket.
    #[serde(default = "defaults::close_threshold")]
    pub close: f32,
    /// Upper bound of the medium bucket.
    #[serde(default = "defaults::medium_threshold")]
    pub medium: f32,
}

impl Default for DistanceThresholds {
    fn default() -> Self {
        Self {
            close: defaults::close_threshold(),
            medium: defaults::medium_threshold(),
        }
    }
}

/// Full engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Render grid spacing in pixels per grid unit. Carried for the host
    /// renderer; the engine itself never reads it.
    #[serde(default = "defaults::grid_size")]
    pub grid_size: f32,

    /// Arrival threshold in meters: at or below this distance from the
    /// destination the session transitions to Arrived.
    #[serde(default = "defaults::waypoint_reached_distance")]
    pub waypoint_reached_distance: f32,

    /// Suggested cadence for the external tick driver, in milliseconds.
    /// The engine never schedules itself; this is a hint for the host.
    #[serde(default = "defaults::update_interval_ms")]
    pub update_interval_ms: u64,

    /// Initial simulated walking speed in m/s.
    #[serde(default = "defaults::default_simulation_speed")]
    pub default_simulation_speed: f32,

    /// Spacing between interpolated route samples, in meters.
    #[serde(default = "defaults::path_resolution")]
    pub path_resolution: f32,

    /// Proximity classification thresholds.
    #[serde(default)]
    pub distance_thresholds: DistanceThresholds,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            grid_size: defaults::grid_size(),
            waypoint_reached_distance: defaults::waypoint_reached_distance(),
            update_interval_ms: defaults::update_interval_ms(),
            default_simulation_speed: defaults::default_simulation_speed(),
            path_resolution: defaults::path_resolution(),
            distance_thresholds: DistanceThresholds::default(),
        }
    }
}

impl NavConfig {
    /// Create a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from the default config path (configs/config.yaml), falling
    /// back to defaults when no file exists.
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }

    /// Set the arrival threshold in meters.
    pub fn with_arrival_threshold(mut self, meters: f32) -> Self {
        self.waypoint_reached_distance = meters;
        self
    }

    /// Set the initial simulation speed in m/s.
    pub fn with_simulation_speed(mut self, mps: f32) -> Self {
        self.default_simulation_speed = mps;
        self
    }

    /// Set the route sample spacing in meters.
    pub fn with_path_resolution(mut self, meters: f32) -> Self {
        self.path_resolution = meters;
        self
    }

    /// Set the proximity thresholds in meters.
    pub fn with_distance_thresholds(mut self, close: f32, medium: f32) -> Self {
        self.distance_thresholds = DistanceThresholds { close, medium };
        self
    }
}

mod defaults {
    pub fn grid_size() -> f32 {
        50.0
    }

    pub fn waypoint_reached_distance() -> f32 {
        2.0
    }

    pub fn update_interval_ms() -> u64 {
        100
    }

    pub fn default_simulation_speed() -> f32 {
        0.5
    }

    pub fn path_resolution() -> f32 {
        0.1
    }

    pub fn close_threshold() -> f32 {
        2.0
    }

    pub fn medium_threshold() -> f32 {
        5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavConfig::default();
        assert_eq!(config.grid_size, 50.0);
        assert_eq!(config.waypoint_reached_distance, 2.0);
        assert_eq!(config.update_interval_ms, 100);
        assert_eq!(config.default_simulation_speed, 0.5);
        assert_eq!(config.path_resolution, 0.1);
        assert_eq!(config.distance_thresholds.close, 2.0);
        assert_eq!(config.distance_thresholds.medium, 5.0);
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = NavConfig::from_yaml("waypoint_reached_distance: 1.5\n").unwrap();
        assert_eq!(config.waypoint_reached_distance, 1.5);
        // Unspecified fields keep their defaults
        assert_eq!(config.default_simulation_speed, 0.5);
        assert_eq!(config.distance_thresholds.medium, 5.0);
    }

    #[test]
    fn test_from_yaml_nested_thresholds() {
        let yaml = "distance_thresholds:\n  close: 1.0\n  medium: 3.0\n";
        let config = NavConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.distance_thresholds.close, 1.0);
        assert_eq!(config.distance_thresholds.medium, 3.0);
    }

    #[test]
    fn test_from_yaml_unknown_fields_ignored() {
        let config = NavConfig::from_yaml("camera_fov: 80.0\ngrid_size: 25.0\n").unwrap();
        assert_eq!(config.grid_size, 25.0);
    }

    #[test]
    fn test_from_yaml_malformed() {
        let result = NavConfig::from_yaml("waypoint_reached_distance: [not, a, number]");
        assert!(matches!(result, Err(ConfigLoadError::Parse(_))));
    }

    #[test]
    fn test_builder_setters() {
        let config = NavConfig::new()
            .with_arrival_threshold(0.5)
            .with_simulation_speed(1.2)
            .with_path_resolution(0.05)
            .with_distance_thresholds(1.0, 4.0);
        assert_eq!(config.waypoint_reached_distance, 0.5);
        assert_eq!(config.default_simulation_speed, 1.2);
        assert_eq!(config.path_resolution, 0.05);
        assert_eq!(config.distance_thresholds.close, 1.0);
        assert_eq!(config.distance_thresholds.medium, 4.0);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = NavConfig::new().with_distance_thresholds(1.5, 6.0);
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = NavConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
