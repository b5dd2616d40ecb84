//! Calibration and the grid ↔ world transform.
//!
//! The floor plan lives in its own integer grid; the tracking frame is
//! metric, y-up, with the ground plane on x–z. A calibration binds one
//! grid point to one sensed world position; rotation (degrees clockwise)
//! and scale (meters per grid unit) complete the affine transform:
//!
//! ```text
//! world.x = origin.x + (relX*cos θ - relY*sin θ) * scale
//! world.z = origin.z + (relX*sin θ + relY*cos θ) * scale
//! world.y = origin.y
//! ```
//!
//! Both transform directions are pure functions of the current
//! calibration plus their input. Heights never change: guidance is
//! constrained to one horizontal floor.

mod orientation;

pub use orientation::{
    ChannelOrientationSource, HeadingSample, OrientationSource, ScriptedOrientationSource,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{GridPoint, WorldPoint};
use crate::error::{NavError, Result};

/// Snapshot of the full calibration state.
///
/// Available once a position calibration exists. Rotation and scale keep
/// their defaults (0°, 1 m/unit) until set and survive position
/// re-calibration; the anchor pair is replaced wholesale each time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationFrame {
    /// Grid point bound at calibration time.
    pub origin_grid: GridPoint,
    /// Sensed world position of that grid point.
    pub world_origin: WorldPoint,
    /// Grid rotation relative to the tracking frame, degrees clockwise.
    pub rotation_degrees: f32,
    /// Meters per grid unit. Strictly positive.
    pub scale_m_per_unit: f32,
}

/// Calibration state and bidirectional grid ↔ world transform.
#[derive(Clone, Debug)]
pub struct CoordinateMapper {
    anchor: Option<(GridPoint, WorldPoint)>,
    rotation_degrees: f32,
    scale: f32,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateMapper {
    /// Create an uncalibrated mapper (rotation 0°, scale 1 m/unit).
    pub fn new() -> Self {
        Self {
            anchor: None,
            rotation_degrees: 0.0,
            scale: 1.0,
        }
    }

    /// Whether a position calibration exists.
    pub fn is_calibrated(&self) -> bool {
        self.anchor.is_some()
    }

    /// Snapshot of the current calibration, `None` before the first
    /// position calibration.
    pub fn frame(&self) -> Option<CalibrationFrame> {
        self.anchor
            .map(|(origin_grid, world_origin)| CalibrationFrame {
                origin_grid,
                world_origin,
                rotation_degrees: self.rotation_degrees,
                scale_m_per_unit: self.scale,
            })
    }

    /// Bind a grid point to the sensed world position. Last call wins.
    pub fn calibrate(&mut self, grid: GridPoint, world: WorldPoint) {
        info!(
            "position calibrated: grid ({}, {}) at world ({:.2}, {:.2}, {:.2})",
            grid.x, grid.y, world.x, world.y, world.z
        );
        self.anchor = Some((grid, world));
    }

    /// Current rotation in degrees clockwise.
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    /// Set the rotation directly, for hosts that source heading themselves.
    pub fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rotation_degrees = degrees;
    }

    /// Acquire the rotation from an orientation sensor.
    ///
    /// Suspends on the stream until the first sample with a heading fix,
    /// stores it as the rotation, releases the stream, and returns the
    /// fix. Exactly one value is consumed; samples without a fix are
    /// skipped.
    ///
    /// Consent refusal surfaces as
    /// [`NavError::PermissionDenied`]; a stream that ends without a fix
    /// as [`NavError::HeadingUnavailable`]. Either way the previous
    /// rotation is retained.
    pub fn calibrate_rotation(&mut self, source: &mut dyn OrientationSource) -> Result<f32> {
        let stream = source.request_stream()?;
        for sample in stream {
            if let Some(alpha) = sample.alpha {
                self.rotation_degrees = alpha;
                info!("rotation calibrated: {:.1} deg", alpha);
                return Ok(alpha);
            }
        }
        Err(NavError::HeadingUnavailable)
    }

    /// Current scale in meters per grid unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Derive the scale from a measured span.
    ///
    /// `scale = meters / grid_units`. Fails with
    /// [`NavError::InvalidScale`] unless the result is finite and
    /// strictly positive, leaving the previous scale untouched.
    pub fn set_scale(&mut self, meters: f32, grid_units: f32) -> Result<f32> {
        let scale = meters / grid_units;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(NavError::InvalidScale { meters, grid_units });
        }
        debug!("scale set: {:.4} m per grid unit", scale);
        self.scale = scale;
        Ok(scale)
    }

    /// Place a grid point in world space.
    ///
    /// Fails with [`NavError::NotCalibrated`] before the first position
    /// calibration. The output height equals the calibration height.
    pub fn grid_to_world(&self, grid: GridPoint) -> Result<WorldPoint> {
        let (origin_grid, world_origin) = self.anchor.ok_or(NavError::NotCalibrated)?;
        let rel_x = (grid.x - origin_grid.x) as f32;
        let rel_y = (grid.y - origin_grid.y) as f32;
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        Ok(WorldPoint::new(
            world_origin.x + (rel_x * cos - rel_y * sin) * self.scale,
            world_origin.y,
            world_origin.z + (rel_x * sin + rel_y * cos) * self.scale,
        ))
    }

    /// Locate a world position on the floor-plan grid.
    ///
    /// Exact inverse of [`grid_to_world`](Self::grid_to_world) (negated
    /// rotation, divided by scale), rounded to the nearest integer grid
    /// cell. Height is ignored.
    pub fn world_to_grid(&self, world: WorldPoint) -> Result<GridPoint> {
        let (origin_grid, world_origin) = self.anchor.ok_or(NavError::NotCalibrated)?;
        let dx = (world.x - world_origin.x) / self.scale;
        let dz = (world.z - world_origin.z) / self.scale;
        let (sin, cos) = (-self.rotation_degrees).to_radians().sin_cos();
        Ok(GridPoint::new(
            origin_grid.x + (dx * cos - dz * sin).round() as i32,
            origin_grid.y + (dx * sin + dz * cos).round() as i32,
        ))
    }
}
