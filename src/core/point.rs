//! Grid and world coordinate types.

use serde::{Deserialize, Serialize};

use super::math::{lerp, normalize_bearing};

/// Floor-plan grid coordinates (integer cell addresses).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

impl GridPoint {
    /// Create a new grid point.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another grid point.
    ///
    /// Widened to `i64` so large plans cannot overflow.
    #[inline]
    pub fn distance_squared(&self, other: &GridPoint) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// World-space position in meters.
///
/// The tracking frame is y-up: the ground plane is x–z and `y` is height.
/// Planar helpers operate on x–z and leave height untouched, since
/// guidance is constrained to one horizontal floor.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters.
    pub x: f32,
    /// Y coordinate in meters (height above the floor).
    pub y: f32,
    /// Z coordinate in meters.
    pub z: f32,
}

impl WorldPoint {
    /// Origin of the tracking frame.
    pub const ZERO: WorldPoint = WorldPoint {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new world point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar (x–z) Euclidean distance to another point.
    #[inline]
    pub fn planar_distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Linear interpolation towards `other` in the ground plane.
    ///
    /// `t` = 0 yields `self`, `t` = 1 yields `other`'s planar position.
    /// Height is taken from `self`.
    #[inline]
    pub fn planar_lerp(&self, other: &WorldPoint, t: f32) -> WorldPoint {
        WorldPoint::new(lerp(self.x, other.x, t), self.y, lerp(self.z, other.z, t))
    }

    /// Bearing from this point to another, in degrees clockwise.
    ///
    /// 0° points along -Z (the camera's initial forward direction),
    /// 90° along +X. Result is normalized to [0, 360).
    #[inline]
    pub fn bearing_to(&self, other: &WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        normalize_bearing(dx.atan2(-dz).to_degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_distance_squared() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, 4);
        assert_eq!(a.distance_squared(&b), 25);
        assert_eq!(b.distance_squared(&a), 25);
        assert_eq!(a.distance_squared(&a), 0);
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = WorldPoint::new(0.0, 1.6, 0.0);
        let b = WorldPoint::new(3.0, 0.0, 4.0);
        assert!((a.planar_distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_planar_lerp_keeps_height() {
        let a = WorldPoint::new(0.0, 1.5, 0.0);
        let b = WorldPoint::new(10.0, 0.0, -10.0);
        let mid = a.planar_lerp(&b, 0.5);
        assert!((mid.x - 5.0).abs() < 1e-6);
        assert!((mid.y - 1.5).abs() < 1e-6);
        assert!((mid.z + 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_cardinals() {
        let origin = WorldPoint::ZERO;
        let ahead = WorldPoint::new(0.0, 0.0, -1.0);
        let right = WorldPoint::new(1.0, 0.0, 0.0);
        let behind = WorldPoint::new(0.0, 0.0, 1.0);
        let left = WorldPoint::new(-1.0, 0.0, 0.0);

        assert!((origin.bearing_to(&ahead) - 0.0).abs() < 1e-4);
        assert!((origin.bearing_to(&right) - 90.0).abs() < 1e-4);
        assert!((origin.bearing_to(&behind) - 180.0).abs() < 1e-4);
        assert!((origin.bearing_to(&left) - 270.0).abs() < 1e-4);
    }
}
