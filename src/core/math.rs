//! Small numeric helpers shared by the geometry code.
//!
//! Headings and bearings are degrees clockwise; transforms convert to
//! radians only at the trigonometry call sites.

/// Normalize a bearing in degrees to [0, 360).
///
/// # Example
/// ```
/// use marga_nav::core::math::normalize_bearing;
///
/// assert!((normalize_bearing(-90.0) - 270.0).abs() < 1e-6);
/// assert!((normalize_bearing(720.5) - 0.5).abs() < 1e-4);
/// ```
#[inline]
pub fn normalize_bearing(deg: f32) -> f32 {
    let b = deg % 360.0;
    if b < 0.0 {
        b + 360.0
    } else {
        b
    }
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
