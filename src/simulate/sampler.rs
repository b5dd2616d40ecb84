//! Route sampling.
//!
//! A route is a handful of vertices; the walk simulation wants a dense
//! polyline. Each consecutive vertex pair is placed in world space and
//! linearly interpolated at a fixed arc-length spacing.

use log::warn;

use crate::core::WorldPoint;
use crate::error::Result;
use crate::mapper::CoordinateMapper;
use crate::Route;

/// Spacing used when a caller supplies a non-positive step.
const FALLBACK_STEP_M: f32 = 0.1;

/// Append samples for one straight segment, both endpoints included.
///
/// Sample count is `ceil(length / step) + 1`; a zero-length segment
/// contributes its single point. The final sample is the exact planar
/// endpoint, so seams between segments line up bit-for-bit.
pub(crate) fn interpolate_segment(
    start: WorldPoint,
    end: WorldPoint,
    step_m: f32,
    out: &mut Vec<WorldPoint>,
) {
    let length = start.planar_distance(&end);
    let steps = (length / step_m).ceil() as usize;
    if steps == 0 {
        out.push(start);
        return;
    }
    for i in 0..steps {
        let t = i as f32 / steps as f32;
        out.push(start.planar_lerp(&end, t));
    }
    out.push(WorldPoint::new(end.x, start.y, end.z));
}

/// Interpolate a whole route into world-space samples.
///
/// Every vertex is placed through the mapper ([`NotCalibrated`] fails the
/// whole call), then each consecutive pair is sampled with
/// [`interpolate_segment`]. Segment endpoints repeat at seams. A route
/// with fewer than two vertices yields no samples.
///
/// [`NotCalibrated`]: crate::NavError::NotCalibrated
pub(crate) fn sample_route(
    route: &Route,
    mapper: &CoordinateMapper,
    step_m: f32,
) -> Result<Vec<WorldPoint>> {
    let step = if step_m.is_finite() && step_m > 0.0 {
        step_m
    } else {
        warn!(
            "sample spacing {} is not positive, using {} m",
            step_m, FALLBACK_STEP_M
        );
        FALLBACK_STEP_M
    };

    let mut placed = Vec::with_capacity(route.len());
    for vertex in route.vertices() {
        placed.push(mapper.grid_to_world(vertex.grid)?);
    }

    let mut samples = Vec::new();
    for pair in placed.windows(2) {
        interpolate_segment(pair[0], pair[1], step, &mut samples);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridPoint;
    use crate::graph::Vertex;
    use crate::NavError;

    fn route(points: &[(i32, i32)]) -> Route {
        Route::new(
            points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Vertex::new(format!("v{}", i), "", GridPoint::new(x, y)))
                .collect(),
        )
    }

    fn identity_mapper() -> CoordinateMapper {
        let mut mapper = CoordinateMapper::new();
        mapper.calibrate(GridPoint::new(0, 0), WorldPoint::ZERO);
        mapper
    }

    #[test]
    fn test_one_meter_yields_eleven_samples() {
        let samples = sample_route(&route(&[(0, 0), (1, 0)]), &identity_mapper(), 0.1).unwrap();
        assert_eq!(samples.len(), 11);
        for (i, sample) in samples.iter().enumerate() {
            assert!((sample.x - i as f32 * 0.1).abs() < 1e-5);
            assert!(sample.z.abs() < 1e-6);
        }
        // Endpoints are exact
        assert_eq!(samples[10].x, 1.0);
    }

    #[test]
    fn test_zero_length_segment_single_point() {
        let samples = sample_route(&route(&[(5, 5), (5, 5)]), &identity_mapper(), 0.1).unwrap();
        assert_eq!(samples.len(), 1);
        assert!((samples[0].x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_seams_repeat_endpoint() {
        let samples =
            sample_route(&route(&[(0, 0), (1, 0), (1, 1)]), &identity_mapper(), 0.5).unwrap();
        // 3 samples per one-unit segment
        assert_eq!(samples.len(), 6);
        assert_eq!(samples[2], samples[3]);
    }

    #[test]
    fn test_single_vertex_route_has_no_samples() {
        let samples = sample_route(&route(&[(3, 3)]), &identity_mapper(), 0.1).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_uncalibrated_mapper_fails() {
        let mapper = CoordinateMapper::new();
        let result = sample_route(&route(&[(0, 0), (1, 0)]), &mapper, 0.1);
        assert_eq!(result, Err(NavError::NotCalibrated));
    }

    #[test]
    fn test_non_positive_step_falls_back() {
        let samples = sample_route(&route(&[(0, 0), (1, 0)]), &identity_mapper(), 0.0).unwrap();
        assert_eq!(samples.len(), 11);
    }

    #[test]
    fn test_spacing_never_exceeds_step() {
        let samples = sample_route(&route(&[(0, 0), (7, 3)]), &identity_mapper(), 0.25).unwrap();
        for pair in samples.windows(2) {
            assert!(pair[0].planar_distance(&pair[1]) <= 0.25 + 1e-5);
        }
    }
}
