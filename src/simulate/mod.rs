//! Tick-driven walk simulation along a sampled route.
//!
//! [`PathSimulator`] never schedules itself. An external driver calls
//! [`tick`](PathSimulator::tick) at whatever cadence it likes and the
//! simulator converts elapsed time into walked distance, so behavior is
//! identical under a 60 Hz animation loop, a coarse timer, or a test
//! feeding synthetic timestamps.

mod sampler;

use log::{debug, info, warn};

use crate::core::WorldPoint;
use crate::error::Result;
use crate::mapper::CoordinateMapper;
use crate::Route;

/// Slack absorbed when comparing a distance budget against the gap to
/// the next sample (meters). Keeps budgets that should land exactly on a
/// sample from stopping a float-rounding hair short of it.
const SNAP_EPSILON_M: f32 = 1e-4;

/// Walks a densely sampled route under an externally supplied distance
/// or time budget.
///
/// State changes only through [`generate_samples`], [`advance`],
/// [`tick`], [`reset`], and the run-control setters. The cursor never
/// moves backwards except through [`reset`] or regeneration.
///
/// [`generate_samples`]: Self::generate_samples
/// [`advance`]: Self::advance
/// [`tick`]: Self::tick
/// [`reset`]: Self::reset
#[derive(Clone, Debug)]
pub struct PathSimulator {
    samples: Vec<WorldPoint>,
    /// Index of the last sample reached (not overtaken).
    cursor: usize,
    /// Current interpolated position, between samples while mid-gap.
    position: WorldPoint,
    running: bool,
    speed_mps: f32,
    last_tick_secs: Option<f64>,
    /// Where `reset` puts the walker when there are no samples.
    home: WorldPoint,
}

impl PathSimulator {
    /// Create an idle simulator with the given walking speed in m/s.
    pub fn new(speed_mps: f32) -> Self {
        Self {
            samples: Vec::new(),
            cursor: 0,
            position: WorldPoint::ZERO,
            running: false,
            speed_mps: speed_mps.max(0.0),
            last_tick_secs: None,
            home: WorldPoint::ZERO,
        }
    }

    /// Interpolate `route` into world samples and rewind onto them.
    ///
    /// Replaces any previous samples; the walker starts stopped at the
    /// first sample (or at the mapper's calibration origin when the
    /// route has fewer than two vertices and produces none). Returns the
    /// sample count. On error the simulator is left unchanged.
    pub fn generate_samples(
        &mut self,
        route: &Route,
        mapper: &CoordinateMapper,
        step_m: f32,
    ) -> Result<usize> {
        let samples = sampler::sample_route(route, mapper, step_m)?;
        self.home = mapper
            .frame()
            .map(|f| f.world_origin)
            .unwrap_or(WorldPoint::ZERO);
        self.samples = samples;
        self.cursor = 0;
        self.running = false;
        self.last_tick_secs = None;
        self.position = self.samples.first().copied().unwrap_or(self.home);
        debug!("route sampled into {} points", self.samples.len());
        Ok(self.samples.len())
    }

    /// Begin consuming ticks from the current cursor.
    pub fn start(&mut self) {
        if self.samples.is_empty() {
            warn!("simulation start requested with no samples");
            return;
        }
        self.running = true;
    }

    /// Pause; position and cursor are kept.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Walk up to `delta_m` meters along the samples.
    ///
    /// Measures the gap to the next sample from the current interpolated
    /// position, so arbitrarily small budgets still accumulate. Jumps
    /// whole samples while the budget covers them, then interpolates the
    /// remainder into the gap. Reaching the final sample clears the
    /// running flag and discards any unused budget.
    pub fn advance(&mut self, delta_m: f32) {
        if self.samples.is_empty() {
            self.running = false;
            return;
        }
        let mut budget = if delta_m.is_finite() {
            delta_m.max(0.0)
        } else {
            0.0
        };
        while budget > 0.0 && self.cursor + 1 < self.samples.len() {
            let next = self.samples[self.cursor + 1];
            let gap = self.position.planar_distance(&next);
            if budget + SNAP_EPSILON_M >= gap {
                self.cursor += 1;
                self.position = next;
                budget -= gap;
            } else {
                let t = budget / gap;
                self.position = self.position.planar_lerp(&next, t);
                budget = 0.0;
            }
        }
        if self.cursor + 1 >= self.samples.len() {
            if self.running {
                info!("walk complete at sample {}", self.cursor);
            }
            self.running = false;
        }
    }

    /// Advance by elapsed wall-clock time.
    ///
    /// The first call after generation or [`reset`](Self::reset) only
    /// records the time base and moves nothing; afterwards each call
    /// walks `speed * (now - last)` meters. A non-increasing timestamp
    /// counts as zero elapsed time. While stopped this returns the held
    /// position untouched.
    pub fn tick(&mut self, now_secs: f64) -> WorldPoint {
        if !self.running {
            return self.position;
        }
        let elapsed = match self.last_tick_secs {
            None => 0.0,
            Some(last) => (now_secs - last).max(0.0),
        };
        self.last_tick_secs = Some(now_secs);
        self.advance(self.speed_mps * elapsed as f32);
        self.position
    }

    /// Rewind to the first sample, stopped, with the time base cleared.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.position = self.samples.first().copied().unwrap_or(self.home);
        self.running = false;
        self.last_tick_secs = None;
    }

    /// Current interpolated world position.
    pub fn position(&self) -> WorldPoint {
        self.position
    }

    /// Index of the last sample reached.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the walker is consuming ticks.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of samples in the current route.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// The sampled route, for path rendering.
    pub fn samples(&self) -> &[WorldPoint] {
        &self.samples
    }

    /// Current walking speed in m/s.
    pub fn speed(&self) -> f32 {
        self.speed_mps
    }

    /// Change the walking speed; applies from the next tick.
    /// Negative values clamp to zero.
    pub fn set_speed(&mut self, mps: f32) {
        self.speed_mps = mps.max(0.0);
    }

    /// Summed planar distance over the sample sequence.
    pub fn path_length(&self) -> f32 {
        self.samples
            .windows(2)
            .map(|pair| pair[0].planar_distance(&pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridPoint;
    use crate::graph::Vertex;
    use crate::Route;

    /// Ten meter straight route sampled at 0.1 m (101 samples).
    fn straight_sim() -> PathSimulator {
        let mut mapper = CoordinateMapper::new();
        mapper.calibrate(GridPoint::new(0, 0), WorldPoint::ZERO);
        let route = Route::new(vec![
            Vertex::new("a", "A", GridPoint::new(0, 0)),
            Vertex::new("b", "B", GridPoint::new(10, 0)),
        ]);
        let mut sim = PathSimulator::new(1.0);
        let count = sim.generate_samples(&route, &mapper, 0.1).unwrap();
        assert_eq!(count, 101);
        sim
    }

    #[test]
    fn test_advance_partial() {
        let mut sim = straight_sim();
        sim.start();
        sim.advance(5.0);
        assert!(sim.is_running());
        assert_eq!(sim.cursor(), 50);
        assert!((sim.position().x - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_advance_full_length_arrives() {
        let mut sim = straight_sim();
        sim.start();
        let total = sim.path_length();
        sim.advance(total);
        assert!(!sim.is_running());
        assert_eq!(sim.cursor(), sim.sample_count() - 1);
        assert!((sim.position().x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_overshoot_discards_excess() {
        let mut sim = straight_sim();
        sim.start();
        sim.advance(1000.0);
        assert!(!sim.is_running());
        assert!((sim.position().x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_sub_sample_budgets_accumulate() {
        let mut sim = straight_sim();
        sim.start();
        // 4 cm steps against 10 cm sample spacing
        for _ in 0..50 {
            sim.advance(0.04);
        }
        assert!((sim.position().x - 2.0).abs() < 1e-2);
        assert!(sim.cursor() >= 19);
    }

    #[test]
    fn test_first_tick_is_baseline() {
        let mut sim = straight_sim();
        sim.start();
        let p = sim.tick(100.0);
        assert!((p.x - 0.0).abs() < 1e-6);
        let p = sim.tick(101.0);
        assert!((p.x - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_backwards_time_moves_nothing() {
        let mut sim = straight_sim();
        sim.start();
        sim.tick(10.0);
        sim.tick(11.0);
        let before = sim.position();
        let after = sim.tick(10.5);
        assert_eq!(before, after);
        // Time base now 10.5; a later tick resumes from there
        let resumed = sim.tick(11.5);
        assert!((resumed.x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_tick_while_stopped_holds_position() {
        let mut sim = straight_sim();
        sim.start();
        sim.tick(0.0);
        sim.tick(2.0);
        sim.stop();
        let held = sim.position();
        assert_eq!(sim.tick(50.0), held);
    }

    #[test]
    fn test_tiny_ticks_converge_to_arrival() {
        let mut sim = straight_sim();
        sim.set_speed(0.5);
        sim.start();
        // 10 ms cadence for 21 simulated seconds
        for i in 0..=2100 {
            sim.tick(i as f64 * 0.01);
        }
        assert!(!sim.is_running());
        assert!((sim.position().x - 10.0).abs() < 1e-2);
    }

    #[test]
    fn test_speed_change_applies_next_tick() {
        let mut sim = straight_sim();
        sim.start();
        sim.tick(0.0);
        sim.tick(2.0); // 2 m at 1 m/s
        sim.set_speed(2.0);
        sim.tick(3.0); // +2 m at 2 m/s
        assert!((sim.position().x - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_rewinds_and_clears_time_base() {
        let mut sim = straight_sim();
        sim.start();
        sim.tick(0.0);
        sim.tick(3.0);
        sim.reset();
        assert!(!sim.is_running());
        assert_eq!(sim.cursor(), 0);
        assert!((sim.position().x - 0.0).abs() < 1e-6);

        // Restart: the first tick only re-baselines
        sim.start();
        let p = sim.tick(500.0);
        assert!((p.x - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_regeneration_rewinds() {
        let mut sim = straight_sim();
        sim.start();
        sim.advance(4.0);

        let mut mapper = CoordinateMapper::new();
        mapper.calibrate(GridPoint::new(0, 0), WorldPoint::ZERO);
        let route = Route::new(vec![
            Vertex::new("a", "A", GridPoint::new(0, 0)),
            Vertex::new("c", "C", GridPoint::new(0, 2)),
        ]);
        sim.generate_samples(&route, &mapper, 0.1).unwrap();
        assert_eq!(sim.cursor(), 0);
        assert!(!sim.is_running());
        assert_eq!(sim.sample_count(), 21);
    }

    #[test]
    fn test_empty_samples_never_run() {
        let mut sim = PathSimulator::new(1.0);
        sim.start();
        assert!(!sim.is_running());
        assert_eq!(sim.tick(1.0), WorldPoint::ZERO);
    }

    #[test]
    fn test_single_sample_arrives_immediately() {
        let mut mapper = CoordinateMapper::new();
        mapper.calibrate(GridPoint::new(0, 0), WorldPoint::ZERO);
        // Two vertices on the same cell collapse to one sample
        let route = Route::new(vec![
            Vertex::new("a", "A", GridPoint::new(4, 4)),
            Vertex::new("b", "B", GridPoint::new(4, 4)),
        ]);
        let mut sim = PathSimulator::new(1.0);
        sim.generate_samples(&route, &mapper, 0.1).unwrap();
        sim.start();
        assert!(sim.is_running());
        sim.tick(0.0);
        sim.tick(1.0);
        assert!(!sim.is_running());
        assert!((sim.position().x - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_vertex_route_parks_at_origin() {
        let mut mapper = CoordinateMapper::new();
        mapper.calibrate(GridPoint::new(0, 0), WorldPoint::new(1.0, 1.6, 2.0));
        let route = Route::new(vec![Vertex::new("a", "A", GridPoint::new(9, 9))]);
        let mut sim = PathSimulator::new(1.0);
        assert_eq!(sim.generate_samples(&route, &mapper, 0.1).unwrap(), 0);
        assert_eq!(sim.position(), WorldPoint::new(1.0, 1.6, 2.0));
    }

    #[test]
    fn test_path_length() {
        let sim = straight_sim();
        assert!((sim.path_length() - 10.0).abs() < 1e-3);
    }
}
