//! Core types for the guidance engine.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`GridPoint`]: integer floor-plan coordinates
//! - [`WorldPoint`]: metric positions in the tracking frame (y-up)
//! - [`math`]: bearing normalization and interpolation helpers

mod point;

pub mod math;

pub use point::{GridPoint, WorldPoint};
