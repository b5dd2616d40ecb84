//! Orientation sensor abstraction.
//!
//! Heading acquisition is an injected capability: the engine asks an
//! [`OrientationSource`] for a stream of samples and consumes exactly one
//! non-null fix. Hosts wrap whatever the platform provides: a consent
//! dialog plus sensor events, a replayed trace, or a channel fed by a
//! sensor thread.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::Result;

/// One heading sample from the orientation sensor.
///
/// `alpha` is the compass heading in degrees clockwise; `None` means the
/// sensor fired without a usable fix yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeadingSample {
    /// Heading in degrees clockwise, when available.
    pub alpha: Option<f32>,
}

impl HeadingSample {
    /// A sample carrying a heading fix.
    pub fn new(alpha: f32) -> Self {
        Self { alpha: Some(alpha) }
    }

    /// A sample without a fix.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Access to the host platform's orientation sensor.
///
/// Implementations that require user consent return
/// [`NavError::PermissionDenied`](crate::NavError::PermissionDenied) from
/// [`request_stream`](Self::request_stream) when consent is refused. The
/// returned stream may block between samples; the caller drops it as soon
/// as the first fix arrives.
pub trait OrientationSource {
    /// Open a stream of heading samples, asking for consent where the
    /// platform requires it.
    fn request_stream(&mut self) -> Result<Box<dyn Iterator<Item = HeadingSample> + '_>>;
}

/// Orientation source fed from another thread over a channel.
///
/// The receiving side blocks inside
/// [`calibrate_rotation`](crate::CoordinateMapper::calibrate_rotation)
/// until a sample arrives or every sender is dropped.
pub struct ChannelOrientationSource {
    receiver: Receiver<HeadingSample>,
}

impl ChannelOrientationSource {
    /// Create a source together with the sender half for the sensor side.
    pub fn new() -> (Sender<HeadingSample>, Self) {
        let (sender, receiver) = unbounded();
        (sender, Self { receiver })
    }

    /// Wrap an existing receiver.
    pub fn from_receiver(receiver: Receiver<HeadingSample>) -> Self {
        Self { receiver }
    }
}

impl OrientationSource for ChannelOrientationSource {
    fn request_stream(&mut self) -> Result<Box<dyn Iterator<Item = HeadingSample> + '_>> {
        Ok(Box::new(self.receiver.iter()))
    }
}

/// Replays a fixed sequence of samples, then ends.
///
/// Intended for tests and demos. Each [`request_stream`] call hands out
/// whatever is left of the sequence; samples not consumed before the
/// stream is dropped are discarded with it.
///
/// [`request_stream`]: OrientationSource::request_stream
pub struct ScriptedOrientationSource {
    samples: Vec<HeadingSample>,
}

impl ScriptedOrientationSource {
    /// Create a source replaying `samples` in order.
    pub fn new(samples: Vec<HeadingSample>) -> Self {
        Self { samples }
    }
}

impl OrientationSource for ScriptedOrientationSource {
    fn request_stream(&mut self) -> Result<Box<dyn Iterator<Item = HeadingSample> + '_>> {
        Ok(Box::new(self.samples.drain(..)))
    }
}
