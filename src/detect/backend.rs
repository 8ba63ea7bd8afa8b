use anyhow::Result;

use crate::detect::result::DetectionResult;
use crate::frame::Frame;

/// Marker detector boundary.
///
/// The relay treats marker recognition as an external capability: given a
/// well-formed frame, a backend returns the markers it recognized. An empty
/// marker list is a valid result, not an error. Implementations must treat
/// the frame's pixels as read-only and must not retain them beyond the
/// `detect` call.
pub trait MarkerDetector: Send {
    /// Backend identifier, used for CLI selection.
    fn name(&self) -> &'static str;

    /// Run detection on one frame.
    fn detect(&mut self, frame: &Frame) -> Result<DetectionResult>;
}

impl MarkerDetector for Box<dyn MarkerDetector> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn detect(&mut self, frame: &Frame) -> Result<DetectionResult> {
        (**self).detect(frame)
    }
}
