use anyhow::Result;

use crate::detect::backend::MarkerDetector;
use crate::detect::result::DetectionResult;
use crate::frame::Frame;

/// Stub backend: accepts any frame and reports no markers.
///
/// Used in tests and as the wiring point to swap in a real recognition
/// library without touching the orchestrator.
#[derive(Default)]
pub struct StubDetector;

impl StubDetector {
    pub fn new() -> Self {
        Self
    }
}

impl MarkerDetector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<DetectionResult> {
        Ok(DetectionResult::default())
    }
}
