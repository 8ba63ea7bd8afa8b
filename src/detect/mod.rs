mod backend;
mod result;
mod stub;

use anyhow::{anyhow, Result};

pub use backend::MarkerDetector;
pub use result::{Corner, DetectionResult, MarkerDetection};
pub use stub::StubDetector;

/// Select a detector backend by name.
pub fn detector_by_name(name: &str) -> Result<Box<dyn MarkerDetector>> {
    match name {
        "stub" => Ok(Box::new(StubDetector::new())),
        other => Err(anyhow!("unknown detector backend '{}'", other)),
    }
}
