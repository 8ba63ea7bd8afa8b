/// One (x, y) point in image coordinates.
pub type Corner = [f32; 2];

/// One recognized fiducial marker.
///
/// Corner ordering is a hard contract: top-left, top-right, bottom-right,
/// bottom-left. Downstream consumers infer marker facing from this order.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerDetection {
    /// Dictionary id of the marker.
    pub id: i32,
    /// Reserved, currently always 0.
    pub direction: i32,
    /// Reserved, currently always 100.
    pub confidence: i32,
    /// The four corners, in TL, TR, BR, BL order.
    pub corners: [Corner; 4],
}

impl MarkerDetection {
    pub fn new(id: i32, corners: [Corner; 4]) -> Self {
        Self {
            id,
            direction: 0,
            confidence: 100,
            corners,
        }
    }

    /// Unweighted arithmetic mean of the four corners.
    pub fn center(&self) -> Corner {
        let mut center = [0.0f32; 2];
        for corner in &self.corners {
            center[0] += corner[0];
            center[1] += corner[1];
        }
        [center[0] / 4.0, center[1] / 4.0]
    }
}

/// Markers recognized in one frame, in detection order.
///
/// Produced fresh per frame, serialized immediately and discarded; never
/// mutated after creation.
#[derive(Clone, Debug, Default)]
pub struct DetectionResult {
    pub markers: Vec<MarkerDetection>,
}
