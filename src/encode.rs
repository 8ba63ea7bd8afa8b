//! Marker-list to JSON document transform.
//!
//! Pure and deterministic: the same detections always produce the same
//! bytes. Key order is fixed by struct field order, markers keep their
//! detection order, and duplicate ids are passed through verbatim (whether
//! a duplicate is meaningful is the detection layer's concern).

use anyhow::Result;
use serde::Serialize;

use crate::detect::DetectionResult;

/// Marker type tag carried by every record.
pub const MARKER_TYPE: &str = "ARUCO";

#[derive(Serialize)]
struct MarkerRecord {
    id: i32,
    dir: i32,
    confidence: i32,
    #[serde(rename = "type")]
    kind: &'static str,
    center: [f32; 2],
    /// Flattened corners, TL, TR, BR, BL: [x0,y0,x1,y1,x2,y2,x3,y3].
    corners: [f32; 8],
}

#[derive(Serialize)]
struct MarkerDocument {
    markers: Vec<MarkerRecord>,
}

/// Encode one frame's detections as the output document.
pub fn encode(result: &DetectionResult) -> Result<String> {
    let document = MarkerDocument {
        markers: result
            .markers
            .iter()
            .map(|marker| {
                let c = &marker.corners;
                MarkerRecord {
                    id: marker.id,
                    dir: marker.direction,
                    confidence: marker.confidence,
                    kind: MARKER_TYPE,
                    center: marker.center(),
                    corners: [
                        c[0][0], c[0][1], c[1][0], c[1][1], c[2][0], c[2][1], c[3][0], c[3][1],
                    ],
                }
            })
            .collect(),
    };
    Ok(serde_json::to_string(&document)?)
}
