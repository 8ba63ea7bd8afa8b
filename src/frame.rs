//! Frame geometry and the per-cycle pixel buffer.
//!
//! `CameraParameters` is read from the bus exactly once at startup and is
//! immutable afterwards; every `Frame` fetched during the process lifetime
//! is sized against it. A `Frame` is owned exclusively by the cycle that
//! retrieved it and is dropped as soon as its detections are encoded.

/// Pixel geometry of the camera feeding the input key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraParameters {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl CameraParameters {
    /// Expected byte length of one raw frame payload.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }
}

/// One raw image buffer plus its pixel geometry.
pub struct Frame {
    data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub channels: u32,
}

impl Frame {
    /// Wrap a raw bus payload, validating it against the camera geometry.
    ///
    /// Returns `None` when the payload length does not match
    /// `width * height * channels`; callers treat that the same as an
    /// absent frame.
    pub fn from_payload(data: Vec<u8>, params: &CameraParameters) -> Option<Self> {
        if data.len() != params.frame_len() {
            return None;
        }
        Some(Self {
            data,
            width: params.width,
            height: params.height,
            channels: params.channels,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.data
    }
}
