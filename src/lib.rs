//! aruco-relay
//!
//! A frame-detection relay: raw camera frames arrive on a Redis key/channel,
//! each frame is run through a fiducial-marker detector, and the structured
//! detection results are republished on another key/channel of the same bus.
//!
//! # Architecture
//!
//! - `frame`: frame geometry read once at startup (`CameraParameters`) and
//!   the opaque per-cycle pixel buffer (`Frame`)
//! - `bus`: the bus boundary (`FrameBus`, `BusSubscriber`) and its Redis
//!   implementation
//! - `detect`: the marker detector boundary and its backends
//! - `encode`: pure marker-list to JSON document transform
//! - `relay`: the mode orchestrator driving fetch -> detect -> encode ->
//!   publish/store in one of three run modes (unique, stream, stream-set)
//!
//! Marker recognition itself and the bus client protocol are external
//! collaborators; this crate owns only the orchestration between them.

pub mod bus;
pub mod config;
pub mod detect;
pub mod encode;
pub mod frame;
pub mod relay;

pub use bus::{BusSubscriber, FrameBus, RedisBus, RedisSubscriber};
pub use config::{RunConfig, RunMode};
pub use detect::{detector_by_name, DetectionResult, MarkerDetection, MarkerDetector, StubDetector};
pub use encode::encode;
pub use frame::{CameraParameters, Frame};
pub use relay::{CycleOutcome, Relay};
