//! Bus boundary.
//!
//! The relay only depends on two access patterns, both defined here as
//! traits so the orchestrator can be driven by an in-memory bus in tests:
//!
//! - synchronous keyed reads and fire-and-forget writes (`FrameBus`)
//! - a serial per-message subscription delivery loop (`BusSubscriber`)
//!
//! `Ok(None)` from the getters is the normal "no data yet" outcome and
//! skips a cycle; `Err` is a transport failure. The two must never be
//! conflated: a missing frame keeps the relay alive, a dead connection
//! does not.

mod redis;

use anyhow::Result;

use crate::frame::{CameraParameters, Frame};

pub use self::redis::{RedisBus, RedisSubscriber};

/// Synchronous bus operations, blocking the calling thread until the bus
/// responds or times out.
pub trait FrameBus {
    /// Read an integer stored at `key`.
    fn get_int(&mut self, key: &str) -> Result<Option<i64>>;

    /// Read a raw frame stored at `key`, validated against the camera
    /// geometry. A payload that does not match the geometry counts as
    /// not available.
    fn get_frame(&mut self, key: &str, params: &CameraParameters) -> Result<Option<Frame>>;

    /// Store `payload` at `key`.
    fn set(&mut self, key: &str, payload: &str) -> Result<()>;

    /// Publish `payload` on channel `key`.
    fn publish(&mut self, key: &str, payload: &str) -> Result<()>;
}

/// Subscription delivery loop.
///
/// Implementations invoke the handler once per published message, serially,
/// with the raw reply elements (for a well-formed message:
/// `["message", channel, payload]`). The handler runs on the delivery
/// thread; a slow handler stalls delivery of the next notification, which
/// is an accepted backpressure point.
pub trait BusSubscriber {
    fn subscribe(&mut self, key: &str, handler: &mut dyn FnMut(&[Vec<u8>])) -> Result<()>;
}
