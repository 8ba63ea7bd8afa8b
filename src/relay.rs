//! Mode orchestrator.
//!
//! Owns the run-mode state machine and drives every cycle through the same
//! path: fetch a frame from the bus, run the detector, encode the result,
//! write it back out. The mode only decides how cycles are triggered and
//! which write is performed:
//!
//! - `Unique`: one cycle, store, exit; a missing frame is a fatal error.
//! - `StreamSet` (polling): unconditional loop, store each cycle; missing
//!   frames are logged and skipped.
//! - `Stream`: subscribe to the input key; each well-formed notification
//!   triggers a cycle that publishes (and, composed with stream-set, first
//!   stores). Malformed notifications and missing frames are logged and
//!   ignored without tearing down the subscription.
//!
//! Transport failures always propagate; "not available" never does (except
//! in unique mode, which only ever attempts one cycle).

use anyhow::{anyhow, Result};

use crate::bus::{BusSubscriber, FrameBus};
use crate::config::{RunConfig, RunMode};
use crate::detect::MarkerDetector;
use crate::encode::encode;
use crate::frame::CameraParameters;

/// What a single cycle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A frame was fetched, detected and written out.
    Completed,
    /// No frame was available; nothing was written.
    Skipped,
}

pub struct Relay<B> {
    cfg: RunConfig,
    params: CameraParameters,
    bus: B,
    detector: Box<dyn MarkerDetector>,
}

impl<B: FrameBus> Relay<B> {
    /// Read the camera parameters and build the relay.
    ///
    /// Any of the three parameters missing from the bus, or resolving to a
    /// negative value, is a fatal configuration error: frames cannot be
    /// sized without them.
    pub fn connect(cfg: RunConfig, mut bus: B, detector: Box<dyn MarkerDetector>) -> Result<Self> {
        let params = CameraParameters {
            width: read_camera_parameter(&mut bus, &cfg.width_key())?,
            height: read_camera_parameter(&mut bus, &cfg.height_key())?,
            channels: read_camera_parameter(&mut bus, &cfg.channels_key())?,
        };
        log::info!(
            "camera parameters: {}x{}, {} channel(s)",
            params.width,
            params.height,
            params.channels
        );
        Ok(Self {
            cfg,
            params,
            bus,
            detector,
        })
    }

    pub fn camera_parameters(&self) -> &CameraParameters {
        &self.params
    }

    /// Dispatch on the configured run mode. `Stream` additionally needs a
    /// subscription connection.
    pub fn run<S: BusSubscriber>(&mut self, subscriber: Option<S>) -> Result<()> {
        match self.cfg.mode {
            RunMode::Unique => self.run_once(),
            RunMode::StreamSet => self.run_polling(),
            RunMode::Stream { .. } => {
                let sub = subscriber
                    .ok_or_else(|| anyhow!("stream mode requires a subscription connection"))?;
                self.run_subscribed(sub)
            }
        }
    }

    /// Unique mode: exactly one fetch-detect-store cycle.
    pub fn run_once(&mut self) -> Result<()> {
        match self.cycle(true, false)? {
            CycleOutcome::Completed => Ok(()),
            CycleOutcome::Skipped => Err(anyhow!(
                "could not retrieve a frame from `{}`",
                self.cfg.input_key
            )),
        }
    }

    /// Stream-set polling mode: fetch-detect-store, repeated indefinitely.
    /// Only a transport failure breaks the loop.
    pub fn run_polling(&mut self) -> Result<()> {
        loop {
            self.cycle(true, false)?;
        }
    }

    /// Stream mode: one publish cycle per well-formed bus notification.
    ///
    /// The handler runs on the subscriber's delivery loop and never
    /// propagates a cycle failure; the next notification is the implicit
    /// retry.
    pub fn run_subscribed<S: BusSubscriber>(&mut self, mut subscriber: S) -> Result<()> {
        let input_key = self.cfg.input_key.clone();
        let store = matches!(self.cfg.mode, RunMode::Stream { store: true });
        log::info!("subscribing to `{}`", input_key);
        subscriber.subscribe(&input_key, &mut |reply| {
            if reply.len() != 3 {
                log::warn!(
                    "ignoring bus notification with unexpected shape ({} elements)",
                    reply.len()
                );
                return;
            }
            if let Err(err) = self.cycle(store, true) {
                log::warn!("cycle failed: {:#}", err);
            }
        })
    }

    /// One fetch -> detect -> encode -> write cycle.
    ///
    /// The frame is dropped as soon as its detections are encoded; when
    /// both writes are requested the store happens before the publish.
    fn cycle(&mut self, store: bool, publish: bool) -> Result<CycleOutcome> {
        let Some(frame) = self.bus.get_frame(&self.cfg.input_key, &self.params)? else {
            log::warn!(
                "no frame available at `{}`, skipping cycle",
                self.cfg.input_key
            );
            return Ok(CycleOutcome::Skipped);
        };
        let detections = self.detector.detect(&frame)?;
        let document = encode(&detections)?;
        drop(frame);

        if store {
            self.bus.set(&self.cfg.output_key, &document)?;
        }
        if publish {
            self.bus.publish(&self.cfg.output_key, &document)?;
        }
        log::debug!("{}", document);
        Ok(CycleOutcome::Completed)
    }
}

fn read_camera_parameter<B: FrameBus>(bus: &mut B, key: &str) -> Result<u32> {
    let value = bus.get_int(key)?.ok_or_else(|| {
        anyhow!(
            "camera parameter `{}` not found; specify where to find the \
             camera parameters with --camera-parameters",
            key
        )
    })?;
    u32::try_from(value)
        .map_err(|_| anyhow!("camera parameter `{}` must be a non-negative integer, got {}", key, value))
}
