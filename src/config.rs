use anyhow::{anyhow, Result};

/// How the relay pulls, processes and pushes frames.
///
/// Selected once at startup and fixed for the process lifetime; the modes
/// are not concurrent with each other (`Stream` subscribes instead of
/// looping, the other two loop instead of subscribing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Perform exactly one fetch-detect-store cycle, then exit.
    Unique,
    /// Subscribe to the input key; one publish cycle per notification.
    /// With `store` set, the document is additionally stored at the output
    /// key before being published.
    Stream { store: bool },
    /// Unconditional poll loop: fetch-detect-store, repeated indefinitely.
    StreamSet,
}

impl RunMode {
    /// Resolve the mode from the three CLI flags.
    ///
    /// Stream takes precedence and absorbs `stream_set` as "also store";
    /// at least one flag must be set.
    pub fn from_flags(unique: bool, stream: bool, stream_set: bool) -> Result<Self> {
        if stream {
            Ok(RunMode::Stream { store: stream_set })
        } else if stream_set {
            Ok(RunMode::StreamSet)
        } else if unique {
            Ok(RunMode::Unique)
        } else {
            Err(anyhow!(
                "no run mode selected; pass -u (unique), -s (stream) or -g (stream-set)"
            ))
        }
    }
}

/// Immutable relay configuration, built once at startup and passed
/// explicitly to every component.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Bus key raw frames are fetched from (and, in stream mode, the
    /// channel whose notifications trigger a cycle).
    pub input_key: String,
    /// Bus key/channel the encoded detection documents are written to.
    pub output_key: String,
    /// Key prefix under which `:width`, `:height` and `:channels` live.
    pub camera_params_key: String,
    /// Bus host and port.
    pub host: String,
    pub port: u16,
    pub mode: RunMode,
    pub verbose: bool,
}

impl RunConfig {
    pub fn width_key(&self) -> String {
        format!("{}:width", self.camera_params_key)
    }

    pub fn height_key(&self) -> String {
        format!("{}:height", self.camera_params_key)
    }

    pub fn channels_key(&self) -> String {
        format!("{}:channels", self.camera_params_key)
    }
}
