//! aruco-relay - marker detection relay daemon.
//!
//! Reads raw frames from a Redis key, runs them through a marker detector
//! and writes the encoded detection documents back to the bus, either once
//! (-u), continuously by polling (-g), or per published notification (-s).

use anyhow::Result;
use clap::{ArgGroup, Parser};

use aruco_relay::{detector_by_name, RedisBus, RedisSubscriber, Relay, RunConfig, RunMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "ArUco marker detection relay over a Redis frame bus")]
#[command(group(
    ArgGroup::new("mode")
        .args(["unique", "stream", "stream_set"])
        .required(true)
        .multiple(true)
))]
struct Args {
    /// Redis key the raw frames arrive on.
    #[arg(short = 'i', long = "input", env = "RELAY_INPUT_KEY", default_value = "camera0")]
    input_key: String,

    /// Redis key/channel the detection documents are written to.
    #[arg(short = 'o', long = "output", env = "RELAY_OUTPUT_KEY", default_value = "camera0:markers")]
    output_key: String,

    /// Redis key prefix under which :width, :height and :channels are stored.
    #[arg(
        short = 'c',
        long = "camera-parameters",
        env = "RELAY_CAMERA_PARAMETERS_KEY",
        default_value = "camera0"
    )]
    camera_params_key: String,

    /// Host the redis client connects to.
    #[arg(long, env = "REDIS_HOST", default_value = "127.0.0.1")]
    redis_host: String,

    /// Port the redis client connects to.
    #[arg(long, env = "REDIS_PORT", default_value_t = 6379)]
    redis_port: u16,

    /// Unique mode: process one frame, store the result, exit.
    #[arg(short = 'u', long, conflicts_with_all = ["stream", "stream_set"])]
    unique: bool,

    /// Stream mode: subscribe to the input key and publish one result per
    /// notification.
    #[arg(short = 's', long)]
    stream: bool,

    /// Stream-set mode: continuously poll and store results. Combined with
    /// --stream, each result is stored and then published.
    #[arg(short = 'g', long)]
    stream_set: bool,

    /// Detector backend to run frames through.
    #[arg(long, env = "RELAY_DETECTOR", default_value = "stub")]
    detector: String,

    /// Print per-cycle diagnostics (including the encoded documents) on
    /// stderr.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mode = RunMode::from_flags(args.unique, args.stream, args.stream_set)?;
    let cfg = RunConfig {
        input_key: args.input_key,
        output_key: args.output_key,
        camera_params_key: args.camera_params_key,
        host: args.redis_host,
        port: args.redis_port,
        mode,
        verbose: args.verbose,
    };

    let default_filter = if cfg.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::debug!(
        "input `{}`, output `{}`, camera parameters `{}`, mode {:?}",
        cfg.input_key,
        cfg.output_key,
        cfg.camera_params_key,
        cfg.mode
    );

    let detector = detector_by_name(&args.detector)?;
    log::info!("detector backend: {}", detector.name());

    let bus = RedisBus::connect(&cfg.host, cfg.port)?;
    let subscriber = match cfg.mode {
        RunMode::Stream { .. } => Some(RedisSubscriber::connect(&cfg.host, cfg.port)?),
        _ => None,
    };

    let mut relay = Relay::connect(cfg, bus, detector)?;
    relay.run(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn a_mode_flag_is_required() {
        assert!(Args::try_parse_from(["aruco-relay"]).is_err());
    }

    #[test]
    fn unique_conflicts_with_stream() {
        assert!(Args::try_parse_from(["aruco-relay", "-u", "-s"]).is_err());
        assert!(Args::try_parse_from(["aruco-relay", "-u", "-g"]).is_err());
    }

    #[test]
    fn stream_composes_with_stream_set() {
        let args = Args::try_parse_from(["aruco-relay", "-s", "-g"]).unwrap();
        assert_eq!(
            RunMode::from_flags(args.unique, args.stream, args.stream_set).unwrap(),
            RunMode::Stream { store: true }
        );
    }

    #[test]
    fn verbose_flag_is_carried_into_the_config() {
        let args = Args::try_parse_from(["aruco-relay", "-u", "-v"]).unwrap();
        assert!(args.verbose);
        let args = Args::try_parse_from(["aruco-relay", "-u"]).unwrap();
        assert!(!args.verbose);
    }

    #[test]
    fn keys_default_to_camera0() {
        let args = Args::try_parse_from(["aruco-relay", "-u"]).unwrap();
        assert_eq!(args.input_key, "camera0");
        assert_eq!(args.output_key, "camera0:markers");
        assert_eq!(args.camera_params_key, "camera0");
        assert_eq!(args.redis_host, "127.0.0.1");
        assert_eq!(args.redis_port, 6379);
    }
}
