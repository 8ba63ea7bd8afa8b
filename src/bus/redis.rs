use anyhow::{Context, Result};
use redis::Commands;

use crate::bus::{BusSubscriber, FrameBus};
use crate::frame::{CameraParameters, Frame};

fn open_connection(host: &str, port: u16) -> Result<redis::Connection> {
    let client = redis::Client::open(format!("redis://{}:{}/", host, port))?;
    client.get_connection().with_context(|| {
        format!(
            "cannot connect to redis server at {}:{}; ensure a redis server is up and running",
            host, port
        )
    })
}

/// Synchronous Redis connection for keyed reads and writes.
pub struct RedisBus {
    conn: redis::Connection,
}

impl RedisBus {
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Ok(Self {
            conn: open_connection(host, port)?,
        })
    }
}

impl FrameBus for RedisBus {
    fn get_int(&mut self, key: &str) -> Result<Option<i64>> {
        Ok(self.conn.get(key)?)
    }

    fn get_frame(&mut self, key: &str, params: &CameraParameters) -> Result<Option<Frame>> {
        let payload: Option<Vec<u8>> = self.conn.get(key)?;
        let Some(data) = payload else {
            return Ok(None);
        };
        let len = data.len();
        match Frame::from_payload(data, params) {
            Some(frame) => Ok(Some(frame)),
            None => {
                log::warn!(
                    "frame at `{}` has {} bytes, expected {}; treating as not available",
                    key,
                    len,
                    params.frame_len()
                );
                Ok(None)
            }
        }
    }

    fn set(&mut self, key: &str, payload: &str) -> Result<()> {
        let _: () = self.conn.set(key, payload)?;
        Ok(())
    }

    fn publish(&mut self, key: &str, payload: &str) -> Result<()> {
        let _: () = self.conn.publish(key, payload)?;
        Ok(())
    }
}

/// Dedicated pub/sub connection.
///
/// Kept separate from `RedisBus` because the handler re-enters the
/// synchronous connection mid-delivery, mirroring the bus client's own
/// split between subscription and request/response traffic.
pub struct RedisSubscriber {
    conn: redis::Connection,
}

impl RedisSubscriber {
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        Ok(Self {
            conn: open_connection(host, port)?,
        })
    }
}

impl BusSubscriber for RedisSubscriber {
    fn subscribe(&mut self, key: &str, handler: &mut dyn FnMut(&[Vec<u8>])) -> Result<()> {
        let mut pubsub = self.conn.as_pubsub();
        pubsub
            .subscribe(key)
            .with_context(|| format!("cannot subscribe to `{}`", key))?;
        loop {
            let msg = pubsub.get_message()?;
            let reply = [
                b"message".to_vec(),
                msg.get_channel_name().as_bytes().to_vec(),
                msg.get_payload_bytes().to_vec(),
            ];
            handler(&reply);
        }
    }
}
