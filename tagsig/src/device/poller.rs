// tagsig/src/device/poller.rs

//! Status register polling. The tag's arbiter runs asynchronously to the
//! radio exchange, so bounded polling is the only way to synchronize.

use std::time::Duration;

use log::{debug, warn};
use rand::Rng;

use crate::constants::{
    CONFIG_READY_MASK, CONFIG_READY_VALUE, REG_CONFIG, REG_STATUS, UNLOCK_MASK, UNLOCK_VALUE,
};
use crate::device::Tag;
use crate::protocol::commands::encode_read_config;
use crate::protocol::parser::byte_at;
use crate::{Error, Result};

impl Tag<'_> {
    /// Read one status byte. The register value sits at offset 1 of the
    /// config block reply.
    pub fn read_register(&mut self, register: u8) -> Result<u8> {
        let reply = self.exchange(&encode_read_config(register))?;
        byte_at(&reply, 1)
    }

    /// Poll the status register every `unlock_poll_interval` until the SRAM
    /// is handed back to the radio side, or `unlock_timeout` elapses.
    /// Read failures are retried until the deadline.
    pub fn wait_until_unlocked(&mut self) -> Result<()> {
        let timeout = self.config().unlock_timeout;
        let interval = self.config().unlock_poll_interval;
        let start = self.clock().now();

        while self.clock().now().saturating_sub(start) < timeout {
            match self.read_register(REG_STATUS) {
                Ok(status) if status & UNLOCK_MASK == UNLOCK_VALUE => {
                    debug!("status register {:#04x}: unlocked", status);
                    return Ok(());
                }
                Ok(status) => debug!("status register {:#04x}: locked", status),
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => warn!("status register read failed: {}", e),
            }
            self.clock().sleep(interval);
        }

        Err(Error::Timeout)
    }

    /// Poll the arbiter register with a jittered delay until it reports
    /// pass-through mode with NFC transfer direction. Once `config_timeout`
    /// has passed exactly one more poll is made before giving up.
    pub fn wait_until_config_ready(&mut self) -> Result<()> {
        let timeout = self.config().config_timeout;
        let jitter_max = self.config().config_jitter_max.as_millis().max(1) as u64;
        let start = self.clock().now();
        let mut timed_out = false;
        let mut last = None;

        loop {
            match self.read_register(REG_CONFIG) {
                Ok(status) => {
                    last = Some(status);
                    if status & CONFIG_READY_MASK == CONFIG_READY_VALUE {
                        debug!("config register {:#04x}: ready", status);
                        return Ok(());
                    }
                    debug!("config register {:#04x}: not ready", status);
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => warn!("config register read failed: {}", e),
            }

            if timed_out {
                break;
            }

            let delay = rand::thread_rng().gen_range(1..=jitter_max);
            self.clock().sleep(Duration::from_millis(delay));

            if self.clock().now().saturating_sub(start) > timeout {
                timed_out = true;
            }
        }

        Err(Error::ConfigInvalid { last })
    }
}
